//! Query orchestration: name → town → locator → fetch → parse → result.

use crate::config::Endpoints;
use crate::errors::QueryError;
use crate::fetcher::{
    fetch_document, parse_measurement_article, parse_pollen_page, parse_recommendations,
    Transport,
};
use crate::locator::{build_locator, recommendations_locator};
use crate::models::{MeasurementArticle, QueryResult, Recommendations, TownRecord};
use crate::reference::ReferenceTable;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::info;

/// Runs pollen queries against a loaded reference table.
///
/// Each call is a single pass with no retry. Callers driving this from user input are
/// expected to keep at most one query in flight per session; the service does not
/// serialize concurrent calls.
#[derive(Debug, Clone)]
pub struct PollenService {
    table: Arc<ReferenceTable>,
    endpoints: Endpoints,
}

impl PollenService {
    pub fn new(table: Arc<ReferenceTable>, endpoints: Endpoints) -> Self {
        Self { table, endpoints }
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Resolves free-text input to a town of the reference table.
    pub fn resolve(&self, raw_town: &str) -> Result<&TownRecord, QueryError> {
        self.table
            .lookup(raw_town)
            .ok_or_else(|| QueryError::TownNotFound {
                input: raw_town.trim().to_string(),
            })
    }

    /// Fetches today's pollen observations for `raw_town`.
    pub async fn resolve_and_fetch<T: Transport>(
        &self,
        raw_town: &str,
        transport: &T,
    ) -> Result<QueryResult, QueryError> {
        self.resolve_and_fetch_on(raw_town, transport, today()).await
    }

    /// Fetches the pollen observations of `raw_town` for `date`.
    ///
    /// # Errors
    ///
    /// - `TownNotFound` when the input does not resolve; nothing is fetched.
    /// - `FetchFailed` on transport failure, timeout or a non-200 answer.
    /// - `ParseError` when the page body is empty.
    pub async fn resolve_and_fetch_on<T: Transport>(
        &self,
        raw_town: &str,
        transport: &T,
        date: NaiveDate,
    ) -> Result<QueryResult, QueryError> {
        let town = self.resolve(raw_town)?;
        let locator = build_locator(&self.endpoints.pollen_base, town, date);
        info!(
            town = %town.canonical_name,
            insee = %town.insee_code,
            url = %locator,
            "Fetching pollen page"
        );

        let body = fetch_document(transport, &locator).await?;
        let mut result = parse_pollen_page(&body)?;
        result.resolved_town = Some(town.clone());

        info!(
            town = %town.canonical_name,
            observations = result.observations.len(),
            "Pollen query completed"
        );
        Ok(result)
    }

    /// Fetches the allergy recommendations published for `date`.
    pub async fn recommendations<T: Transport>(
        &self,
        transport: &T,
        date: NaiveDate,
    ) -> Result<Recommendations, QueryError> {
        fetch_recommendations(transport, &self.endpoints, date).await
    }

    /// Fetches the pollen measurement article.
    pub async fn measurement_article<T: Transport>(
        &self,
        transport: &T,
    ) -> Result<MeasurementArticle, QueryError> {
        fetch_measurement_article(transport, &self.endpoints).await
    }
}

/// Fetches the allergy recommendations; does not need the reference table.
pub async fn fetch_recommendations<T: Transport>(
    transport: &T,
    endpoints: &Endpoints,
    date: NaiveDate,
) -> Result<Recommendations, QueryError> {
    let locator = recommendations_locator(&endpoints.recommendations, date);
    let body = fetch_document(transport, &locator).await?;
    let recs = parse_recommendations(&body)?;
    info!(items = recs.items.len(), "Recommendations fetched");
    Ok(recs)
}

pub async fn fetch_measurement_article<T: Transport>(
    transport: &T,
    endpoints: &Endpoints,
) -> Result<MeasurementArticle, QueryError> {
    let body = fetch_document(transport, &endpoints.measurement).await?;
    parse_measurement_article(&body)
}

/// Today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
