use crate::config::ResolvedConfig;
use crate::errors::{AppResult, FetchStatus, QueryError};
use std::future::Future;
use tracing::{debug, warn};
use url::Url;

/// Raw answer of a GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

/// Fetches remote documents for the query pipeline.
///
/// Implementations return `Ok` for any HTTP answer, whatever its status, and
/// `Err(FetchStatus::Timeout | FetchStatus::Unreachable)` when no answer came back.
pub trait Transport {
    fn get(&self, url: &Url) -> impl Future<Output = Result<FetchResponse, FetchStatus>> + Send;
}

/// [`Transport`] over a shared `reqwest` client with a request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ResolvedConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<FetchResponse, FetchStatus> {
        let response = self.client.get(url.as_str()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Request failed");
            transport_status(&e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to read response body");
            transport_status(&e)
        })?;

        debug!(url = %url, status, bytes = body.len(), "Fetched");
        Ok(FetchResponse { status, body })
    }
}

fn transport_status(err: &reqwest::Error) -> FetchStatus {
    if err.is_timeout() {
        FetchStatus::Timeout
    } else {
        FetchStatus::Unreachable
    }
}

/// Fetches `url` and returns its body, treating anything but `200` as a failure.
pub async fn fetch_document<T: Transport>(transport: &T, url: &Url) -> Result<String, QueryError> {
    let response = transport
        .get(url)
        .await
        .map_err(|status| QueryError::FetchFailed { status })?;

    if response.status != 200 {
        warn!(url = %url, status = response.status, "Unexpected status");
        return Err(QueryError::FetchFailed {
            status: FetchStatus::Http(response.status),
        });
    }

    Ok(response.body)
}
