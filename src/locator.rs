use crate::models::TownRecord;
use crate::normalize::normalize;
use crate::utils::format_date;
use chrono::NaiveDate;
use url::Url;

/// Builds the pollen page URL of a town for a given day.
///
/// Shape: `<base><Town-Name>/<insee>/pollen?adresse=<Town Name> (<postal>)&date=<YYYY-MM-DD>`.
/// The address is form-encoded, so spaces and parentheses never reach the wire raw.
/// `base` must be a hierarchical URL. [`crate::config::Endpoints`] rejects any other
/// base when the configuration is loaded; a cannot-be-a-base URL would get only the
/// query string.
pub fn build_locator(base: &Url, town: &TownRecord, date: NaiveDate) -> Url {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .pop_if_empty()
            .push(&normalize(&town.canonical_name))
            .push(&town.insee_code)
            .push("pollen");
    }
    url.query_pairs_mut()
        .clear()
        .append_pair(
            "adresse",
            &format!("{} ({})", town.canonical_name, town.postal_code),
        )
        .append_pair("date", &format_date(date));
    url
}

/// Builds the recommendations article URL for a given day.
pub fn recommendations_locator(base: &Url, date: NaiveDate) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("date", &format_date(date));
    url
}
