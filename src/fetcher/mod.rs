//! Remote pages: transport and page parsers.
//!
//! The parsers are pure functions over HTML text; [`Transport`] is the only piece that
//! touches the network. The main entry points are [`fetch_document`] and
//! [`parse_pollen_page`].

mod articles;
mod pollen_page;
mod transport;

// Re-export public API
pub use articles::{parse_measurement_article, parse_recommendations};
pub use pollen_page::parse_pollen_page;
pub use transport::{fetch_document, FetchResponse, HttpTransport, Transport};
