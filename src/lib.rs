//! pollen-hdf library
//!
//! This crate provides the core functionality for the `pollen-hdf` binary.
//! Keep the crate root minimal: implementation and tests live in their modules.
//!
//! ## Overview
//!
//! A pollen query is a single linear pass:
//!
//! - [`normalize`] - Turns free-text town input into the lookup key
//! - [`reference`] - Town table loaded once from CSV, read-only afterwards
//! - [`locator`] - Builds the observatory pollen page URL for a town and a date
//! - [`fetcher`] - Transport trait plus the pollen page and article parsers
//! - [`classifier`] - Maps risk levels to display colors
//! - [`service`] - Wires the steps above together and returns typed errors
//!
//! Around the core, [`map`] renders map artifacts, [`ui`] turns results and errors into
//! text or HTML, and [`cli`] exposes everything on the command line.
//!
//! ## Example Usage
//!
//! ```no_run
//! use pollen_hdf::config::{Endpoints, ResolvedConfig};
//! use pollen_hdf::fetcher::HttpTransport;
//! use pollen_hdf::reference::ReferenceTable;
//! use pollen_hdf::service::PollenService;
//! use pollen_hdf::{errors::AppResult, ui};
//! use std::sync::Arc;
//!
//! # async fn example() -> AppResult<()> {
//! let config = ResolvedConfig::default();
//! let table = ReferenceTable::load(&config.reference_table, None)?;
//! let service = PollenService::new(Arc::new(table), Endpoints::from_config(&config)?);
//! let transport = HttpTransport::new(&config)?;
//!
//! match service.resolve_and_fetch("Lille", &transport).await {
//!     Ok(result) => print!("{}", ui::render_query_result(&result)),
//!     Err(err) => eprintln!("{}", ui::query_error_message(&err)),
//! }
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod fetcher;
pub mod locator;
pub mod map;
pub mod models;
pub mod normalize;
pub mod reference;
pub mod service;
pub mod ui;
pub mod utils;
