use crate::constants::{
    MEASUREMENT_URL, NOMINATIM_URL, POLLEN_BASE_URL, RECOMMENDATIONS_URL, REGION_GEOJSON_URL,
};
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Resolved configuration with all values filled in.
///
/// Every key is optional in the TOML file; missing keys take the defaults below.
/// Unknown keys are rejected to catch typos.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// CSV file with the towns of the region
    pub reference_table: PathBuf,
    /// Keep only the rows whose `nom_region` matches, when the column exists
    pub region: Option<String>,

    // Remote pages
    /// Base of the per-town pollen pages
    pub pollen_base_url: String,
    /// Allergy recommendations article
    pub recommendations_url: String,
    /// Pollen measurement article
    pub measurement_url: String,
    /// GeoJSON outline of the region departments
    pub region_geojson_url: String,
    /// Nominatim search endpoint used for town outlines
    pub nominatim_url: String,

    // HTTP
    /// Timeout applied to every request, in seconds
    pub request_timeout_secs: u64,
    pub user_agent: String,

    /// Where map artifacts are written
    pub map_cache_dir: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            reference_table: PathBuf::from("data/villes_hauts_de_france.csv"),
            region: None,
            pollen_base_url: POLLEN_BASE_URL.to_string(),
            recommendations_url: RECOMMENDATIONS_URL.to_string(),
            measurement_url: MEASUREMENT_URL.to_string(),
            region_geojson_url: REGION_GEOJSON_URL.to_string(),
            nominatim_url: NOMINATIM_URL.to_string(),
            request_timeout_secs: 10,
            user_agent: format!("pollen-hdf/{}", env!("CARGO_PKG_VERSION")),
            map_cache_dir: PathBuf::from("data/maps"),
        }
    }
}

impl ResolvedConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read, and `InvalidInput` if the TOML is
    /// malformed, contains unknown keys, or sets a zero timeout.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ResolvedConfig = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;

        if config.request_timeout_secs == 0 {
            return Err(AppError::InvalidInput(
                "Request timeout must be greater than 0".into(),
            ));
        }

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Parsed remote endpoints.
///
/// Bases are checked to be hierarchical URLs so path segments can be appended.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub pollen_base: Url,
    pub recommendations: Url,
    pub measurement: Url,
    pub region_geojson: Url,
    pub nominatim: Url,
}

impl Endpoints {
    pub fn from_config(config: &ResolvedConfig) -> AppResult<Self> {
        Ok(Self {
            pollen_base: parse_base(&config.pollen_base_url)?,
            recommendations: parse_base(&config.recommendations_url)?,
            measurement: parse_base(&config.measurement_url)?,
            region_geojson: parse_base(&config.region_geojson_url)?,
            nominatim: parse_base(&config.nominatim_url)?,
        })
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_config(&ResolvedConfig::default()).expect("built-in endpoints are valid URLs")
    }
}

fn parse_base(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(AppError::UrlError(format!("{raw} cannot be used as a base URL")));
    }
    Ok(url)
}
