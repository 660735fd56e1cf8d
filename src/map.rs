//! Map artifacts for the dashboard.
//!
//! Maps are standalone Leaflet HTML documents centered on the region or on a town,
//! with an optional GeoJSON outline. They are written under the map cache directory
//! and reused when already present.

use crate::config::Endpoints;
use crate::constants::{REGION_CENTER, REGION_MAP_FILE, REGION_ZOOM, TOWN_ZOOM};
use crate::errors::AppResult;
use crate::fetcher::{fetch_document, Transport};
use crate::models::TownRecord;
use crate::normalize::normalize;
use crate::utils::escape_html;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};
use url::Url;

/// What a map shows.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub title: String,
    pub center: (f64, f64),
    pub zoom: f64,
    pub outline: Option<Value>,
    /// Leaflet path style applied to the outline
    pub outline_style: Value,
}

impl MapView {
    /// Whole region, departments drawn as black borders without fill.
    pub fn region(outline: Option<Value>) -> Self {
        Self {
            title: "Hauts-de-France".to_string(),
            center: REGION_CENTER,
            zoom: REGION_ZOOM,
            outline,
            outline_style: json!({ "fillOpacity": 0, "color": "black", "weight": 2 }),
        }
    }

    pub fn town(town: &TownRecord, outline: Option<Value>) -> Self {
        Self {
            title: format!("{} ({})", town.canonical_name, town.postal_code),
            center: (town.latitude, town.longitude),
            zoom: TOWN_ZOOM,
            outline,
            outline_style: json!({}),
        }
    }
}

/// Renders a map as a standalone HTML document.
pub fn render_map_html(view: &MapView) -> String {
    let outline = view
        .outline
        .as_ref()
        .map(script_json)
        .unwrap_or_else(|| "null".to_string());
    let style = script_json(&view.outline_style);
    let (lat, lon) = view.center;

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map").setView([{lat}, {lon}], {zoom});
L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
  attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
var outline = {outline};
if (outline) {{ L.geoJSON(outline, {{ style: function () {{ return {style}; }} }}).addTo(map); }}
</script>
</body>
</html>
"#,
        title = escape_html(&view.title),
        zoom = view.zoom,
    )
}

/// Serializes JSON for inclusion in an inline script.
fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// Nominatim search URL returning the outline of a town.
pub fn nominatim_locator(base: &Url, town: &TownRecord) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("q", &normalize(&town.canonical_name))
        .append_pair("polygon_geojson", "1")
        .append_pair("format", "json");
    url
}

/// Picks the outline of the first Nominatim search result.
pub fn first_result_outline(results: &Value) -> Option<Value> {
    results.as_array()?.first()?.get("geojson").cloned()
}

/// Builds and caches map artifacts.
#[derive(Debug, Clone)]
pub struct MapService {
    cache_dir: PathBuf,
    region_geojson: Url,
    nominatim: Url,
}

impl MapService {
    pub fn new(cache_dir: impl Into<PathBuf>, endpoints: &Endpoints) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            region_geojson: endpoints.region_geojson.clone(),
            nominatim: endpoints.nominatim.clone(),
        }
    }

    pub fn region_map_path(&self) -> PathBuf {
        self.cache_dir.join(REGION_MAP_FILE)
    }

    pub fn town_map_path(&self, town: &TownRecord) -> PathBuf {
        self.cache_dir.join(format!("town_{}.html", town.insee_code))
    }

    /// Returns the region map, rendering it on first use.
    ///
    /// Only maps carrying their outline are cached. When the outline download fails
    /// the map goes to a separate partial file and the next call tries again.
    pub async fn region_map<T: Transport>(&self, transport: &T) -> AppResult<PathBuf> {
        let path = self.region_map_path();
        if fs::try_exists(&path).await? {
            return Ok(path);
        }

        let outline = self.fetch_json(transport, &self.region_geojson).await;
        store_map(path, MapView::region(outline)).await
    }

    /// Returns the map of `town`, rendering it on first use.
    ///
    /// Cached the same way as [`MapService::region_map`].
    pub async fn town_map<T: Transport>(
        &self,
        transport: &T,
        town: &TownRecord,
    ) -> AppResult<PathBuf> {
        let path = self.town_map_path(town);
        if fs::try_exists(&path).await? {
            return Ok(path);
        }

        let locator = nominatim_locator(&self.nominatim, town);
        let outline = self
            .fetch_json(transport, &locator)
            .await
            .and_then(|results| first_result_outline(&results));
        if outline.is_none() {
            warn!(town = %town.canonical_name, "No outline found for town");
        }

        store_map(path, MapView::town(town, outline)).await
    }

    /// Outline downloads are best effort: failures only drop the overlay.
    async fn fetch_json<T: Transport>(&self, transport: &T, url: &Url) -> Option<Value> {
        let body = match fetch_document(transport, url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to download GeoJSON data");
                return None;
            }
        };
        match serde_json::from_str(&body) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(url = %url, error = %e, "Invalid GeoJSON data");
                None
            }
        }
    }
}

/// Path used for a map rendered without its outline: `town_59350.partial.html`.
pub fn partial_path(path: &Path) -> PathBuf {
    path.with_extension("partial.html")
}

async fn store_map(cached: PathBuf, view: MapView) -> AppResult<PathBuf> {
    let path = if view.outline.is_some() {
        cached
    } else {
        partial_path(&cached)
    };
    write_artifact(&path, &render_map_html(&view)).await?;
    Ok(path)
}

async fn write_artifact(path: &Path, html: &str) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, html).await?;
    info!(path = %path.display(), "Map written");
    Ok(())
}
