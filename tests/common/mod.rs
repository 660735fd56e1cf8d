//! Common test utilities for integration tests

use pollen_hdf::errors::FetchStatus;
use pollen_hdf::fetcher::{FetchResponse, Transport};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use url::Url;

/// Reference table with a handful of towns of the region
#[allow(dead_code)]
pub const TOWNS_CSV: &str = "\
nom_commune_postal,latitude,longitude,code_postal,code_commune_INSEE,nom_departement,nom_region
Lille,50.6311,3.0468,59000,59350,Nord,Hauts-de-France
Le Portel,50.7068,1.5735,62480,62667,Pas-de-Calais,Hauts-de-France
Laon,49.5641,3.6199,2000,2408,Aisne,Hauts-de-France
Amiens,49.9009,2.2908,80000,80021,Somme,Hauts-de-France
Beauvais,49.4365,2.0861,60000,60057,Oise,Hauts-de-France
Rennes,48.1116,-1.6800,35000,35238,Ille-et-Vilaine,Bretagne
";

/// Helper function to write a reference table file
#[allow(dead_code)]
pub fn write_towns_csv(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Builds a pollen page in the observatory's markup
#[allow(dead_code)]
pub fn pollen_page(observations: &[(&str, &str)], department_risk: Option<&str>) -> String {
    let mut body = String::new();
    for (pollen, level) in observations {
        body.push_str(&format!(
            r#"<div class="c-indice-pollen-taxon">
                 <p class="c-indice-pollen-taxon-title font-weight-bold text-center">{pollen}</p>
                 <p class="text-uppercase mt-2">{level}</p>
               </div>"#
        ));
    }
    if let Some(risk) = department_risk {
        body.push_str(&format!(
            r#"<p class="font-weight-bold text-uppercase mt-3">{risk}</p>"#
        ));
    }
    format!("<!DOCTYPE html><html><head><title>Pollen</title></head><body>{body}</body></html>")
}

/// In-memory transport answering every request the same way and recording URLs
#[allow(dead_code)]
pub struct RecordingTransport {
    answer: Result<FetchResponse, FetchStatus>,
    pub requests: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingTransport {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            answer: Ok(FetchResponse {
                status,
                body: body.into(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: FetchStatus) -> Self {
        Self {
            answer: Err(status),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    async fn get(&self, url: &Url) -> Result<FetchResponse, FetchStatus> {
        self.requests.lock().unwrap().push(url.to_string());
        self.answer.clone()
    }
}
