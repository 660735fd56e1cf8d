//! End-to-end tests of the pollen query pipeline

#[path = "common/mod.rs"]
mod common;

use chrono::NaiveDate;
use common::*;
use pollen_hdf::classifier::RiskColor;
use pollen_hdf::config::Endpoints;
use pollen_hdf::errors::{FetchStatus, QueryError};
use pollen_hdf::models::RiskLevel;
use pollen_hdf::reference::ReferenceTable;
use pollen_hdf::service::{today, PollenService};
use std::sync::Arc;

fn service() -> PollenService {
    let table = ReferenceTable::from_reader(TOWNS_CSV.as_bytes(), None).unwrap();
    PollenService::new(Arc::new(table), Endpoints::default())
}

#[tokio::test]
async fn lille_end_to_end() {
    let transport = RecordingTransport::ok(pollen_page(
        &[("Graminées", "Faible"), ("Bouleau", "Élevé")],
        Some("Moyen"),
    ));

    let day_before = today();
    let result = service()
        .resolve_and_fetch("Lille", &transport)
        .await
        .unwrap();
    let day_after = today();

    let requested = transport.requested();
    assert_eq!(requested.len(), 1);
    assert!(requested[0].contains("/Lille/59350/pollen"));
    // Either side of midnight
    assert!([day_before, day_after]
        .iter()
        .any(|day| requested[0].contains(&format!("date={}", day.format("%Y-%m-%d")))));

    let colors: Vec<_> = result
        .observations
        .iter()
        .map(|o| (o.pollen_name.as_str(), o.risk_level.color()))
        .collect();
    assert_eq!(
        colors,
        vec![("Graminées", RiskColor::Green), ("Bouleau", RiskColor::Red)]
    );
    assert_eq!(result.department_risk.as_deref(), Some("Moyen"));

    let town = result.resolved_town.unwrap();
    assert_eq!(town.postal_code, "59000");
    assert_eq!(town.department_name, "Nord");
}

#[tokio::test]
async fn explicit_date_and_messy_input() {
    let transport = RecordingTransport::ok(pollen_page(&[("Aulne", "Nul")], None));
    let date = NaiveDate::from_ymd_opt(2024, 4, 19).unwrap();

    let result = service()
        .resolve_and_fetch_on("  le   PORTEL ", &transport, date)
        .await
        .unwrap();

    assert_eq!(
        transport.requested(),
        vec![
            "https://www.atmo-hdf.fr/air-commune/Le-Portel/62667/pollen?adresse=Le+Portel+%2862480%29&date=2024-04-19"
                .to_string()
        ]
    );
    assert_eq!(result.observations[0].risk_level, RiskLevel::Nul);
    assert_eq!(result.observations[0].risk_level.color(), RiskColor::LightBlue);
    assert!(result.department_risk.is_none());
}

#[tokio::test]
async fn unknown_town_does_not_fetch() {
    let transport = RecordingTransport::ok(pollen_page(&[], None));

    let err = service()
        .resolve_and_fetch("Nonexistent Town", &transport)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        QueryError::TownNotFound {
            input: "Nonexistent Town".to_string()
        }
    );
    assert!(transport.requested().is_empty());
}

#[tokio::test]
async fn server_error_is_fetch_failed() {
    let transport = RecordingTransport::status(503, "Service Unavailable");

    let err = service()
        .resolve_and_fetch("Lille", &transport)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        QueryError::FetchFailed {
            status: FetchStatus::Http(503)
        }
    );
}

#[tokio::test]
async fn timeout_is_fetch_failed() {
    let transport = RecordingTransport::failing(FetchStatus::Timeout);

    let err = service()
        .resolve_and_fetch("Amiens", &transport)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        QueryError::FetchFailed {
            status: FetchStatus::Timeout
        }
    );
    assert_eq!(transport.requested().len(), 1);
}

#[tokio::test]
async fn empty_page_is_parse_error() {
    let transport = RecordingTransport::ok("");

    let err = service()
        .resolve_and_fetch("Laon", &transport)
        .await
        .unwrap_err();

    assert!(matches!(err, QueryError::ParseError { .. }));
}

#[tokio::test]
async fn plain_text_page_is_parse_error() {
    let transport = RecordingTransport::ok("Service temporarily unavailable");

    let err = service()
        .resolve_and_fetch("Laon", &transport)
        .await
        .unwrap_err();

    assert!(matches!(err, QueryError::ParseError { .. }));
}

#[tokio::test]
async fn unknown_risk_labels_are_gray() {
    let transport = RecordingTransport::ok(pollen_page(&[("Ambroisie", "Très élevé")], None));

    let result = service()
        .resolve_and_fetch("Beauvais", &transport)
        .await
        .unwrap();

    assert_eq!(
        result.observations[0].risk_level,
        RiskLevel::Unknown("Très élevé".to_string())
    );
    assert_eq!(result.observations[0].risk_level.color(), RiskColor::Gray);
}

#[tokio::test]
async fn recommendations_use_dated_article() {
    let transport = RecordingTransport::ok(
        r#"<html><body><h2 id="item-4755">Recommandations</h2><ul><li>Aérer le matin</li></ul></body></html>"#,
    );
    let date = NaiveDate::from_ymd_opt(2025, 5, 2).unwrap();

    let recs = service().recommendations(&transport, date).await.unwrap();

    assert_eq!(recs.items, vec!["Aérer le matin".to_string()]);
    assert_eq!(
        transport.requested(),
        vec!["https://www.atmo-france.org/article/lindice-pollinique?date=2025-05-02".to_string()]
    );
}

#[tokio::test]
async fn measurement_article_errors_are_typed() {
    let transport = RecordingTransport::status(404, "");

    let err = service().measurement_article(&transport).await.unwrap_err();

    assert_eq!(
        err,
        QueryError::FetchFailed {
            status: FetchStatus::Http(404)
        }
    );
}
