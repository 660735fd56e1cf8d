//! Presentation layer: the only place where results and errors become text.
//!
//! Messages are in French, like the observatory pages they summarize.

use crate::errors::{AppError, FetchStatus, QueryError};
use crate::models::{MeasurementArticle, QueryResult, Recommendations, TownRecord};
use crate::utils::escape_html;
use std::fmt::Write;

/// User-facing message for a failed query.
pub fn query_error_message(err: &QueryError) -> String {
    match err {
        QueryError::TownNotFound { .. } => "Ville non trouvée.".to_string(),
        QueryError::FetchFailed {
            status: FetchStatus::Http(code),
        } => format!("La requête a échoué avec le code : {code}"),
        QueryError::FetchFailed {
            status: FetchStatus::Timeout,
        } => "La requête a expiré, le site ne répond pas.".to_string(),
        QueryError::FetchFailed {
            status: FetchStatus::Unreachable,
        } => "Le site est injoignable.".to_string(),
        QueryError::ParseError { .. } => {
            "La page reçue n'a pas la structure attendue.".to_string()
        }
    }
}

/// User-facing message for any application error.
pub fn app_error_message(err: &AppError) -> String {
    match err {
        AppError::Query(query) => query_error_message(query),
        AppError::DataLoadError(detail) => {
            format!("Impossible de charger la liste des communes : {detail}")
        }
        other => format!("Erreur : {other}"),
    }
}

/// Pollen table as plain text.
pub fn render_query_result(result: &QueryResult) -> String {
    let mut out = String::new();
    if let Some(town) = &result.resolved_town {
        let _ = writeln!(out, "{}", town_heading(town));
    }

    if result.observations.is_empty() {
        out.push_str("Aucune donnée pollinique disponible.\n");
    } else {
        let width = result
            .observations
            .iter()
            .map(|o| o.pollen_name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Pollen".len());
        let _ = writeln!(out, "{:<width$}  Risque", "Pollen");
        for obs in &result.observations {
            let _ = writeln!(
                out,
                "{:<width$}  {} ({})",
                obs.pollen_name,
                obs.risk_level.label(),
                obs.risk_level.color().css()
            );
        }
    }

    if let Some(risk) = &result.department_risk {
        let _ = writeln!(out, "Niveau de risque de pollen par département : {risk}");
    }
    out
}

fn town_heading(town: &TownRecord) -> String {
    format!(
        "{} ({}) - {}",
        town.canonical_name, town.postal_code, town.department_name
    )
}

pub fn render_recommendations(recs: &Recommendations) -> String {
    let mut out = String::from("Quelles sont les recommandations en cas d'allergie ?\n");
    for item in &recs.items {
        let _ = writeln!(out, "- {item}");
    }
    out
}

pub fn render_measurement(article: &MeasurementArticle) -> String {
    let mut out = String::from("Comment ça marche la mesure des pollens ?\n");
    for paragraph in &article.paragraphs {
        let _ = writeln!(out, "- {paragraph}");
    }
    if let Some(video) = &article.video_url {
        let _ = writeln!(out, "Vidéo : {video}");
    }
    out
}

pub fn render_towns<'a>(towns: impl Iterator<Item = &'a TownRecord>) -> String {
    let mut out = String::new();
    for town in towns {
        let _ = writeln!(out, "{}", town_heading(town));
    }
    out
}

/// Standalone HTML page with the pollen table and the town map side by side.
pub fn render_dashboard_page(result: &QueryResult, map_html: Option<&str>) -> String {
    let heading = result
        .resolved_town
        .as_ref()
        .map(town_heading)
        .unwrap_or_default();

    let mut rows = String::new();
    for obs in &result.observations {
        let _ = writeln!(
            rows,
            r#"<tr><td>{}</td><td><span class="dot" style="background-color: {}"></span>{}</td></tr>"#,
            escape_html(&obs.pollen_name),
            obs.risk_level.color().css(),
            escape_html(obs.risk_level.label()),
        );
    }

    let department = result
        .department_risk
        .as_deref()
        .map(|risk| {
            format!(
                "<p>Niveau de risque de pollen par département : {}</p>",
                escape_html(risk)
            )
        })
        .unwrap_or_default();

    let map = map_html
        .map(|html| {
            format!(
                r#"<iframe srcdoc="{}" width="95%" height="450" style="border: none"></iframe>"#,
                escape_html(html)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Tableau de bord Pollen</title>
<style>
header {{ background-color: #004d00; color: white; padding: 10px 20px; font-size: 40px; font-weight: bold; }}
main {{ display: flex; gap: 20px; padding: 20px; font-family: Arial, sans-serif; }}
.dot {{ height: 20px; width: 20px; border-radius: 50%; display: inline-block; margin: 0 10px 0 40px; }}
</style>
</head>
<body>
<header>Tableau de bord Pollen</header>
<main>
<section>
<h1>Indice de risque pollinique par commune</h1>
<h2>{heading}</h2>
<table>
<thead><tr><th>Pollen</th><th>Risque</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
{department}
</section>
<section style="flex: 1">{map}</section>
</main>
</body>
</html>
"#,
        heading = escape_html(&heading),
    )
}
