use crate::constants::{DEPARTMENT_RISK_SELECTOR, POLLEN_TITLE_SELECTOR, RISK_CATEGORY_SELECTOR};
use crate::errors::QueryError;
use crate::models::{PollenObservation, QueryResult, RiskLevel};
use crate::utils::{element_text, has_markup};
use scraper::{Html, Selector};
use std::sync::OnceLock;
use tracing::debug;

static POLLEN_TITLE: OnceLock<Selector> = OnceLock::new();
static RISK_CATEGORY: OnceLock<Selector> = OnceLock::new();
static DEPARTMENT_RISK: OnceLock<Selector> = OnceLock::new();

fn selector(cell: &'static OnceLock<Selector>, css: &str) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(css).expect("pollen page selectors are valid CSS"))
}

/// Parses a town pollen page into ordered (pollen, risk) observations.
///
/// The i-th pollen title is paired with the i-th risk category. When the page has
/// more of one than the other, the extra elements are dropped: the observatory pages
/// do not always carry the same number of both. The department risk is optional.
///
/// `resolved_town` is left unset; the caller attaches it.
///
/// # Errors
///
/// Returns `ParseError` when the document is not HTML: an empty body, or a body
/// with text but no element (plain text, JSON). Missing pollen elements in a real
/// page just give fewer observations.
pub fn parse_pollen_page(html: &str) -> Result<QueryResult, QueryError> {
    let document = Html::parse_document(html);
    if !has_markup(&document) {
        return Err(QueryError::ParseError {
            reason: "missing expected structure: no HTML elements in body".to_string(),
        });
    }

    let titles = document
        .select(selector(&POLLEN_TITLE, POLLEN_TITLE_SELECTOR))
        .map(element_text);
    let categories = document
        .select(selector(&RISK_CATEGORY, RISK_CATEGORY_SELECTOR))
        .map(element_text);

    let observations: Vec<PollenObservation> = titles
        .zip(categories)
        .map(|(pollen_name, category)| PollenObservation {
            risk_level: RiskLevel::from(category.as_str()),
            pollen_name,
        })
        .collect();

    let department_risk = document
        .select(selector(&DEPARTMENT_RISK, DEPARTMENT_RISK_SELECTOR))
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty());

    debug!(
        observations = observations.len(),
        department_risk = department_risk.as_deref().unwrap_or("-"),
        "Parsed pollen page"
    );

    Ok(QueryResult {
        observations,
        department_risk,
        resolved_town: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(name: &str) -> String {
        format!(
            r#"<p class="c-indice-pollen-taxon-title font-weight-bold text-center">{name}</p>"#
        )
    }

    fn category(level: &str) -> String {
        format!(r#"<p class="text-uppercase mt-2">{level}</p>"#)
    }

    fn page(blocks: &[String]) -> String {
        format!("<html><body><div>{}</div></body></html>", blocks.concat())
    }

    #[test]
    fn six_pairs_in_document_order() {
        let pollens = ["Ambroisie", "Armoise", "Aulne", "Bouleau", "Graminées", "Olivier"];
        let levels = ["Nul", "Faible", "Moyen", "Élevé", "Faible", "Nul"];
        let mut blocks = Vec::new();
        for (p, l) in pollens.iter().zip(levels.iter()) {
            blocks.push(format!("<div>{}{}</div>", title(p), category(l)));
        }

        let result = parse_pollen_page(&page(&blocks)).unwrap();

        assert_eq!(result.observations.len(), 6);
        for (i, obs) in result.observations.iter().enumerate() {
            assert_eq!(obs.pollen_name, pollens[i]);
            assert_eq!(obs.risk_level, RiskLevel::from(levels[i]));
        }
        assert!(result.resolved_town.is_none());
    }

    #[test]
    fn unequal_counts_truncate_to_shorter() {
        let mut blocks: Vec<String> = ["A", "B", "C", "D", "E"].iter().map(|p| title(p)).collect();
        blocks.extend(["Faible", "Moyen", "Nul"].iter().map(|l| category(l)));

        let result = parse_pollen_page(&page(&blocks)).unwrap();

        let pairs: Vec<_> = result
            .observations
            .iter()
            .map(|o| (o.pollen_name.as_str(), o.risk_level.label()))
            .collect();
        assert_eq!(pairs, vec![("A", "Faible"), ("B", "Moyen"), ("C", "Nul")]);
    }

    #[test]
    fn text_is_stripped_across_nodes() {
        let html = page(&[
            r#"<p class="c-indice-pollen-taxon-title font-weight-bold text-center">
                 <span> Graminées </span>
               </p>"#
                .to_string(),
            category("\n   Faible  \n"),
        ]);
        let result = parse_pollen_page(&html).unwrap();
        assert_eq!(result.observations[0].pollen_name, "Graminées");
        assert_eq!(result.observations[0].risk_level, RiskLevel::Faible);
    }

    #[test]
    fn extra_classes_do_not_match() {
        let html = page(&[
            title("Bouleau"),
            r#"<p class="text-uppercase mt-2 small">Moyen</p>"#.to_string(),
            category("Élevé"),
        ]);
        let result = parse_pollen_page(&html).unwrap();
        assert_eq!(result.observations.len(), 1);
        assert_eq!(result.observations[0].risk_level, RiskLevel::Eleve);
    }

    #[test]
    fn department_risk_is_optional() {
        let without = parse_pollen_page(&page(&[title("Aulne"), category("Nul")])).unwrap();
        assert_eq!(without.department_risk, None);

        let with = parse_pollen_page(&page(&[
            title("Aulne"),
            category("Nul"),
            r#"<p class="font-weight-bold text-uppercase mt-3"> Moyen </p>"#.to_string(),
        ]))
        .unwrap();
        assert_eq!(with.department_risk.as_deref(), Some("Moyen"));
    }

    #[test]
    fn page_without_pollen_elements_is_not_an_error() {
        let result = parse_pollen_page("<html><body><h1>Maintenance</h1></body></html>").unwrap();
        assert!(result.observations.is_empty());
    }

    #[test]
    fn empty_body_is_a_parse_error() {
        for html in ["", "   ", "<html><body>  </body></html>"] {
            assert!(matches!(
                parse_pollen_page(html),
                Err(QueryError::ParseError { .. })
            ));
        }
    }

    #[test]
    fn non_html_body_is_a_parse_error() {
        for body in [
            "Service temporarily unavailable",
            r#"{"status": 503, "message": "maintenance"}"#,
        ] {
            let err = parse_pollen_page(body).unwrap_err();
            assert!(matches!(
                &err,
                QueryError::ParseError { reason } if reason.starts_with("missing expected structure")
            ));
        }
    }
}
