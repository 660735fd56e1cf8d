//! Informational articles shown next to the pollen table.

use crate::constants::{
    ARTICLE_BODY_SELECTOR, RECOMMENDATIONS_ANCHOR_SELECTOR, VIDEO_IFRAME_SELECTOR,
};
use crate::errors::QueryError;
use crate::models::{MeasurementArticle, Recommendations};
use crate::utils::element_text;
use scraper::{Html, Selector};
use std::sync::OnceLock;

static RECOMMENDATIONS_ANCHOR: OnceLock<Selector> = OnceLock::new();
static LIST_ITEM: OnceLock<Selector> = OnceLock::new();
static ARTICLE_BODY: OnceLock<Selector> = OnceLock::new();
static PARAGRAPH: OnceLock<Selector> = OnceLock::new();
static VIDEO_IFRAME: OnceLock<Selector> = OnceLock::new();

fn selector(cell: &'static OnceLock<Selector>, css: &str) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(css).expect("article selectors are valid CSS"))
}

fn missing(what: &str) -> QueryError {
    QueryError::ParseError {
        reason: format!("missing expected structure: {what}"),
    }
}

/// Extracts the allergy recommendations: the items of the first list that follows the
/// recommendations heading in document order.
pub fn parse_recommendations(html: &str) -> Result<Recommendations, QueryError> {
    let document = Html::parse_document(html);
    let mut anchors = document.select(selector(
        &RECOMMENDATIONS_ANCHOR,
        RECOMMENDATIONS_ANCHOR_SELECTOR,
    ));

    if !anchors.any(|el| el.value().name() == "h2") {
        return Err(missing("recommendations heading"));
    }
    let list = anchors
        .find(|el| el.value().name() == "ul")
        .ok_or_else(|| missing("recommendations list"))?;

    let items = list
        .select(selector(&LIST_ITEM, "li"))
        .map(element_text)
        .filter(|item| !item.is_empty())
        .collect();

    Ok(Recommendations { items })
}

/// Extracts the paragraphs of the pollen measurement article and its embedded video.
pub fn parse_measurement_article(html: &str) -> Result<MeasurementArticle, QueryError> {
    let document = Html::parse_document(html);
    let body = document
        .select(selector(&ARTICLE_BODY, ARTICLE_BODY_SELECTOR))
        .next()
        .ok_or_else(|| missing("article body"))?;

    let paragraphs = body
        .select(selector(&PARAGRAPH, "p"))
        .map(element_text)
        .filter(|p| !p.is_empty())
        .collect();

    let video_url = document
        .select(selector(&VIDEO_IFRAME, VIDEO_IFRAME_SELECTOR))
        .filter_map(|el| el.value().attr("src"))
        .map(str::trim)
        .find(|src| !src.is_empty())
        .map(str::to_string);

    Ok(MeasurementArticle {
        paragraphs,
        video_url,
    })
}
