use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

static BODY_SELECTOR: OnceLock<Selector> = OnceLock::new();

/// Text of an element: every text node trimmed, then concatenated.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// Whether the document body holds at least one element.
///
/// Plain text or JSON served as a page ends up as a bare text node under `<body>`,
/// so it does not count as markup.
pub fn has_markup(document: &Html) -> bool {
    let body_selector = BODY_SELECTOR
        .get_or_init(|| Selector::parse("body").expect("body is a valid CSS selector"));

    document
        .select(body_selector)
        .next()
        .is_some_and(|body| body.children().any(|child| child.value().is_element()))
}

/// Date as used in the observatory query strings.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Escapes text for HTML element content and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
