//! Content fragment extraction
//!
//! Topic responses arrive as full HTML payloads; the fragment we want is the
//! locale content container inside them. When that container is absent the
//! entire payload becomes the fragment. The fallback is intentional and must
//! be preserved exactly, even though for atypical responses it can embed a
//! whole document shell (doctype, head) into a content fragment.

use scraper::{Html, Selector};

/// Extracts the locale content fragment from a raw topic payload
///
/// Locates the first `<div>` carrying `container_class` and returns its outer
/// HTML; if no such element exists, returns the raw payload unchanged.
pub fn extract_fragment(raw_html: &str, container_class: &str) -> String {
    let selector = match Selector::parse(&format!("div.{}", container_class)) {
        Ok(s) => s,
        // An unparseable class name means nothing can match; fall back to
        // the whole payload, same as a missing container
        Err(_) => return raw_html.to_string(),
    };

    let document = Html::parse_document(raw_html);
    match document.select(&selector).next() {
        Some(element) => element.html(),
        None => raw_html.to_string(),
    }
}
