//! Static HTML rendering for materialized pages
//!
//! Every per-node file is a minimal static document wrapping the aggregated
//! section content; the whole-document file uses the same shell around the
//! flat concatenation of every node's own section.

/// Renders one topic's section: a heading at the given level followed by the
/// extracted content fragment
pub fn render_section(topic_id: &str, level: u8, heading: &str, fragment: &str) -> String {
    // Heading levels below h1 or above h6 are not valid HTML
    let level = level.clamp(1, 6);
    format!(
        "<section id='{topic_id}'><h{level}>{heading}</h{level}>{fragment}</section>"
    )
}

/// Renders a minimal static HTML document around already-rendered content
pub fn render_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
</head>
<body>
    {content}
</body>
</html>"#
    )
}

/// Opening shell of the whole-document file
pub fn full_document_header(title: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang='en'><head><meta charset='UTF-8'><title>{title}</title></head><body>"
    )
}

/// Closing shell of the whole-document file
pub fn full_document_footer() -> &'static str {
    "</body></html>"
}
