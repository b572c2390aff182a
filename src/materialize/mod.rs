//! Tree materializer module
//!
//! The core of docmirror: walking a document's TOC tree in pre-order,
//! assigning stable numbering paths, fetching and aggregating content per
//! node, and writing the numbered file hierarchy.

mod html;
mod numbering;
mod walker;

pub use html::{full_document_footer, full_document_header, render_page, render_section};
pub use numbering::{count_nodes, sanitize_title, NumberingPath};
pub use walker::Materializer;
