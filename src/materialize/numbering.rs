//! Numbering paths and filename sanitization
//!
//! Every TOC node gets a dotted positional identifier (`"2.1"`) assigned by
//! traversal order. Sibling order is never reordered, so numbering is stable
//! across repeated runs and unique within a document.

use crate::api::TocNode;
use std::fmt;

/// Dot-joined sequence of 1-based sibling indices identifying a node within
/// its document (e.g. `"2.1"`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NumberingPath(Vec<usize>);

impl NumberingPath {
    /// The empty path used as the traversal's starting prefix
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Extends the path with a 1-based sibling index
    pub fn child(&self, index: usize) -> Self {
        debug_assert!(index >= 1, "sibling indices are 1-based");
        let mut components = self.0.clone();
        components.push(index);
        Self(components)
    }

    /// Tree depth of the node this path identifies (1 for top-level nodes)
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for NumberingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in &self.0 {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", component)?;
            first = false;
        }
        Ok(())
    }
}

/// Sanitizes a title into a valid filename component
///
/// Each of `< > : " / \ | ? *` becomes `_`; all other characters, spaces
/// included, are preserved. Leading and trailing whitespace is trimmed.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            other => other,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Recursively counts all nodes in a TOC for progress tracking
pub fn count_nodes(toc: &[TocNode]) -> usize {
    toc.iter()
        .map(|node| 1 + count_nodes(&node.children))
        .sum()
}
