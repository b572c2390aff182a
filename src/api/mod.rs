//! Content API module
//!
//! This module contains the client side of the versioned documentation API:
//! - Wire types for the four consumed endpoints
//! - The request functions themselves (resolve, version, TOC, content)
//! - Locale content fragment extraction

mod client;
mod extract;
mod types;

pub use client::{build_http_client, ApiClient};
pub use extract::extract_fragment;
pub use types::{DocumentMap, PagesResponse, PaginatedTocEntry, Resolution, TocNode};
