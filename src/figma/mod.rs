//! Figma integration: share-link parsing and file fetch over the REST API.

pub mod client;
pub mod link;

pub use client::{FigmaAuth, FigmaClient};
pub use link::{parse_figma_url, FigmaFileRef};
