//! Data models for Semantic Scholar search responses.
//!
//! All models use `#[serde(default)]` for optional fields and
//! `#[serde(rename_all = "camelCase")]` to match API naming.

mod paper;

pub use paper::{AuthorRef, Paper, SearchResult};
