//! Paper data model matching the Semantic Scholar search schema.

use serde::{Deserialize, Serialize};

/// Rendering of a missing title in the output file.
pub const MISSING_TITLE: &str = "None";

/// A research paper from Semantic Scholar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Semantic Scholar paper ID (the API includes it even when not requested).
    #[serde(default)]
    pub paper_id: Option<String>,

    /// Paper title.
    #[serde(default)]
    pub title: Option<String>,

    /// Paper abstract.
    #[serde(default)]
    pub r#abstract: Option<String>,

    /// Publication year.
    #[serde(default)]
    pub year: Option<i32>,

    /// List of authors.
    #[serde(default)]
    pub authors: Option<Vec<AuthorRef>>,

    /// Semantic Scholar landing page.
    #[serde(default)]
    pub url: Option<String>,

    /// Number of citations this paper has received.
    #[serde(default)]
    pub citation_count: Option<i64>,

    /// Fields of study (e.g., "Computer Science", "Medicine").
    #[serde(default)]
    pub fields_of_study: Option<Vec<String>>,
}

impl Paper {
    /// Title as written to the output file.
    #[must_use]
    pub fn title_line(&self) -> &str {
        self.title.as_deref().unwrap_or(MISSING_TITLE)
    }
}

/// Minimal author reference embedded in a paper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    /// Author ID.
    #[serde(default)]
    pub author_id: Option<String>,

    /// Author name.
    #[serde(default)]
    pub name: Option<String>,
}

/// One page of the paper search endpoint.
///
/// A body missing `data` deserializes as an empty page; a missing `total`
/// stays `None` so the paginator can tell "unknown" from zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    /// Total number of matching papers.
    #[serde(default)]
    pub total: Option<u64>,

    /// List of papers in this page.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<Paper>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Paper>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Paper>>::deserialize(deserializer)?.unwrap_or_default())
}
