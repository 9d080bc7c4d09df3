//! Similar-books lookup wire types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Book returned by the remote search API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SimilarBook {
    #[serde(default)]
    pub isbn13: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub price: String,
}

/// Search response envelope. `error` is `"0"` on success.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub books: Option<Vec<SimilarBook>>,
}

/// Outcome of one lookup as applied to the detail view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(Vec<SimilarBook>),
    Failed(String),
}
