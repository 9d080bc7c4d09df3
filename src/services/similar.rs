//! Similar-books lookup against the public IT-bookstore search API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{
    config::LookupConfig,
    error::{AppError, AppResult},
    models::similar::{SearchResponse, SimilarBook},
};

/// Titles longer than this are shortened to their first words
const MAX_QUERY_CHARS: usize = 30;
const SHORT_QUERY_WORDS: usize = 3;

/// Remote search seam, mocked in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SimilarBooksLookup: Send + Sync {
    /// Raw search results for `query`. An API-level error yields an empty list.
    async fn search(&self, query: &str) -> AppResult<Vec<SimilarBook>>;
}

#[derive(Clone)]
pub struct ItBookstoreClient {
    client: Client,
    base_url: Url,
}

impl ItBookstoreClient {
    pub fn new(config: &LookupConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| AppError::Internal(format!("Invalid lookup base URL: {}", e)))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, base_url })
    }

    fn search_url(&self, query: &str) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Internal("Lookup base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push("search")
            .push(query);
        Ok(url)
    }
}

#[async_trait]
impl SimilarBooksLookup for ItBookstoreClient {
    async fn search(&self, query: &str) -> AppResult<Vec<SimilarBook>> {
        let url = self.search_url(query)?;
        tracing::debug!("Similar books lookup: {}", url);

        let response: SearchResponse = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::Lookup(e.to_string()))?
            .json()
            .await
            .map_err(|e| AppError::Lookup(e.to_string()))?;

        if response.error != "0" {
            tracing::debug!("Lookup API reported error {:?}", response.error);
            return Ok(Vec::new());
        }
        Ok(response.books.unwrap_or_default())
    }
}

/// Search query for a title: the whole title, or its first three words when long
pub fn query_for_title(title: &str) -> String {
    if title.chars().count() > MAX_QUERY_CHARS {
        title
            .split_whitespace()
            .take(SHORT_QUERY_WORDS)
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        title.to_string()
    }
}

/// Drop the book itself from the results and cap the list
pub fn select_similar(results: Vec<SimilarBook>, current_id: &str, limit: usize) -> Vec<SimilarBook> {
    results
        .into_iter()
        .filter(|b| b.isbn13 != current_id)
        .take(limit)
        .collect()
}
