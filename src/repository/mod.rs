//! Persistence bridge between the catalog core and a key-value blob store

pub mod file;
pub mod memory;
pub mod redis;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    catalog::{BookStore, Catalog, LoanLedger},
    config::{StorageBackend, StorageConfig},
    error::AppResult,
    models::{book::Book, loan::Loan},
};

/// Flat key-value blob storage. An absent key is not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;
    async fn set(&self, key: &str, blob: &str) -> AppResult<()>;
}

/// Loads and commits the book and loan collections under their two keys
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn BlobStore>,
    books_key: String,
    loans_key: String,
}

impl Repository {
    pub fn new(store: Arc<dyn BlobStore>, books_key: impl Into<String>, loans_key: impl Into<String>) -> Self {
        Self {
            store,
            books_key: books_key.into(),
            loans_key: loans_key.into(),
        }
    }

    /// Open the backend selected in configuration
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let store: Arc<dyn BlobStore> = match config.backend {
            StorageBackend::File => Arc::new(file::FileBlobStore::new(&config.path).await?),
            StorageBackend::Redis => Arc::new(redis::RedisBlobStore::new(&config.redis_url).await?),
            StorageBackend::Memory => Arc::new(memory::MemoryBlobStore::default()),
        };
        tracing::info!("Using {:?} storage backend", config.backend);
        Ok(Self::new(store, config.books_key.clone(), config.loans_key.clone()))
    }

    /// Load both collections. Missing or corrupt blobs yield empty collections.
    pub async fn load_catalog(&self) -> Catalog {
        let books: Vec<Book> = self.load_collection(&self.books_key).await;
        let mut loans: Vec<Loan> = self.load_collection(&self.loans_key).await;

        // Every loan must point at a user-added book
        let before = loans.len();
        loans.retain(|loan| {
            books
                .iter()
                .any(|b| b.id == loan.book_id && b.is_user_added)
        });
        if loans.len() < before {
            tracing::warn!(
                "Dropped {} loan(s) referencing missing or seeded books",
                before - loans.len()
            );
        }

        tracing::info!("Loaded {} book(s) and {} loan(s)", books.len(), loans.len());
        Catalog::new(BookStore::from_books(books), LoanLedger::from_loans(loans))
    }

    /// Persist both collections
    pub async fn save_catalog(&self, catalog: &Catalog) -> AppResult<()> {
        self.save_collection(&self.books_key, catalog.books().all()).await?;
        self.save_collection(&self.loans_key, catalog.loans().all()).await
    }

    async fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let blob = match self.store.get(key).await {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read {} from storage: {}", key, e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&blob) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Ignoring corrupt {} data: {}", key, e);
                Vec::new()
            }
        }
    }

    /// An empty collection is only written over a key that already exists
    async fn save_collection<T: Serialize>(&self, key: &str, items: &[T]) -> AppResult<()> {
        if items.is_empty() && self.store.get(key).await?.is_none() {
            return Ok(());
        }
        let blob = serde_json::to_string(items)?;
        self.store.set(key, &blob).await
    }
}
