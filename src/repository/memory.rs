//! In-process blob store, used for ephemeral sessions and tests

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BlobStore;
use crate::error::AppResult;

#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.blobs.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, blob: &str) -> AppResult<()> {
        self.blobs.write().await.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
