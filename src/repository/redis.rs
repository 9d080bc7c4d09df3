//! Blob store backed by Redis string keys

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};

use super::BlobStore;
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct RedisBlobStore {
    conn: ConnectionManager,
}

impl RedisBlobStore {
    /// Connect and check the server answers
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Storage(format!("Failed to create Redis client: {}", e)))?;

        let mut conn = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Storage(format!("Redis connection test failed: {}", e)))?;

        tracing::info!("Connected to Redis");
        Ok(Self { conn })
    }
}

#[async_trait]
impl BlobStore for RedisBlobStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        Ok(conn.get(key).await?)
    }

    async fn set(&self, key: &str, blob: &str) -> AppResult<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, blob).await?;
        Ok(())
    }
}
