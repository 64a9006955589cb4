//! Redis-backed draft store and dead-letter log

use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::BookingDraft,
};

use super::{draft_key, DeadLetterEntry, DeadLetterSink, DraftStore};

const DEAD_LETTER_KEY: &str = "booking:dead_letter";

#[derive(Clone)]
pub struct RedisDraftStore {
    client: Client,
    ttl_seconds: u64,
}

impl RedisDraftStore {
    /// Create a new Redis draft store and verify connectivity
    pub async fn new(url: &str, ttl_hours: u64) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        // Test connection
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self {
            client,
            ttl_seconds: ttl_hours * 3600,
        })
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))
    }
}

#[async_trait]
impl DraftStore for RedisDraftStore {
    async fn save(&self, staff_id: Uuid, draft: &BookingDraft) -> AppResult<()> {
        let mut conn = self.connection().await?;
        let key = draft_key(draft.campground_id, staff_id);
        let payload = serde_json::to_string(draft)
            .map_err(|e| AppError::Internal(format!("Failed to serialize draft: {}", e)))?;

        conn.set_ex::<_, _, ()>(&key, payload, self.ttl_seconds)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store draft in Redis: {}", e)))?;

        Ok(())
    }

    async fn load(
        &self,
        campground_id: Uuid,
        staff_id: Uuid,
    ) -> AppResult<Option<BookingDraft>> {
        let mut conn = self.connection().await?;
        let key = draft_key(campground_id, staff_id);

        let payload: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read draft from Redis: {}", e)))?;

        let Some(payload) = payload else {
            return Ok(None);
        };

        // A draft we can no longer parse is worthless; drop it rather
        // than fail the whole flow.
        match serde_json::from_str::<BookingDraft>(&payload) {
            Ok(draft) => Ok(Some(draft)),
            Err(e) => {
                tracing::warn!(key = %key, "Discarding unparseable saved draft: {}", e);
                Ok(None)
            }
        }
    }

    async fn clear(&self, campground_id: Uuid, staff_id: Uuid) -> AppResult<()> {
        let mut conn = self.connection().await?;
        let key = draft_key(campground_id, staff_id);

        conn.del::<_, ()>(&key)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete draft from Redis: {}", e)))?;

        Ok(())
    }
}

#[derive(Clone)]
pub struct RedisDeadLetterSink {
    client: Client,
}

impl RedisDeadLetterSink {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_store(store: &RedisDraftStore) -> Self {
        Self {
            client: store.client.clone(),
        }
    }
}

#[async_trait]
impl DeadLetterSink for RedisDeadLetterSink {
    async fn record(&self, entry: DeadLetterEntry) -> AppResult<()> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))?;

        let payload = serde_json::to_string(&entry)
            .map_err(|e| AppError::Internal(format!("Failed to serialize dead letter: {}", e)))?;

        conn.rpush::<_, _, ()>(DEAD_LETTER_KEY, payload)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to record dead letter: {}", e)))?;

        Ok(())
    }
}
