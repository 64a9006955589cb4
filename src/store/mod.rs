//! Persistence ports: draft store and dead-letter sink
//!
//! Drafts are a UX convenience, not a durability guarantee; both ports are
//! traits so the flow can run against Redis in production and in-memory
//! fakes in tests or single-node dev setups.

pub mod memory;
pub mod redis;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{error::AppResult, models::BookingDraft};

/// Persistence port for in-progress booking drafts, keyed by campground
/// and staff member.
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn save(&self, staff_id: Uuid, draft: &BookingDraft) -> AppResult<()>;

    async fn load(&self, campground_id: Uuid, staff_id: Uuid)
        -> AppResult<Option<BookingDraft>>;

    async fn clear(&self, campground_id: Uuid, staff_id: Uuid) -> AppResult<()>;
}

pub type DynDraftStore = Arc<dyn DraftStore>;

/// Record of a best-effort cleanup that failed and needs operator review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadLetterEntry {
    pub kind: String,
    pub reservation_id: Option<Uuid>,
    pub detail: String,
    pub recorded_at: DateTime<Utc>,
}

impl DeadLetterEntry {
    pub fn cancellation_failed(reservation_id: Uuid, detail: impl Into<String>) -> Self {
        Self {
            kind: "reservation_cancellation_failed".to_string(),
            reservation_id: Some(reservation_id),
            detail: detail.into(),
            recorded_at: Utc::now(),
        }
    }
}

/// Sink for failed best-effort cleanups
#[async_trait]
pub trait DeadLetterSink: Send + Sync {
    async fn record(&self, entry: DeadLetterEntry) -> AppResult<()>;
}

pub type DynDeadLetterSink = Arc<dyn DeadLetterSink>;

/// Draft key shared by store implementations
pub(crate) fn draft_key(campground_id: Uuid, staff_id: Uuid) -> String {
    format!("booking:draft:{}:{}", campground_id, staff_id)
}
