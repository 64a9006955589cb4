//! In-memory store implementations
//!
//! Used by the test suite and by dev setups running without Redis
//! (`bookings.draft_store = "memory"`). Contents die with the process.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::{error::AppResult, models::BookingDraft};

use super::{draft_key, DeadLetterEntry, DeadLetterSink, DraftStore};

#[derive(Default)]
pub struct MemoryDraftStore {
    drafts: Mutex<HashMap<String, BookingDraft>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn save(&self, staff_id: Uuid, draft: &BookingDraft) -> AppResult<()> {
        let key = draft_key(draft.campground_id, staff_id);
        self.drafts
            .lock()
            .expect("draft store poisoned")
            .insert(key, draft.clone());
        Ok(())
    }

    async fn load(
        &self,
        campground_id: Uuid,
        staff_id: Uuid,
    ) -> AppResult<Option<BookingDraft>> {
        let key = draft_key(campground_id, staff_id);
        Ok(self
            .drafts
            .lock()
            .expect("draft store poisoned")
            .get(&key)
            .cloned())
    }

    async fn clear(&self, campground_id: Uuid, staff_id: Uuid) -> AppResult<()> {
        let key = draft_key(campground_id, staff_id);
        self.drafts
            .lock()
            .expect("draft store poisoned")
            .remove(&key);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryDeadLetterSink {
    entries: Mutex<Vec<DeadLetterEntry>>,
}

impl MemoryDeadLetterSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<DeadLetterEntry> {
        self.entries.lock().expect("dead letter sink poisoned").clone()
    }
}

#[async_trait]
impl DeadLetterSink for MemoryDeadLetterSink {
    async fn record(&self, entry: DeadLetterEntry) -> AppResult<()> {
        self.entries
            .lock()
            .expect("dead letter sink poisoned")
            .push(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_twice_then_load_is_idempotent() {
        let store = MemoryDraftStore::new();
        let staff_id = Uuid::new_v4();
        let mut draft = BookingDraft::new(Uuid::new_v4());
        draft.notes = Some("late arrival".to_string());

        store.save(staff_id, &draft).await.unwrap();
        store.save(staff_id, &draft).await.unwrap();

        let loaded = store
            .load(draft.campground_id, staff_id)
            .await
            .unwrap()
            .expect("draft should be present");
        assert_eq!(loaded.notes.as_deref(), Some("late arrival"));
        assert_eq!(loaded.campground_id, draft.campground_id);
    }

    #[tokio::test]
    async fn clear_removes_the_draft() {
        let store = MemoryDraftStore::new();
        let staff_id = Uuid::new_v4();
        let draft = BookingDraft::new(Uuid::new_v4());

        store.save(staff_id, &draft).await.unwrap();
        store.clear(draft.campground_id, staff_id).await.unwrap();

        assert!(store
            .load(draft.campground_id, staff_id)
            .await
            .unwrap()
            .is_none());
    }
}
