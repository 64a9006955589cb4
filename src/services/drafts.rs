//! Draft lifecycle: normalization, restore merging and persistence
//!
//! The derived-state rules here are plain functions of the draft, invoked
//! after every mutation rather than hanging off framework reactivity, so
//! each rule is unit-testable on its own.

use chrono::Duration;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{draft::DraftSeed, BookingDraft, DRAFT_SCHEMA_VERSION},
    store::DynDraftStore,
};

/// Enforce the draft's structural invariants after a mutation
pub fn normalize(draft: &mut BookingDraft) {
    draft.schema_version = DRAFT_SCHEMA_VERSION;

    if draft.adults < 1 {
        draft.adults = 1;
    }

    // Departure must be strictly after arrival; auto-advance to a
    // two-night stay when it is missing or out of order.
    if let Some(arrival) = draft.arrival_date {
        let needs_adjust = match draft.departure_date {
            Some(departure) => departure <= arrival,
            None => true,
        };
        if needs_adjust {
            draft.departure_date = Some(arrival + Duration::days(2));
        }
    }
}

/// Merge a saved draft into the current one on restore. Only fields the
/// current draft leaves empty are taken from the saved copy; values
/// already set locally always win over stale saved ones.
pub fn merge_saved(current: &BookingDraft, saved: BookingDraft) -> BookingDraft {
    let mut merged = current.clone();

    merged.guest_id = current.guest_id.or(saved.guest_id);
    merged.arrival_date = current.arrival_date.or(saved.arrival_date);
    merged.departure_date = current.departure_date.or(saved.departure_date);
    merged.rig_type = current.rig_type.or(saved.rig_type);
    merged.rig_length_ft = current.rig_length_ft.or(saved.rig_length_ft);
    merged.site_id = current.site_id.or(saved.site_id);
    merged.site_class_id = current.site_class_id.or(saved.site_class_id);
    merged.notes = current.notes.clone().or(saved.notes);
    merged.referral_source = current.referral_source.clone().or(saved.referral_source);
    merged.stay_reason = current.stay_reason.clone().or(saved.stay_reason);
    merged.override_reason = current.override_reason.clone().or(saved.override_reason);
    merged.payment_method = current.payment_method.or(saved.payment_method);
    merged.cash_received_cents = current.cash_received_cents.or(saved.cash_received_cents);
    merged.payment_notes = current.payment_notes.clone().or(saved.payment_notes);
    merged.guest_search = current.guest_search.clone().or(saved.guest_search);
    merged.filter_site_type = current.filter_site_type.or(saved.filter_site_type);
    merged.filter_site_class_id = current.filter_site_class_id.or(saved.filter_site_class_id);

    if current.payment_amount_cents.is_none() {
        merged.payment_amount_cents = saved.payment_amount_cents;
        merged.synced_total_cents = saved.synced_total_cents;
    }

    if current.address.is_empty() {
        merged.address = saved.address;
    }

    if current.adults == 1 && current.children == 0 && current.pets == 0 {
        merged.adults = saved.adults;
        merged.children = saved.children;
        merged.pets = saved.pets;
    }

    if !current.site_locked {
        merged.site_locked = saved.site_locked;
    }
    if !current.payment_collection {
        merged.payment_collection = saved.payment_collection;
    }
    if current.available_only {
        merged.available_only = saved.available_only;
    }

    normalize(&mut merged);
    merged
}

/// Sync the default payment amount to the derived total.
///
/// The amount follows the total once per total-change; a value the user
/// edited away from the last synced default is never overwritten.
pub fn sync_payment_amount(draft: &mut BookingDraft, total_cents: Option<i64>) {
    if !draft.payment_collection {
        return;
    }
    let Some(total) = total_cents else {
        return;
    };
    if draft.synced_total_cents == Some(total) {
        return;
    }

    let follows_default = match (draft.payment_amount_cents, draft.synced_total_cents) {
        (None, _) => true,
        (Some(amount), Some(previous)) => amount == previous,
        (Some(_), None) => false,
    };

    if follows_default {
        draft.payment_amount_cents = Some(total);
        draft.synced_total_cents = Some(total);
    }
}

#[derive(Clone)]
pub struct DraftService {
    store: DynDraftStore,
}

impl DraftService {
    pub fn new(store: DynDraftStore) -> Self {
        Self { store }
    }

    /// Fresh draft for a campground, optionally seeded from deep-link
    /// query parameters
    pub fn seeded(&self, campground_id: Uuid, seed: &DraftSeed) -> BookingDraft {
        let mut draft = BookingDraft::new(campground_id);
        draft.guest_id = seed.guest_id;
        draft.site_id = seed.site_id;
        draft.arrival_date = seed.arrival_date;
        draft.departure_date = seed.departure_date;
        normalize(&mut draft);
        draft
    }

    /// Load the saved draft, discarding copies written by an older schema
    pub async fn saved_draft(
        &self,
        campground_id: Uuid,
        staff_id: Uuid,
    ) -> AppResult<Option<BookingDraft>> {
        let saved = self.store.load(campground_id, staff_id).await?;
        Ok(saved.filter(|draft| {
            if draft.schema_version == DRAFT_SCHEMA_VERSION {
                true
            } else {
                tracing::debug!(
                    version = draft.schema_version,
                    "Ignoring saved draft from another schema version"
                );
                false
            }
        }))
    }

    /// Fire-and-forget save. Persistence is a convenience; failures are
    /// logged at debug and dropped.
    pub fn persist_background(&self, staff_id: Uuid, draft: &BookingDraft) {
        if !draft.has_meaningful_input() {
            return;
        }
        let store = self.store.clone();
        let draft = draft.clone();
        tokio::spawn(async move {
            if let Err(e) = store.save(staff_id, &draft).await {
                tracing::debug!("Draft save failed: {}", e);
            }
        });
    }

    /// Explicit discard ("start fresh" or declined restore)
    pub async fn clear(&self, campground_id: Uuid, staff_id: Uuid) -> AppResult<()> {
        self.store.clear(campground_id, staff_id).await
    }

    /// Clear after a successful submission. The reservation already
    /// exists, so a failure here must not fail the request.
    pub async fn clear_silent(&self, campground_id: Uuid, staff_id: Uuid) {
        if let Err(e) = self.store.clear(campground_id, staff_id).await {
            tracing::warn!("Failed to clear draft after submission: {}", e);
        }
    }
}
