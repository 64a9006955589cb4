//! Booking draft model
//!
//! The single mutable record edited by the booking flow. The wire shape,
//! the persisted shape and the in-memory shape are the same struct; the
//! persisted copy additionally survives restarts through the draft store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::{PaymentMethod, RigType, SiteType};
use super::guest::GuestAddress;
use super::site::SiteFilters;

/// Bumped whenever the persisted shape changes incompatibly. A saved
/// draft with a different version is treated as absent on load.
pub const DRAFT_SCHEMA_VERSION: u16 = 1;

fn default_schema_version() -> u16 {
    DRAFT_SCHEMA_VERSION
}

fn default_adults() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

/// In-progress booking form state for one staff member on one campground
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingDraft {
    #[serde(default = "default_schema_version")]
    pub schema_version: u16,
    pub campground_id: Uuid,

    // Guest
    pub guest_id: Option<Uuid>,
    #[serde(default)]
    pub address: GuestAddress,

    // Stay
    pub arrival_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub pets: u32,
    pub rig_type: Option<RigType>,
    pub rig_length_ft: Option<u32>,

    // Site selection
    pub site_id: Option<Uuid>,
    pub site_class_id: Option<Uuid>,
    #[serde(default)]
    pub site_locked: bool,

    // Metadata
    pub notes: Option<String>,
    pub referral_source: Option<String>,
    pub stay_reason: Option<String>,
    pub override_reason: Option<String>,

    // Payment
    #[serde(default)]
    pub payment_collection: bool,
    pub payment_amount_cents: Option<i64>,
    pub payment_method: Option<PaymentMethod>,
    pub cash_received_cents: Option<i64>,
    pub payment_notes: Option<String>,
    /// Last total the payment amount was auto-synced to. Lets the sync
    /// rule tell a stale default apart from a manual edit.
    pub synced_total_cents: Option<i64>,

    // Transient availability-filter state, persisted with the draft so a
    // restored session picks up where it left off
    pub guest_search: Option<String>,
    #[serde(default = "default_true")]
    pub available_only: bool,
    pub filter_site_type: Option<SiteType>,
    pub filter_site_class_id: Option<Uuid>,
}

impl BookingDraft {
    /// Fresh draft scoped to a campground
    pub fn new(campground_id: Uuid) -> Self {
        Self {
            schema_version: DRAFT_SCHEMA_VERSION,
            campground_id,
            guest_id: None,
            address: GuestAddress::default(),
            arrival_date: None,
            departure_date: None,
            adults: 1,
            children: 0,
            pets: 0,
            rig_type: None,
            rig_length_ft: None,
            site_id: None,
            site_class_id: None,
            site_locked: false,
            notes: None,
            referral_source: None,
            stay_reason: None,
            override_reason: None,
            payment_collection: false,
            payment_amount_cents: None,
            payment_method: None,
            cash_received_cents: None,
            payment_notes: None,
            synced_total_cents: None,
            guest_search: None,
            available_only: true,
            filter_site_type: None,
            filter_site_class_id: None,
        }
    }

    /// Number of nights, when both dates are set and ordered
    pub fn nights(&self) -> Option<i64> {
        match (self.arrival_date, self.departure_date) {
            (Some(arrival), Some(departure)) if departure > arrival => {
                Some((departure - arrival).num_days())
            }
            _ => None,
        }
    }

    /// Whether anything worth persisting has been entered
    pub fn has_meaningful_input(&self) -> bool {
        self.guest_id.is_some()
            || self.site_id.is_some()
            || self.arrival_date.is_some()
            || self.departure_date.is_some()
            || self.rig_type.is_some()
            || self.payment_collection
            || self.notes.as_deref().map(str::trim).is_some_and(|n| !n.is_empty())
    }

    /// Restore is only offered while neither a guest nor a site is chosen
    pub fn selection_is_empty(&self) -> bool {
        self.guest_id.is_none() && self.site_id.is_none()
    }

    /// Availability filters derived from the draft's filter and rig state
    pub fn site_filters(&self) -> SiteFilters {
        SiteFilters {
            available_only: self.available_only,
            site_type: self.filter_site_type,
            site_class_id: self.filter_site_class_id,
            rig_type: self.rig_type,
            rig_length_ft: self.rig_length_ft,
        }
    }
}

/// Query parameters that seed a fresh draft (deep links from other screens)
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct DraftSeed {
    pub guest_id: Option<Uuid>,
    pub site_id: Option<Uuid>,
    pub arrival_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
}

/// Form section a validation error is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSection {
    Guest,
    Dates,
    Site,
    Payment,
}

impl ValidationSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationSection::Guest => "guest",
            ValidationSection::Dates => "dates",
            ValidationSection::Site => "site",
            ValidationSection::Payment => "payment",
        }
    }
}

impl std::fmt::Display for ValidationSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of the validation gate: section-keyed messages
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ValidationReport {
    pub errors: BTreeMap<String, String>,
    pub is_valid: bool,
}

impl ValidationReport {
    pub fn add(&mut self, section: ValidationSection, message: impl Into<String>) {
        self.errors.insert(section.as_str().to_string(), message.into());
    }

    pub fn finish(mut self) -> Self {
        self.is_valid = self.errors.is_empty();
        self
    }

    pub fn error_for(&self, section: ValidationSection) -> Option<&str> {
        self.errors.get(section.as_str()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RigType;

    #[test]
    fn nights_requires_an_ordered_range() {
        let mut draft = BookingDraft::new(Uuid::new_v4());
        assert_eq!(draft.nights(), None);

        draft.arrival_date = Some("2025-06-01".parse().unwrap());
        draft.departure_date = Some("2025-06-04".parse().unwrap());
        assert_eq!(draft.nights(), Some(3));

        draft.departure_date = draft.arrival_date;
        assert_eq!(draft.nights(), None);
    }

    #[test]
    fn fresh_draft_has_no_meaningful_input() {
        let mut draft = BookingDraft::new(Uuid::new_v4());
        assert!(!draft.has_meaningful_input());
        assert!(draft.selection_is_empty());

        draft.rig_type = Some(RigType::Motorhome);
        assert!(draft.has_meaningful_input());
    }

    #[test]
    fn site_filters_combine_filter_and_rig_state() {
        let mut draft = BookingDraft::new(Uuid::new_v4());
        draft.rig_type = Some(RigType::FifthWheel);
        draft.rig_length_ft = Some(40);
        draft.available_only = false;

        let filters = draft.site_filters();
        assert_eq!(filters.rig_type, Some(RigType::FifthWheel));
        assert_eq!(filters.rig_length_ft, Some(40));
        assert!(!filters.available_only);
    }
}
