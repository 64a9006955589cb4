//! Reservation and hold models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::{PaymentMethod, ReservationStatus, RigType};

/// Reservation entity from the core API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Reservation {
    pub id: Uuid,
    pub campground_id: Uuid,
    pub guest_id: Uuid,
    pub site_id: Uuid,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    pub status: ReservationStatus,
    pub total_amount_cents: i64,
    pub paid_amount_cents: i64,
    pub balance_amount_cents: i64,
}

/// Reservation creation payload sent to the core API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewReservation {
    pub campground_id: Uuid,
    pub guest_id: Uuid,
    pub site_id: Uuid,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub pets: u32,
    pub rig_type: Option<RigType>,
    pub rig_length_ft: Option<u32>,
    pub notes: Option<String>,
    pub referral_source: Option<String>,
    pub stay_reason: Option<String>,
    pub total_amount_cents: i64,
    pub paid_amount_cents: i64,
    pub balance_amount_cents: i64,
    pub status: ReservationStatus,
    pub payment_method: Option<PaymentMethod>,
    pub payment_notes: Option<String>,
    pub site_locked: bool,
    pub override_reason: Option<String>,
    pub override_approved_by: Option<Uuid>,
}

/// Temporary hold on a site prior to full booking
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Hold {
    pub id: Uuid,
    pub site_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Hold placement request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewHold {
    pub campground_id: Uuid,
    pub site_id: Uuid,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    pub hold_minutes: u32,
}
