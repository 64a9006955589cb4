//! Shared domain enums
//!
//! Statuses and types coming from the core API are tagged unions: an
//! unknown wire value is a decode failure at the boundary, never a
//! silently defaulted field.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// SiteStatus
// ---------------------------------------------------------------------------

/// Occupancy status of a site for a given date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SiteStatus {
    Available,
    Booked,
    Held,
    Maintenance,
    Closed,
}

impl SiteStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, SiteStatus::Available)
    }
}

impl std::fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SiteStatus::Available => "available",
            SiteStatus::Booked => "booked",
            SiteStatus::Held => "held",
            SiteStatus::Maintenance => "maintenance",
            SiteStatus::Closed => "closed",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// SiteType
// ---------------------------------------------------------------------------

/// Category of a campground site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SiteType {
    Rv,
    Tent,
    Cabin,
    Glamping,
    Group,
}

impl std::fmt::Display for SiteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SiteType::Rv => "RV",
            SiteType::Tent => "Tent",
            SiteType::Cabin => "Cabin",
            SiteType::Glamping => "Glamping",
            SiteType::Group => "Group",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// RigType
// ---------------------------------------------------------------------------

/// What the guest is arriving with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RigType {
    Motorhome,
    TravelTrailer,
    FifthWheel,
    CamperVan,
    TruckCamper,
    PopUp,
    Tent,
    Cabin,
    Group,
    Other,
}

impl RigType {
    /// Site types this rig can occupy. `None` means no restriction.
    pub fn compatible_site_types(&self) -> Option<&'static [SiteType]> {
        match self {
            RigType::Motorhome
            | RigType::TravelTrailer
            | RigType::FifthWheel
            | RigType::CamperVan
            | RigType::TruckCamper
            | RigType::PopUp => Some(&[SiteType::Rv]),
            RigType::Tent => Some(&[SiteType::Tent]),
            RigType::Cabin => Some(&[SiteType::Cabin, SiteType::Glamping]),
            RigType::Group => Some(&[SiteType::Group]),
            RigType::Other => None,
        }
    }

    /// Whether the rig is an RV sub-type (length ceilings only apply to RVs)
    pub fn is_rv(&self) -> bool {
        self.compatible_site_types()
            .map(|types| types.contains(&SiteType::Rv))
            .unwrap_or(false)
    }
}

// ---------------------------------------------------------------------------
// PaymentMethod
// ---------------------------------------------------------------------------

/// How a payment is being collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Cash,
    Check,
    Folio,
}

impl PaymentMethod {
    /// Cash, check and folio settle at the desk; card settles through the
    /// payment modal after the reservation exists.
    pub fn collected_immediately(&self) -> bool {
        !matches!(self, PaymentMethod::Card)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Check => "check",
            PaymentMethod::Folio => "folio",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ReservationStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", label)
    }
}
