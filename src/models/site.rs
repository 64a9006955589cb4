//! Site and site-class models

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::enums::{RigType, SiteStatus, SiteType};

/// Site class as configured on the campground
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SiteClass {
    pub id: Uuid,
    pub name: String,
    /// Nightly rate fallback for sites of this class
    pub default_rate_cents: Option<i64>,
    /// Class-wide rig length ceiling in feet
    pub rig_max_length_ft: Option<u32>,
}

/// Per-site availability record for a date range, as returned by the core API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SiteAvailability {
    pub id: Uuid,
    pub name: String,
    pub number: String,
    pub site_type: SiteType,
    pub class_id: Option<Uuid>,
    pub class_name: Option<String>,
    pub status: SiteStatus,
    /// Site-specific nightly rate, overriding the class rate
    pub default_rate_cents: Option<i64>,
    /// Site-specific rig length ceiling, overriding the class ceiling
    pub rig_max_length_ft: Option<u32>,
}

/// Advisory site match for a guest, ranked by the matching service
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SiteSuggestion {
    pub site: SiteAvailability,
    /// Match score 0-100
    pub score: u8,
    pub reasons: Vec<String>,
}

/// Filter state applied to the availability list
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct SiteFilters {
    /// Drop sites that are not available for the date range
    #[serde(default)]
    pub available_only: bool,
    pub site_type: Option<SiteType>,
    pub site_class_id: Option<Uuid>,
    pub rig_type: Option<RigType>,
    pub rig_length_ft: Option<u32>,
}
