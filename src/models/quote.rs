//! Quote and price breakdown models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Server-computed price breakdown for a site and date range
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Quote {
    pub base_subtotal_cents: i64,
    /// Discounts (negative) or surcharges (positive) from pricing rules
    pub rules_delta_cents: i64,
    pub total_cents: i64,
}

/// Price shown to the desk: either confirmed quote figures or a local
/// rate-times-nights estimate when the quote is unavailable.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PriceBreakdown {
    pub subtotal_cents: Option<i64>,
    /// Not computed in estimate mode
    pub rules_delta_cents: Option<i64>,
    /// Includes the site-lock fee when one applies. `None` when no rate
    /// could be derived for the selection.
    pub total_cents: Option<i64>,
    pub lock_fee_cents: i64,
    pub is_estimate: bool,
}

impl PriceBreakdown {
    /// Breakdown for an incomplete selection: nothing derivable yet.
    pub fn unavailable(lock_fee_cents: i64) -> Self {
        Self {
            subtotal_cents: None,
            rules_delta_cents: None,
            total_cents: None,
            lock_fee_cents,
            is_estimate: true,
        }
    }
}
