//! Business logic services

pub mod availability;
pub mod booking;
pub mod drafts;
pub mod guests;
pub mod pricing;
pub mod validation;

use crate::{
    config::BookingsConfig,
    store::{DynDeadLetterSink, DynDraftStore},
    upstream::DynCampgroundApi,
};

/// Container for all services
pub struct Services {
    pub drafts: drafts::DraftService,
    pub availability: availability::AvailabilityService,
    pub pricing: pricing::PricingService,
    pub guests: guests::GuestService,
    pub booking: booking::BookingService,
}

impl Services {
    /// Create all services around the core API client and the
    /// persistence ports
    pub fn new(
        api: DynCampgroundApi,
        draft_store: DynDraftStore,
        dead_letters: DynDeadLetterSink,
        bookings: &BookingsConfig,
    ) -> Self {
        let drafts = drafts::DraftService::new(draft_store);
        let pricing = pricing::PricingService::new(api.clone(), bookings.site_lock_fee_cents);
        Self {
            drafts: drafts.clone(),
            availability: availability::AvailabilityService::new(api.clone()),
            guests: guests::GuestService::new(api.clone()),
            booking: booking::BookingService::new(
                api,
                drafts,
                pricing.clone(),
                dead_letters,
                bookings.default_hold_minutes,
            ),
            pricing,
        }
    }
}
