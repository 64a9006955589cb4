//! Data models for the booking desk

pub mod draft;
pub mod enums;
pub mod guest;
pub mod quote;
pub mod reservation;
pub mod session;
pub mod site;

// Re-export commonly used types
pub use draft::{BookingDraft, ValidationReport, ValidationSection, DRAFT_SCHEMA_VERSION};
pub use enums::{PaymentMethod, ReservationStatus, RigType, SiteStatus, SiteType};
pub use guest::{CreateGuest, Guest, GuestAddress, UpdateGuest};
pub use quote::{PriceBreakdown, Quote};
pub use reservation::{Hold, NewHold, NewReservation, Reservation};
pub use session::StaffClaims;
pub use site::{SiteAvailability, SiteClass, SiteFilters, SiteSuggestion};
