//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{availability, bookings, drafts, guests, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campreserv Booking Desk API",
        version = "0.3.0",
        description = "Staff-facing booking flow: drafts, availability, pricing and reservation submission"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Drafts
        drafts::get_draft,
        drafts::put_draft,
        drafts::restore_draft,
        drafts::discard_draft,
        // Availability
        availability::list_sites,
        availability::list_suggestions,
        // Guests
        guests::list_guests,
        guests::create_guest,
        // Bookings
        bookings::validate_draft,
        bookings::price_draft,
        bookings::submit,
        bookings::place_hold,
        bookings::payment_completed,
        bookings::payment_abandoned,
    ),
    components(
        schemas(
            // Drafts
            crate::models::BookingDraft,
            crate::models::ValidationReport,
            crate::models::GuestAddress,
            drafts::DraftEnvelope,
            // Sites
            crate::models::SiteAvailability,
            crate::models::SiteClass,
            crate::models::SiteFilters,
            crate::models::SiteSuggestion,
            crate::models::enums::SiteStatus,
            crate::models::enums::SiteType,
            crate::models::enums::RigType,
            // Pricing
            crate::models::Quote,
            crate::models::PriceBreakdown,
            // Guests
            crate::models::Guest,
            crate::models::CreateGuest,
            crate::models::UpdateGuest,
            // Reservations
            crate::models::Reservation,
            crate::models::NewReservation,
            crate::models::Hold,
            crate::models::NewHold,
            crate::models::enums::PaymentMethod,
            crate::models::enums::ReservationStatus,
            bookings::HoldRequest,
            crate::services::booking::SubmissionOutcome,
            crate::services::booking::DeskReceipt,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "drafts", description = "Booking draft lifecycle"),
        (name = "availability", description = "Site availability and suggestions"),
        (name = "guests", description = "Guest lookup and creation"),
        (name = "bookings", description = "Submission, holds and payment callbacks")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
