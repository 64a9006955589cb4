//! Booking submission, pricing, holds and payment callbacks

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{BookingDraft, Hold, PriceBreakdown, Reservation, ValidationReport},
    services::{booking::SubmissionOutcome, drafts, validation},
    AppState,
};

use super::AuthenticatedStaff;

/// Run the validation gate without submitting
#[utoipa::path(
    post,
    path = "/bookings/validate",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = BookingDraft,
    responses(
        (status = 200, description = "Section-keyed validation result", body = ValidationReport)
    )
)]
pub async fn validate_draft(
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Json(mut draft): Json<BookingDraft>,
) -> AppResult<Json<ValidationReport>> {
    draft.campground_id = claims.campground_id;
    drafts::normalize(&mut draft);
    Ok(Json(validation::validate(&draft)))
}

/// Price the draft's current selection
#[utoipa::path(
    post,
    path = "/bookings/pricing",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = BookingDraft,
    responses(
        (status = 200, description = "Quote or estimate for the selection", body = PriceBreakdown)
    )
)]
pub async fn price_draft(
    State(state): State<AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Json(mut draft): Json<BookingDraft>,
) -> AppResult<Json<PriceBreakdown>> {
    draft.campground_id = claims.campground_id;
    drafts::normalize(&mut draft);
    let (breakdown, _site) = state.services.pricing.price_draft(&draft).await?;
    Ok(Json(breakdown))
}

/// Submit the draft as a reservation
#[utoipa::path(
    post,
    path = "/bookings/submit",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = BookingDraft,
    responses(
        (status = 201, description = "Reservation created", body = SubmissionOutcome),
        (status = 409, description = "Override approval required"),
        (status = 422, description = "Draft failed validation"),
        (status = 502, description = "Core API rejected the reservation")
    )
)]
pub async fn submit(
    State(state): State<AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Json(mut draft): Json<BookingDraft>,
) -> AppResult<(StatusCode, Json<SubmissionOutcome>)> {
    draft.campground_id = claims.campground_id;
    drafts::normalize(&mut draft);

    let outcome = state.services.booking.submit(draft, &claims).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct HoldRequest {
    pub site_id: Uuid,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
}

/// Place a temporary hold on a site
#[utoipa::path(
    post,
    path = "/bookings/hold",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = HoldRequest,
    responses(
        (status = 201, description = "Hold placed", body = Hold)
    )
)]
pub async fn place_hold(
    State(state): State<AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Json(request): Json<HoldRequest>,
) -> AppResult<(StatusCode, Json<Hold>)> {
    let hold = state
        .services
        .booking
        .place_hold(
            &claims,
            request.site_id,
            request.arrival_date,
            request.departure_date,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(hold)))
}

/// Card payment completed: confirm the reservation
#[utoipa::path(
    post,
    path = "/reservations/{id}/payment-completed",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Reservation ID")
    ),
    responses(
        (status = 200, description = "Reservation confirmed", body = Reservation)
    )
)]
pub async fn payment_completed(
    State(state): State<AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(reservation_id): Path<Uuid>,
) -> AppResult<Json<Reservation>> {
    let reservation = state
        .services
        .booking
        .complete_card_payment(reservation_id)
        .await?;
    Ok(Json(reservation))
}

/// Card payment abandoned: best-effort cancel of the reservation
#[utoipa::path(
    post,
    path = "/reservations/{id}/payment-abandoned",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Reservation ID")
    ),
    responses(
        (status = 204, description = "Cancellation attempted")
    )
)]
pub async fn payment_abandoned(
    State(state): State<AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(reservation_id): Path<Uuid>,
) -> StatusCode {
    state
        .services
        .booking
        .abandon_card_payment(reservation_id)
        .await;
    StatusCode::NO_CONTENT
}
