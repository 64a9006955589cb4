//! Booking draft endpoints
//!
//! Every mutation goes through the same derived-state pass: normalize,
//! price, sync the default payment amount, validate. The envelope returns
//! all of it so the desk renders from one response.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{draft::DraftSeed, BookingDraft, PriceBreakdown, ValidationReport},
    services::{drafts, validation},
    AppState,
};

use super::AuthenticatedStaff;

/// Draft plus its derived state
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DraftEnvelope {
    pub draft: BookingDraft,
    /// A previously saved draft exists and restore should be offered
    pub saved_draft_available: bool,
    pub pricing: PriceBreakdown,
    pub validation: ValidationReport,
}

/// Run the derived-state pass over a draft and build the envelope
async fn derive(
    state: &AppState,
    mut draft: BookingDraft,
    saved_draft_available: bool,
) -> AppResult<DraftEnvelope> {
    let (pricing, _site) = state.services.pricing.price_draft(&draft).await?;
    drafts::sync_payment_amount(&mut draft, pricing.total_cents);
    let validation = validation::validate(&draft);

    Ok(DraftEnvelope {
        draft,
        saved_draft_available,
        pricing,
        validation,
    })
}

/// Get a working draft, optionally seeded from query parameters
#[utoipa::path(
    get,
    path = "/bookings/draft",
    tag = "drafts",
    security(("bearer_auth" = [])),
    params(DraftSeed),
    responses(
        (status = 200, description = "Working draft with derived state", body = DraftEnvelope)
    )
)]
pub async fn get_draft(
    State(state): State<AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Query(seed): Query<DraftSeed>,
) -> AppResult<Json<DraftEnvelope>> {
    let working = state.services.drafts.seeded(claims.campground_id, &seed);

    let saved = state
        .services
        .drafts
        .saved_draft(claims.campground_id, claims.staff_id)
        .await?;
    let saved_draft_available = saved.is_some() && working.selection_is_empty();

    Ok(Json(derive(&state, working, saved_draft_available).await?))
}

/// Apply a draft mutation and persist the result
#[utoipa::path(
    put,
    path = "/bookings/draft",
    tag = "drafts",
    security(("bearer_auth" = [])),
    request_body = BookingDraft,
    responses(
        (status = 200, description = "Normalized draft with derived state", body = DraftEnvelope)
    )
)]
pub async fn put_draft(
    State(state): State<AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Json(mut draft): Json<BookingDraft>,
) -> AppResult<Json<DraftEnvelope>> {
    draft.campground_id = claims.campground_id;
    drafts::normalize(&mut draft);

    let envelope = derive(&state, draft, false).await?;
    state
        .services
        .drafts
        .persist_background(claims.staff_id, &envelope.draft);

    Ok(Json(envelope))
}

/// Merge the saved draft into the current one
#[utoipa::path(
    post,
    path = "/bookings/draft/restore",
    tag = "drafts",
    security(("bearer_auth" = [])),
    request_body = BookingDraft,
    responses(
        (status = 200, description = "Merged draft with derived state", body = DraftEnvelope),
        (status = 404, description = "No saved draft to restore")
    )
)]
pub async fn restore_draft(
    State(state): State<AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Json(mut current): Json<BookingDraft>,
) -> AppResult<Json<DraftEnvelope>> {
    current.campground_id = claims.campground_id;
    drafts::normalize(&mut current);

    let saved = state
        .services
        .drafts
        .saved_draft(claims.campground_id, claims.staff_id)
        .await?
        .ok_or_else(|| crate::error::AppError::NotFound("No saved draft".to_string()))?;

    let merged = drafts::merge_saved(&current, saved);

    let envelope = derive(&state, merged, false).await?;
    state
        .services
        .drafts
        .persist_background(claims.staff_id, &envelope.draft);

    Ok(Json(envelope))
}

/// Discard the saved draft (declined restore or "start fresh")
#[utoipa::path(
    delete,
    path = "/bookings/draft",
    tag = "drafts",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Saved draft cleared")
    )
)]
pub async fn discard_draft(
    State(state): State<AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
) -> AppResult<StatusCode> {
    state
        .services
        .drafts
        .clear(claims.campground_id, claims.staff_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
