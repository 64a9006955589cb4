//! Guest endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::{CreateGuest, Guest},
    AppState,
};

use super::AuthenticatedStaff;

#[derive(Debug, Deserialize, IntoParams)]
pub struct GuestsQuery {
    /// Free-text search over name, email and phone
    pub search: Option<String>,
}

/// List or search guests
#[utoipa::path(
    get,
    path = "/guests",
    tag = "guests",
    security(("bearer_auth" = [])),
    params(GuestsQuery),
    responses(
        (status = 200, description = "Matching guests", body = Vec<Guest>)
    )
)]
pub async fn list_guests(
    State(state): State<AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Query(query): Query<GuestsQuery>,
) -> AppResult<Json<Vec<Guest>>> {
    let guests = state
        .services
        .guests
        .list(claims.campground_id, query.search)
        .await?;
    Ok(Json(guests))
}

/// Create a new guest
#[utoipa::path(
    post,
    path = "/guests",
    tag = "guests",
    security(("bearer_auth" = [])),
    request_body = CreateGuest,
    responses(
        (status = 201, description = "Guest created", body = Guest),
        (status = 400, description = "Invalid guest fields")
    )
)]
pub async fn create_guest(
    State(state): State<AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Json(request): Json<CreateGuest>,
) -> AppResult<(StatusCode, Json<Guest>)> {
    let guest = state
        .services
        .guests
        .create(claims.campground_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(guest)))
}
