//! Site availability endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{RigType, SiteAvailability, SiteFilters, SiteSuggestion, SiteType},
    AppState,
};

use super::AuthenticatedStaff;

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    #[serde(default = "default_true")]
    pub available_only: bool,
    pub site_type: Option<SiteType>,
    pub site_class_id: Option<Uuid>,
    pub rig_type: Option<RigType>,
    pub rig_length_ft: Option<u32>,
}

/// Filtered site list for a date range
#[utoipa::path(
    get,
    path = "/availability",
    tag = "availability",
    security(("bearer_auth" = [])),
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Sites matching the active filters", body = Vec<SiteAvailability>),
        (status = 400, description = "Invalid date range")
    )
)]
pub async fn list_sites(
    State(state): State<AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<Vec<SiteAvailability>>> {
    if query.departure_date <= query.arrival_date {
        return Err(AppError::Validation(
            "Departure date must be after arrival date".to_string(),
        ));
    }

    let filters = SiteFilters {
        available_only: query.available_only,
        site_type: query.site_type,
        site_class_id: query.site_class_id,
        rig_type: query.rig_type,
        rig_length_ft: query.rig_length_ft,
    };

    let sites = state
        .services
        .availability
        .sites_for(
            claims.campground_id,
            query.arrival_date,
            query.departure_date,
            &filters,
        )
        .await?;

    Ok(Json(sites))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SuggestionsQuery {
    pub guest_id: Uuid,
}

/// Advisory guest-to-site matches, ranked by the matching service
#[utoipa::path(
    get,
    path = "/availability/suggestions",
    tag = "availability",
    security(("bearer_auth" = [])),
    params(SuggestionsQuery),
    responses(
        (status = 200, description = "Ranked site suggestions", body = Vec<SiteSuggestion>)
    )
)]
pub async fn list_suggestions(
    State(state): State<AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Query(query): Query<SuggestionsQuery>,
) -> AppResult<Json<Vec<SiteSuggestion>>> {
    let suggestions = state
        .services
        .availability
        .suggestions(claims.campground_id, query.guest_id)
        .await?;

    Ok(Json(suggestions))
}
