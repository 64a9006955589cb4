//! HTTP implementation of the core API client

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use uuid::Uuid;

use crate::{
    config::UpstreamConfig,
    error::{AppError, AppResult},
    models::{
        CreateGuest, Guest, Hold, NewHold, NewReservation, Reservation, ReservationStatus,
        Quote, SiteAvailability, SiteClass, SiteSuggestion, UpdateGuest,
    },
};

use super::CampgroundApi;

#[derive(Clone)]
pub struct HttpCampgroundApi {
    client: Client,
    base_url: String,
}

impl HttpCampgroundApi {
    pub fn new(config: &UpstreamConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a response, surfacing upstream error messages verbatim and
    /// turning unexpected shapes into typed decode errors.
    async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> AppResult<T> {
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to read core API response: {}", e)))?;

        if !status.is_success() {
            return Err(upstream_error(endpoint, status, &bytes));
        }

        serde_json::from_slice(&bytes).map_err(|e| AppError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }

    async fn expect_ok(endpoint: &str, response: Response) -> AppResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let bytes = response.bytes().await.unwrap_or_default();
        Err(upstream_error(endpoint, status, &bytes))
    }

    fn send_error(endpoint: &str, error: reqwest::Error) -> AppError {
        AppError::Upstream(format!("Core API unreachable ({}): {}", endpoint, error))
    }
}

/// Extract the upstream-provided message from an error body, falling back
/// to a generic status line.
fn upstream_error(endpoint: &str, status: StatusCode, body: &[u8]) -> AppError {
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("Core API returned {} for {}", status, endpoint));

    if status == StatusCode::NOT_FOUND {
        AppError::NotFound(message)
    } else {
        AppError::Upstream(message)
    }
}

#[async_trait]
impl CampgroundApi for HttpCampgroundApi {
    async fn get_guests(
        &self,
        campground_id: Uuid,
        search: Option<String>,
    ) -> AppResult<Vec<Guest>> {
        let endpoint = "guests";
        let mut request = self
            .client
            .get(self.url(&format!("/campgrounds/{}/guests", campground_id)));
        if let Some(search) = search {
            request = request.query(&[("search", search)]);
        }
        let response = request
            .send()
            .await
            .map_err(|e| Self::send_error(endpoint, e))?;
        Self::decode(endpoint, response).await
    }

    async fn get_guest(&self, guest_id: Uuid) -> AppResult<Guest> {
        let endpoint = "guest";
        let response = self
            .client
            .get(self.url(&format!("/guests/{}", guest_id)))
            .send()
            .await
            .map_err(|e| Self::send_error(endpoint, e))?;
        Self::decode(endpoint, response).await
    }

    async fn create_guest(&self, campground_id: Uuid, guest: CreateGuest) -> AppResult<Guest> {
        let endpoint = "create_guest";
        let response = self
            .client
            .post(self.url(&format!("/campgrounds/{}/guests", campground_id)))
            .json(&guest)
            .send()
            .await
            .map_err(|e| Self::send_error(endpoint, e))?;
        Self::decode(endpoint, response).await
    }

    async fn update_guest(&self, guest_id: Uuid, update: UpdateGuest) -> AppResult<Guest> {
        let endpoint = "update_guest";
        let response = self
            .client
            .patch(self.url(&format!("/guests/{}", guest_id)))
            .json(&update)
            .send()
            .await
            .map_err(|e| Self::send_error(endpoint, e))?;
        Self::decode(endpoint, response).await
    }

    async fn get_site_classes(&self, campground_id: Uuid) -> AppResult<Vec<SiteClass>> {
        let endpoint = "site_classes";
        let response = self
            .client
            .get(self.url(&format!("/campgrounds/{}/site-classes", campground_id)))
            .send()
            .await
            .map_err(|e| Self::send_error(endpoint, e))?;
        Self::decode(endpoint, response).await
    }

    async fn get_sites_with_status(
        &self,
        campground_id: Uuid,
        arrival_date: NaiveDate,
        departure_date: NaiveDate,
    ) -> AppResult<Vec<SiteAvailability>> {
        let endpoint = "sites_with_status";
        let response = self
            .client
            .get(self.url(&format!("/campgrounds/{}/sites/status", campground_id)))
            .query(&[
                ("arrival_date", arrival_date.to_string()),
                ("departure_date", departure_date.to_string()),
            ])
            .send()
            .await
            .map_err(|e| Self::send_error(endpoint, e))?;
        Self::decode(endpoint, response).await
    }

    async fn get_quote(
        &self,
        campground_id: Uuid,
        site_id: Uuid,
        arrival_date: NaiveDate,
        departure_date: NaiveDate,
    ) -> AppResult<Quote> {
        let endpoint = "quote";
        let response = self
            .client
            .get(self.url(&format!("/campgrounds/{}/quotes", campground_id)))
            .query(&[
                ("site_id", site_id.to_string()),
                ("arrival_date", arrival_date.to_string()),
                ("departure_date", departure_date.to_string()),
            ])
            .send()
            .await
            .map_err(|e| Self::send_error(endpoint, e))?;
        Self::decode(endpoint, response).await
    }

    async fn get_matched_sites(
        &self,
        campground_id: Uuid,
        guest_id: Uuid,
    ) -> AppResult<Vec<SiteSuggestion>> {
        let endpoint = "matched_sites";
        let response = self
            .client
            .get(self.url(&format!("/campgrounds/{}/matched-sites", campground_id)))
            .query(&[("guest_id", guest_id.to_string())])
            .send()
            .await
            .map_err(|e| Self::send_error(endpoint, e))?;
        Self::decode(endpoint, response).await
    }

    async fn create_hold(&self, hold: NewHold) -> AppResult<Hold> {
        let endpoint = "create_hold";
        let response = self
            .client
            .post(self.url("/holds"))
            .json(&hold)
            .send()
            .await
            .map_err(|e| Self::send_error(endpoint, e))?;
        Self::decode(endpoint, response).await
    }

    async fn create_reservation(&self, reservation: NewReservation) -> AppResult<Reservation> {
        let endpoint = "create_reservation";
        let response = self
            .client
            .post(self.url("/reservations"))
            .json(&reservation)
            .send()
            .await
            .map_err(|e| Self::send_error(endpoint, e))?;
        Self::decode(endpoint, response).await
    }

    async fn update_reservation_status(
        &self,
        reservation_id: Uuid,
        status: ReservationStatus,
    ) -> AppResult<Reservation> {
        let endpoint = "update_reservation";
        let response = self
            .client
            .patch(self.url(&format!("/reservations/{}", reservation_id)))
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await
            .map_err(|e| Self::send_error(endpoint, e))?;
        Self::decode(endpoint, response).await
    }

    async fn cancel_reservation(&self, reservation_id: Uuid) -> AppResult<()> {
        let endpoint = "cancel_reservation";
        let response = self
            .client
            .post(self.url(&format!("/reservations/{}/cancel", reservation_id)))
            .send()
            .await
            .map_err(|e| Self::send_error(endpoint, e))?;
        Self::expect_ok(endpoint, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_prefers_server_message() {
        let error = upstream_error(
            "create_reservation",
            StatusCode::CONFLICT,
            br#"{"message":"Site is no longer available"}"#,
        );
        match error {
            AppError::Upstream(message) => assert_eq!(message, "Site is no longer available"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn upstream_error_falls_back_to_status_line() {
        let error = upstream_error("quote", StatusCode::INTERNAL_SERVER_ERROR, b"boom");
        match error {
            AppError::Upstream(message) => {
                assert!(message.contains("500"));
                assert!(message.contains("quote"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
