//! Typed client for the Campreserv core API
//!
//! The booking desk owns no durable entities itself; guests, sites,
//! quotes, reservations and holds live behind the platform core API.
//! Handlers and services depend on the [`CampgroundApi`] trait so the
//! orchestration logic can be exercised against a mock.

pub mod http;

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        CreateGuest, Guest, Hold, NewHold, NewReservation, Reservation, ReservationStatus,
        Quote, SiteAvailability, SiteClass, SiteSuggestion, UpdateGuest,
    },
};

pub use http::HttpCampgroundApi;

/// Core API surface used by the booking flow
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampgroundApi: Send + Sync {
    async fn get_guests(
        &self,
        campground_id: Uuid,
        search: Option<String>,
    ) -> AppResult<Vec<Guest>>;

    async fn get_guest(&self, guest_id: Uuid) -> AppResult<Guest>;

    async fn create_guest(&self, campground_id: Uuid, guest: CreateGuest) -> AppResult<Guest>;

    async fn update_guest(&self, guest_id: Uuid, update: UpdateGuest) -> AppResult<Guest>;

    async fn get_site_classes(&self, campground_id: Uuid) -> AppResult<Vec<SiteClass>>;

    async fn get_sites_with_status(
        &self,
        campground_id: Uuid,
        arrival_date: NaiveDate,
        departure_date: NaiveDate,
    ) -> AppResult<Vec<SiteAvailability>>;

    async fn get_quote(
        &self,
        campground_id: Uuid,
        site_id: Uuid,
        arrival_date: NaiveDate,
        departure_date: NaiveDate,
    ) -> AppResult<Quote>;

    async fn get_matched_sites(
        &self,
        campground_id: Uuid,
        guest_id: Uuid,
    ) -> AppResult<Vec<SiteSuggestion>>;

    async fn create_hold(&self, hold: NewHold) -> AppResult<Hold>;

    async fn create_reservation(&self, reservation: NewReservation) -> AppResult<Reservation>;

    async fn update_reservation_status(
        &self,
        reservation_id: Uuid,
        status: ReservationStatus,
    ) -> AppResult<Reservation>;

    async fn cancel_reservation(&self, reservation_id: Uuid) -> AppResult<()>;
}

/// Shared handle to the core API client
pub type DynCampgroundApi = Arc<dyn CampgroundApi>;
