//! Guest lookup and creation passthrough

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{CreateGuest, Guest},
    upstream::DynCampgroundApi,
};

pub struct GuestService {
    api: DynCampgroundApi,
}

impl GuestService {
    pub fn new(api: DynCampgroundApi) -> Self {
        Self { api }
    }

    /// List or search guests. A failed read degrades to an empty list.
    pub async fn list(
        &self,
        campground_id: Uuid,
        search: Option<String>,
    ) -> AppResult<Vec<Guest>> {
        let search = search.filter(|s| !s.trim().is_empty());
        match self.api.get_guests(campground_id, search).await {
            Ok(guests) => Ok(guests),
            Err(e) => {
                tracing::warn!("Failed to fetch guests: {}", e);
                Ok(Vec::new())
            }
        }
    }

    pub async fn create(&self, campground_id: Uuid, guest: CreateGuest) -> AppResult<Guest> {
        guest
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.api.create_guest(campground_id, guest).await
    }
}
