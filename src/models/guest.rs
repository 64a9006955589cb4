//! Guest models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Mailing address attached to a guest record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GuestAddress {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

impl GuestAddress {
    /// True when no address field carries a value
    pub fn is_empty(&self) -> bool {
        fn blank(field: &Option<String>) -> bool {
            field.as_deref().map(str::trim).unwrap_or("").is_empty()
        }
        blank(&self.line1)
            && blank(&self.line2)
            && blank(&self.city)
            && blank(&self.state)
            && blank(&self.postal_code)
    }
}

/// Guest entity from the core API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Guest {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub address: GuestAddress,
}

impl Guest {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// New guest request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateGuest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub address: GuestAddress,
}

/// Guest update written back at submission time when address fields changed
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateGuest {
    pub address: GuestAddress,
}
