//! Authenticated staff session claims

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// JWT claims for an authenticated staff member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffClaims {
    pub sub: String,
    pub staff_id: Uuid,
    pub name: String,
    /// Campground this session is scoped to
    pub campground_id: Uuid,
    /// Right to approve booking overrides (lock fees, estimated pricing)
    pub can_approve_overrides: bool,
    pub exp: i64,
    pub iat: i64,
}

impl StaffClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Approver identity for an override, when this session can grant one
    pub fn override_approver(&self) -> Result<Uuid, AppError> {
        if self.can_approve_overrides {
            Ok(self.staff_id)
        } else {
            Err(AppError::OverrideApproval(
                "Override approval required".to_string(),
            ))
        }
    }
}
