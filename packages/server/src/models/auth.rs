use common::{GeoPoint, Role};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::shared::require_non_empty;

/// Request body for user registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Display name.
    #[schema(example = "Alice")]
    pub name: String,
    /// Unique login email.
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Plaintext password, stored only as an Argon2 hash.
    pub password: String,
    #[schema(example = "+91 98765 43210")]
    pub phone: String,
    /// Either `donor` or `volunteer`.
    pub role: Role,
    pub address: String,
    pub location: GeoPoint,
}

pub fn validate_register_request(payload: &RegisterRequest) -> Result<(), AppError> {
    require_non_empty(&payload.name, "name")?;
    require_non_empty(&payload.email, "email")?;
    require_non_empty(&payload.password, "password")?;
    require_non_empty(&payload.phone, "phone")?;
    require_non_empty(&payload.address, "address")?;
    if !payload.location.is_valid() {
        return Err(AppError::Validation("Valid location is required".into()));
    }
    Ok(())
}

/// Request body for login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice@example.com")]
    pub email: String,
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    require_non_empty(&payload.email, "email")?;
    require_non_empty(&payload.password, "password")?;
    Ok(())
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token.
    pub access_token: String,
    /// Role claim carried in the token.
    pub role: Role,
    /// Display name of the authenticated user.
    #[schema(example = "Alice")]
    pub name: String,
}
