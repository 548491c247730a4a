//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use campus_auth::{NewAccount, ProfileUpdate};
use campus_core::error::AppError;

/// Run `validator` rules and convert failures into a validation error.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), AppError> {
    request
        .validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))
}

/// OAuth2 password-grant style login form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Signup request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Email-shaped username.
    #[validate(length(min = 1, max = 255))]
    pub username: String,
    /// Given name.
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, max = 255))]
    pub last_name: String,
    /// Password.
    pub password: String,
}

impl From<SignupRequest> for NewAccount {
    fn from(req: SignupRequest) -> Self {
        Self {
            username: req.username,
            first_name: req.first_name,
            last_name: req.last_name,
            password: req.password,
        }
    }
}

/// Profile update request. Omitted or blank fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// Given name.
    #[validate(length(max = 255))]
    pub first_name: Option<String>,
    /// Family name.
    #[validate(length(max = 255))]
    pub last_name: Option<String>,
    /// New password.
    pub password: Option<String>,
}

impl From<UpdateUserRequest> for ProfileUpdate {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            password: req.password,
        }
    }
}

/// Query string of the activation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveStatusQuery {
    /// Desired activation state.
    pub status: bool,
}
