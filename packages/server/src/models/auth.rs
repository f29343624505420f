use ladle_common::{AccountKind, HomeView};
use serde::{Deserialize, Serialize};

use crate::entity::account;
use crate::error::AppError;

use super::shared::{validate_email, validate_len, validate_optional_len, validate_username};

/// Request body for registering a plain account.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterUserRequest {
    /// Unique username (1-150 chars: letters, digits and `@ . + - _`).
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Password (8-128 characters).
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
    /// Must equal `password`.
    #[schema(example = "s3cure_P@ss!")]
    pub password_confirm: String,
    /// First token becomes the first name, the rest the last name.
    #[schema(example = "Alice Waters")]
    pub full_name: Option<String>,
}

/// Request body for registering a restaurant. The account starts unapproved.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRestaurantRequest {
    #[schema(example = "chez_panisse")]
    pub username: String,
    #[schema(example = "hello@chezpanisse.example")]
    pub email: String,
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
    #[schema(example = "s3cure_P@ss!")]
    pub password_confirm: String,
    #[schema(example = "Chez Panisse")]
    pub restaurant_name: String,
    #[schema(example = "1517 Shattuck Ave, Berkeley")]
    pub restaurant_location: String,
}

fn validate_credentials(
    username: &str,
    email: &str,
    password: &str,
    password_confirm: &str,
) -> Result<(), AppError> {
    validate_username(username)?;
    validate_email(email)?;
    if password.len() < 8 || password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be 8-128 characters".into(),
        ));
    }
    if password != password_confirm {
        return Err(AppError::InvalidOperation("Passwords do not match".into()));
    }
    Ok(())
}

pub fn validate_register_user(payload: &RegisterUserRequest) -> Result<(), AppError> {
    validate_credentials(
        &payload.username,
        &payload.email,
        &payload.password,
        &payload.password_confirm,
    )?;
    validate_optional_len("Full name", payload.full_name.as_deref(), 0, 301)
}

pub fn validate_register_restaurant(payload: &RegisterRestaurantRequest) -> Result<(), AppError> {
    validate_credentials(
        &payload.username,
        &payload.email,
        &payload.password,
        &payload.password_confirm,
    )?;
    validate_len("Restaurant name", &payload.restaurant_name, 1, 200)?;
    validate_len("Restaurant location", &payload.restaurant_location, 1, 300)
}

/// Request body for login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("Username must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Successful registration response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "alice")]
    pub username: String,
    pub kind: AccountKind,
    /// Always `false` for new restaurants. Plain accounts never need approval.
    pub is_approved: bool,
}

impl From<account::Model> for RegisterResponse {
    fn from(m: account::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            kind: m.kind,
            is_approved: m.is_approved,
        }
    }
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "alice")]
    pub username: String,
    pub kind: AccountKind,
    pub is_admin: bool,
    /// Where the client should land after logging in.
    pub home: HomeView,
}

/// Current authenticated account.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "alice")]
    pub username: String,
    pub display_name: String,
    pub kind: AccountKind,
    pub is_admin: bool,
    pub is_approved: bool,
    pub home: HomeView,
}

impl From<&account::Model> for MeResponse {
    fn from(m: &account::Model) -> Self {
        Self {
            id: m.id,
            username: m.username.clone(),
            display_name: m.display_name(),
            kind: m.kind,
            is_admin: m.is_admin,
            is_approved: m.is_approved,
            home: m.kind.home(m.is_admin),
        }
    }
}
