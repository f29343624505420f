use chrono::{DateTime, Utc};
use ladle_common::AccountKind;
use serde::{Deserialize, Serialize};

use crate::entity::account;
use crate::error::AppError;

use super::offer::OfferResponse;
use super::recipe::RecipeSummary;
use super::shared::{double_option, validate_email, validate_optional_len, validate_username};

/// Compact account reference embedded in other responses.
#[derive(Serialize, Clone, utoipa::ToSchema)]
pub struct AccountSummary {
    #[schema(example = 7)]
    pub id: i32,
    #[schema(example = "alice")]
    pub username: String,
    /// Restaurant name, else full name, else username.
    #[schema(example = "Alice Waters")]
    pub display_name: String,
    pub kind: AccountKind,
    pub profile_picture: Option<String>,
}

impl From<&account::Model> for AccountSummary {
    fn from(m: &account::Model) -> Self {
        Self {
            id: m.id,
            username: m.username.clone(),
            display_name: m.display_name(),
            kind: m.kind,
            profile_picture: m.profile_picture.clone(),
        }
    }
}

/// Public account details. Email is never included.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AccountDetail {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub kind: AccountKind,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
    pub restaurant_name: Option<String>,
    pub restaurant_location: Option<String>,
    pub contact_number: Option<String>,
    pub opening_hours: Option<String>,
    /// Present for restaurants only.
    pub is_approved: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl From<&account::Model> for AccountDetail {
    fn from(m: &account::Model) -> Self {
        Self {
            id: m.id,
            username: m.username.clone(),
            display_name: m.display_name(),
            kind: m.kind,
            first_name: m.first_name.clone(),
            last_name: m.last_name.clone(),
            bio: m.bio.clone(),
            profile_picture: m.profile_picture.clone(),
            restaurant_name: m.restaurant_name.clone(),
            restaurant_location: m.restaurant_location.clone(),
            contact_number: m.contact_number.clone(),
            opening_hours: m.opening_hours.clone(),
            is_approved: m.kind.is_restaurant().then_some(m.is_approved),
            created_at: m.created_at,
        }
    }
}

/// The caller's own profile.
#[derive(Serialize, utoipa::ToSchema)]
pub struct OwnProfileResponse {
    pub account: AccountDetail,
    #[schema(example = "alice@example.com")]
    pub email: String,
    pub recipes: Vec<RecipeSummary>,
    pub follower_count: u64,
    pub following_count: u64,
}

/// Another account's profile as seen by the caller.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PublicProfileResponse {
    pub account: AccountDetail,
    pub recipes: Vec<RecipeSummary>,
    pub follower_count: u64,
    pub following_count: u64,
    /// Whether the caller follows this account.
    pub is_following: bool,
    /// Active offers. Always empty for plain accounts.
    pub offers: Vec<OfferResponse>,
}

/// PATCH body for a plain account's profile.
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateProfileRequest {
    /// Split on whitespace into first and last name.
    #[schema(example = "Alice Waters")]
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub profile_picture: Option<Option<String>>,
}

pub fn validate_update_profile(payload: &UpdateProfileRequest) -> Result<(), AppError> {
    if let Some(ref username) = payload.username {
        validate_username(username)?;
    }
    if let Some(ref email) = payload.email {
        validate_email(email)?;
    }
    validate_optional_len("Full name", payload.full_name.as_deref(), 0, 301)?;
    validate_optional_len("Bio", payload.bio.as_ref().and_then(|b| b.as_deref()), 0, 2000)?;
    validate_optional_len(
        "Profile picture",
        payload.profile_picture.as_ref().and_then(|p| p.as_deref()),
        0,
        500,
    )?;
    Ok(())
}

/// PATCH body for a restaurant's profile.
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateRestaurantProfileRequest {
    #[schema(example = "Chez Panisse")]
    pub restaurant_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub restaurant_location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub contact_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, example = "Tue-Sun 17:00-22:00")]
    pub opening_hours: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub profile_picture: Option<Option<String>>,
}

pub fn validate_update_restaurant_profile(
    payload: &UpdateRestaurantProfileRequest,
) -> Result<(), AppError> {
    validate_optional_len("Restaurant name", payload.restaurant_name.as_deref(), 1, 200)?;
    let nested = [
        ("Restaurant location", &payload.restaurant_location, 300),
        ("Bio", &payload.bio, 2000),
        ("Contact number", &payload.contact_number, 20),
        ("Opening hours", &payload.opening_hours, 200),
        ("Profile picture", &payload.profile_picture, 500),
    ];
    for (field, value, max) in nested {
        validate_optional_len(field, value.as_ref().and_then(|v| v.as_deref()), 0, max)?;
    }
    Ok(())
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct AccountSearchQuery {
    /// Case-insensitive substring of a username or first name.
    #[param(example = "ali")]
    pub q: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AccountSearchResponse {
    pub results: Vec<AccountSummary>,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct QuickSearchQuery {
    /// A leading `#` searches tags instead of accounts.
    #[param(example = "#pasta")]
    pub query: Option<String>,
}

#[derive(Serialize, Default, utoipa::ToSchema)]
pub struct QuickSearchResponse {
    pub users: Vec<AccountSummary>,
    #[schema(example = json!(["pasta", "pastry"]))]
    pub tags: Vec<String>,
}
