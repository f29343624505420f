use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::special_offer;
use crate::error::AppError;

use super::shared::{double_option, validate_len, validate_optional_len};

fn validate_dates(start: NaiveDate, end: NaiveDate) -> Result<(), AppError> {
    if end < start {
        return Err(AppError::Validation(
            "End date must not be before start date".into(),
        ));
    }
    Ok(())
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateOfferRequest {
    #[schema(example = "Half-price pasta Tuesdays")]
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    #[schema(value_type = String, format = Date, example = "2026-11-01")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2026-11-30")]
    pub end_date: NaiveDate,
}

pub fn validate_create_offer(payload: &CreateOfferRequest) -> Result<(), AppError> {
    validate_len("Title", &payload.title, 1, 100)?;
    validate_len("Description", &payload.description, 1, 5000)?;
    validate_optional_len("Image", payload.image.as_deref(), 0, 500)?;
    validate_dates(payload.start_date, payload.end_date)
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateOfferRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

/// Checks field shapes and, combined with the stored dates, date ordering.
pub fn validate_update_offer(
    payload: &UpdateOfferRequest,
    current: &special_offer::Model,
) -> Result<(), AppError> {
    validate_optional_len("Title", payload.title.as_deref(), 1, 100)?;
    validate_optional_len("Description", payload.description.as_deref(), 1, 5000)?;
    validate_optional_len(
        "Image",
        payload.image.as_ref().and_then(|i| i.as_deref()),
        0,
        500,
    )?;
    validate_dates(
        payload.start_date.unwrap_or(current.start_date),
        payload.end_date.unwrap_or(current.end_date),
    )
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct OfferResponse {
    #[schema(example = 3)]
    pub id: i32,
    pub restaurant_id: i32,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<special_offer::Model> for OfferResponse {
    fn from(m: special_offer::Model) -> Self {
        Self {
            id: m.id,
            restaurant_id: m.restaurant_id,
            title: m.title,
            description: m.description,
            image: m.image,
            start_date: m.start_date,
            end_date: m.end_date,
            is_active: m.is_active,
            created_at: m.created_at,
        }
    }
}
