use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::special_offer;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::offer::*;
use crate::models::shared::non_blank;
use crate::state::AppState;

async fn find_offer<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<special_offer::Model, AppError> {
    special_offer::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Offer not found".into()))
}

#[utoipa::path(
    post,
    path = "/offers",
    tag = "Offers",
    operation_id = "createOffer",
    summary = "Publish a special offer",
    description = "Restaurant accounts only. Offers from restaurants still awaiting approval are stored but never reach any feed.",
    request_body = CreateOfferRequest,
    responses(
        (status = 201, description = "Offer created", body = OfferResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not a restaurant (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(account_id = auth_user.account_id, title = %payload.title))]
pub async fn create_offer(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateOfferRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_restaurant()?;
    validate_create_offer(&payload)?;
    let owner = auth_user.account(&state.db).await?;

    let model = special_offer::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description.trim().to_string()),
        image: Set(non_blank(payload.image)),
        start_date: Set(payload.start_date),
        end_date: Set(payload.end_date),
        is_active: Set(true),
        restaurant_id: Set(owner.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(OfferResponse::from(model))))
}

#[utoipa::path(
    patch,
    path = "/offers/{id}",
    tag = "Offers",
    operation_id = "updateOffer",
    summary = "Edit a special offer",
    description = "Owning restaurant only.",
    params(("id" = i32, Path, description = "Offer ID")),
    request_body = UpdateOfferRequest,
    responses(
        (status = 200, description = "Offer updated", body = OfferResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Offer not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_offer(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateOfferRequest>,
) -> Result<Json<OfferResponse>, AppError> {
    let existing = find_offer(&state.db, id).await?;
    if existing.restaurant_id != auth_user.account_id {
        return Err(AppError::PermissionDenied);
    }
    validate_update_offer(&payload, &existing)?;

    let mut active: special_offer::ActiveModel = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description.trim().to_string());
    }
    if let Some(image) = payload.image {
        active.image = Set(non_blank(image));
    }
    if let Some(start_date) = payload.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(end_date) = payload.end_date {
        active.end_date = Set(end_date);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }

    let model = active.update(&state.db).await?;
    Ok(Json(OfferResponse::from(model)))
}

#[utoipa::path(
    get,
    path = "/promotions/{id}",
    tag = "Offers",
    operation_id = "getPromotion",
    summary = "Special offer detail",
    description = "Deactivated offers are reported as not found.",
    params(("id" = i32, Path, description = "Offer ID")),
    responses(
        (status = 200, description = "Offer", body = OfferResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Offer not found or inactive (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id))]
pub async fn get_promotion(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OfferResponse>, AppError> {
    let offer = find_offer(&state.db, id).await?;
    if !offer.is_active {
        return Err(AppError::NotFound("Offer not found".into()));
    }
    Ok(Json(OfferResponse::from(offer)))
}
