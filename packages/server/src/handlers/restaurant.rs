use axum::Json;
use axum::extract::State;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{account, special_offer};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::account::{
    AccountDetail, UpdateRestaurantProfileRequest, validate_update_restaurant_profile,
};
use crate::models::admin::RestaurantDashboardResponse;
use crate::models::offer::OfferResponse;
use crate::models::shared::non_blank;
use crate::social::approval::require_approved_restaurant;
use crate::social::notification::NotificationService;
use crate::social::recipes;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/restaurant/dashboard",
    tag = "Restaurants",
    operation_id = "getRestaurantDashboard",
    summary = "Restaurant workspace",
    description = "Approved restaurants only. Pending restaurants receive `RESTAURANT_NOT_APPROVED`.",
    responses(
        (status = 200, description = "Dashboard", body = RestaurantDashboardResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not a restaurant (PERMISSION_DENIED) or awaiting approval (RESTAURANT_NOT_APPROVED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(account_id = auth_user.account_id))]
pub async fn get_dashboard(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<RestaurantDashboardResponse>, AppError> {
    let me = auth_user.account(&state.db).await?;
    require_approved_restaurant(&me)?;

    let authored = recipes::by_author(&state.db, me.id).await?;
    let offers = special_offer::Entity::find()
        .filter(special_offer::Column::RestaurantId.eq(me.id))
        .order_by_desc(special_offer::Column::StartDate)
        .order_by_desc(special_offer::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(RestaurantDashboardResponse {
        account: AccountDetail::from(&me),
        recipes: recipes::summarize(&state.db, authored).await?,
        offers: offers.into_iter().map(OfferResponse::from).collect(),
        unread_notifications: NotificationService::new(&state.db)
            .unread_count(me.id)
            .await?,
    }))
}

#[utoipa::path(
    patch,
    path = "/restaurant/profile",
    tag = "Restaurants",
    operation_id = "updateRestaurantProfile",
    summary = "Edit a restaurant's profile",
    description = "Restaurant accounts only. Approval is not required.",
    request_body = UpdateRestaurantProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = AccountDetail),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not a restaurant (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(account_id = auth_user.account_id))]
pub async fn update_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateRestaurantProfileRequest>,
) -> Result<Json<AccountDetail>, AppError> {
    auth_user.require_restaurant()?;
    validate_update_restaurant_profile(&payload)?;

    let me = auth_user.account(&state.db).await?;
    let mut active: account::ActiveModel = me.into();
    if let Some(name) = payload.restaurant_name {
        active.restaurant_name = Set(Some(name.trim().to_string()));
    }
    if let Some(location) = payload.restaurant_location {
        active.restaurant_location = Set(non_blank(location));
    }
    if let Some(bio) = payload.bio {
        active.bio = Set(non_blank(bio));
    }
    if let Some(contact) = payload.contact_number {
        active.contact_number = Set(non_blank(contact));
    }
    if let Some(hours) = payload.opening_hours {
        active.opening_hours = Set(non_blank(hours));
    }
    if let Some(picture) = payload.profile_picture {
        active.profile_picture = Set(non_blank(picture));
    }

    let updated = active.update(&state.db).await?;
    Ok(Json(AccountDetail::from(&updated)))
}
