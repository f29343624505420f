use axum::Json;
use axum::extract::{Path, State};
use ladle_common::FollowStatus;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::account::AccountSummary;
use crate::models::offer::OfferResponse;
use crate::models::social::{ExploreResponse, FeedResponse, FollowResponse};
use crate::social::feed::FeedService;
use crate::social::follow::FollowService;
use crate::social::recipes;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/follow/{id}",
    tag = "Social",
    operation_id = "toggleFollow",
    summary = "Follow or unfollow an account",
    description = "Flips the follow edge from the caller to the account. A new follow notifies the followed account.",
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "New follow state", body = FollowResponse),
        (status = 400, description = "Following yourself (INVALID_OPERATION)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Account not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id, account_id = auth_user.account_id))]
pub async fn toggle_follow(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FollowResponse>, AppError> {
    let actor = auth_user.account(&state.db).await?;
    let status = FollowService::new(&state.db)
        .follow(actor.id, id)
        .await?;
    Ok(Json(FollowResponse { status }))
}

#[utoipa::path(
    post,
    path = "/unfollow/{id}",
    tag = "Social",
    operation_id = "unfollow",
    summary = "Stop following an account",
    description = "Removes the follow edge if it exists. Never creates one.",
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Not following", body = FollowResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Account not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id, account_id = auth_user.account_id))]
pub async fn unfollow(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FollowResponse>, AppError> {
    let actor = auth_user.account(&state.db).await?;
    FollowService::new(&state.db)
        .unfollow(actor.id, id)
        .await?;
    Ok(Json(FollowResponse {
        status: FollowStatus::Unfollowed,
    }))
}

#[utoipa::path(
    get,
    path = "/feed",
    tag = "Social",
    operation_id = "getFeed",
    summary = "Home feed",
    description = "Recipes by followed accounts and the caller, plus promoted recipes, live offers from approved restaurants and account suggestions.",
    responses(
        (status = 200, description = "Feed", body = FeedResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(account_id = auth_user.account_id))]
pub async fn get_feed(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<FeedResponse>, AppError> {
    let today = chrono::Utc::now().date_naive();
    let feed = FeedService::new(&state.db)
        .compute_feed(auth_user.account_id, today)
        .await?;

    Ok(Json(FeedResponse {
        recipes: recipes::summarize(&state.db, feed.recipes).await?,
        promoted: recipes::summarize(&state.db, feed.promoted).await?,
        offers: feed.offers.into_iter().map(OfferResponse::from).collect(),
        suggested_accounts: feed.suggested.iter().map(AccountSummary::from).collect(),
        followed_ids: feed.followed_ids,
    }))
}

#[utoipa::path(
    get,
    path = "/explore",
    tag = "Social",
    operation_id = "getExplore",
    summary = "Recipes from accounts the caller does not follow",
    responses(
        (status = 200, description = "Explore listing, newest first", body = ExploreResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(account_id = auth_user.account_id))]
pub async fn get_explore(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ExploreResponse>, AppError> {
    let models = FeedService::new(&state.db)
        .compute_explore(auth_user.account_id)
        .await?;
    Ok(Json(ExploreResponse {
        recipes: recipes::summarize(&state.db, models).await?,
    }))
}
