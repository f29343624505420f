use axum::Json;
use axum::extract::{Path, State};
use ladle_common::{AccountKind, SearchTarget, split_full_name};
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{account, special_offer, tag};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::{AppJson, AppQuery};
use crate::handlers::auth::{ensure_identity_free, map_identity_conflict};
use crate::models::account::*;
use crate::models::offer::OfferResponse;
use crate::models::shared::{escape_like, non_blank};
use crate::social::follow::FollowService;
use crate::social::{find_account, recipes};
use crate::state::AppState;

const SEARCH_LIMIT: u64 = 10;

#[utoipa::path(
    get,
    path = "/profile",
    tag = "Profiles",
    operation_id = "getOwnProfile",
    summary = "The caller's own profile",
    responses(
        (status = 200, description = "Own profile", body = OwnProfileResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(account_id = auth_user.account_id))]
pub async fn get_own_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<OwnProfileResponse>, AppError> {
    let me = auth_user.account(&state.db).await?;
    let follows = FollowService::new(&state.db);
    let authored = recipes::by_author(&state.db, me.id).await?;

    Ok(Json(OwnProfileResponse {
        account: AccountDetail::from(&me),
        recipes: recipes::summarize(&state.db, authored).await?,
        follower_count: follows.follower_count(me.id).await?,
        following_count: follows.following_count(me.id).await?,
        email: me.email,
    }))
}

#[utoipa::path(
    patch,
    path = "/profile",
    tag = "Profiles",
    operation_id = "updateOwnProfile",
    summary = "Edit a plain account's profile",
    description = "Restaurants edit their profile through `PATCH /restaurant/profile` instead.",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = AccountDetail),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Restaurant account (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Username or email in use (USERNAME_TAKEN, EMAIL_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(account_id = auth_user.account_id))]
pub async fn update_own_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> Result<Json<AccountDetail>, AppError> {
    if auth_user.kind != AccountKind::Plain {
        return Err(AppError::PermissionDenied);
    }
    validate_update_profile(&payload)?;

    let me = auth_user.account(&state.db).await?;
    let username = payload.username.as_deref().map(str::trim);
    let email = payload.email.as_deref().map(str::trim);
    ensure_identity_free(&state.db, username, email, Some(me.id)).await?;

    let mut active: account::ActiveModel = me.into();
    if let Some(username) = username {
        active.username = Set(username.to_string());
    }
    if let Some(email) = email {
        active.email = Set(email.to_string());
    }
    if let Some(ref full_name) = payload.full_name {
        let (first, last) = split_full_name(full_name);
        active.first_name = Set(first);
        active.last_name = Set(last);
    }
    if let Some(bio) = payload.bio {
        active.bio = Set(non_blank(bio));
    }
    if let Some(picture) = payload.profile_picture {
        active.profile_picture = Set(non_blank(picture));
    }

    let updated = active.update(&state.db).await.map_err(map_identity_conflict)?;
    Ok(Json(AccountDetail::from(&updated)))
}

#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "Profiles",
    operation_id = "getPublicProfile",
    summary = "Another account's public profile",
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Public profile", body = PublicProfileResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Account not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(account_id = auth_user.account_id))]
pub async fn get_public_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PublicProfileResponse>, AppError> {
    let target = find_account(&state.db, id).await?;
    let follows = FollowService::new(&state.db);
    let authored = recipes::by_author(&state.db, target.id).await?;

    let offers = if target.kind.is_restaurant() {
        special_offer::Entity::find()
            .filter(special_offer::Column::RestaurantId.eq(target.id))
            .filter(special_offer::Column::IsActive.eq(true))
            .order_by_desc(special_offer::Column::StartDate)
            .order_by_desc(special_offer::Column::Id)
            .all(&state.db)
            .await?
            .into_iter()
            .map(OfferResponse::from)
            .collect()
    } else {
        Vec::new()
    };

    Ok(Json(PublicProfileResponse {
        account: AccountDetail::from(&target),
        recipes: recipes::summarize(&state.db, authored).await?,
        follower_count: follows.follower_count(target.id).await?,
        following_count: follows.following_count(target.id).await?,
        is_following: follows.is_following(auth_user.account_id, target.id).await?,
        offers,
    }))
}

/// Accounts whose username or first name contains `term`, optionally skipping
/// `exclude` and capped at `limit`.
async fn matching_accounts<C: ConnectionTrait>(
    db: &C,
    term: &str,
    exclude: Option<i32>,
    limit: Option<u64>,
) -> Result<Vec<AccountSummary>, DbErr> {
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    let mut query = account::Entity::find().filter(
        Condition::any()
            .add(
                Expr::expr(Func::lower(Expr::col(account::Column::Username)))
                    .like(LikeExpr::new(pattern.clone()).escape('\\')),
            )
            .add(
                Expr::expr(Func::lower(Expr::col(account::Column::FirstName)))
                    .like(LikeExpr::new(pattern).escape('\\')),
            ),
    );
    if let Some(id) = exclude {
        query = query.filter(account::Column::Id.ne(id));
    }
    let rows = query
        .order_by_asc(account::Column::Username)
        .limit(limit)
        .all(db)
        .await?;
    Ok(rows.iter().map(AccountSummary::from).collect())
}

#[utoipa::path(
    get,
    path = "/users/search",
    tag = "Profiles",
    operation_id = "searchAccounts",
    summary = "Search accounts by username or first name",
    description = "Case-insensitive substring match, excluding the caller. At most 10 results; an empty query returns none.",
    params(AccountSearchQuery),
    responses(
        (status = 200, description = "Matching accounts", body = AccountSearchResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(account_id = auth_user.account_id))]
pub async fn search_accounts(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AccountSearchQuery>,
) -> Result<Json<AccountSearchResponse>, AppError> {
    let term = query.q.as_deref().unwrap_or("").trim();
    let results = if term.is_empty() {
        Vec::new()
    } else {
        let viewer = Some(auth_user.account_id);
        matching_accounts(&state.db, term, viewer, Some(SEARCH_LIMIT)).await?
    };
    Ok(Json(AccountSearchResponse { results }))
}

#[utoipa::path(
    get,
    path = "/ajax-search",
    tag = "Profiles",
    operation_id = "quickSearch",
    summary = "Search box suggestions",
    description = "A query starting with `#` returns tag names containing the rest. Anything else returns matching accounts.",
    params(QuickSearchQuery),
    responses(
        (status = 200, description = "Suggestions", body = QuickSearchResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(account_id = auth_user.account_id))]
pub async fn quick_search(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<QuickSearchQuery>,
) -> Result<Json<QuickSearchResponse>, AppError> {
    let raw = query.query.as_deref().unwrap_or("").trim();
    if raw.is_empty() {
        return Ok(Json(QuickSearchResponse::default()));
    }

    let response = match SearchTarget::parse(raw) {
        SearchTarget::Tags(term) => {
            let pattern = format!("%{}%", escape_like(&term));
            let tags: Vec<String> = tag::Entity::find()
                .select_only()
                .column(tag::Column::Name)
                .filter(
                    Expr::expr(Func::lower(Expr::col(tag::Column::Name)))
                        .like(LikeExpr::new(pattern).escape('\\')),
                )
                .distinct()
                .order_by_asc(tag::Column::Name)
                .into_tuple()
                .all(&state.db)
                .await?;
            QuickSearchResponse {
                users: Vec::new(),
                tags,
            }
        }
        SearchTarget::Accounts(term) => QuickSearchResponse {
            users: matching_accounts(&state.db, &term, None, None).await?,
            tags: Vec::new(),
        },
    };
    Ok(Json(response))
}
