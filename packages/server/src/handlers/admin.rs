use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::entity::account;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::admin::{AdminAccountRow, AdminDashboardResponse, ApproveResponse};
use crate::social::{approval, cascade};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/admin/dashboard",
    tag = "Admin",
    operation_id = "getAdminDashboard",
    summary = "Accounts grouped by kind and approval state",
    responses(
        (status = 200, description = "Dashboard", body = AdminDashboardResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not an administrator (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(account_id = auth_user.account_id))]
pub async fn get_dashboard(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<AdminDashboardResponse>, AppError> {
    auth_user.require_admin()?;
    let roster = approval::roster(&state.db).await?;

    let rows = |v: Vec<account::Model>| -> Vec<AdminAccountRow> {
        v.into_iter().map(AdminAccountRow::from).collect()
    };
    Ok(Json(AdminDashboardResponse {
        users: rows(roster.users),
        approved_restaurants: rows(roster.approved_restaurants),
        pending_restaurants: rows(roster.pending_restaurants),
    }))
}

#[utoipa::path(
    post,
    path = "/admin/restaurants/{id}/approve",
    tag = "Admin",
    operation_id = "approveRestaurant",
    summary = "Approve a restaurant",
    description = "Unlocks restaurant features. Approving an approved restaurant is a no-op; there is no way back to pending.",
    params(("id" = i32, Path, description = "Restaurant account ID")),
    responses(
        (status = 200, description = "Restaurant approved", body = ApproveResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not an administrator (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "No such restaurant (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn approve_restaurant(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApproveResponse>, AppError> {
    auth_user.require_admin()?;
    let admin = auth_user.account(&state.db).await?;
    let approved = approval::approve_restaurant(&state.db, &admin, id).await?;
    Ok(Json(ApproveResponse {
        id: approved.id,
        is_approved: approved.is_approved,
    }))
}

#[utoipa::path(
    delete,
    path = "/admin/accounts/{id}",
    tag = "Admin",
    operation_id = "deleteAccount",
    summary = "Delete an account and everything it owns",
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 400, description = "Deleting yourself (INVALID_OPERATION)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not an administrator (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Account not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_account(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    auth_user.require_admin()?;
    let admin = auth_user.account(&state.db).await?;

    let txn = state.db.begin().await?;
    cascade::delete_account(&txn, &admin, id).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
