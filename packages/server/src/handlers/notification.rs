use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::notification::*;
use crate::social::notification::NotificationService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/notifications",
    tag = "Notifications",
    operation_id = "listNotifications",
    summary = "List and mark notifications read",
    description = "Returns every notification for the caller, newest first, with the read flag each had before this call. All of them are marked read afterwards.",
    responses(
        (status = 200, description = "Notifications", body = NotificationListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(account_id = auth_user.account_id))]
pub async fn list_notifications(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<NotificationListResponse>, AppError> {
    let items = NotificationService::new(&state.db)
        .list_and_mark_read(auth_user.account_id)
        .await?;
    Ok(Json(NotificationListResponse {
        notifications: items.into_iter().map(NotificationResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/notifications/unread-count",
    tag = "Notifications",
    operation_id = "unreadNotificationCount",
    summary = "Number of unread notifications",
    responses(
        (status = 200, description = "Unread count", body = UnreadCountResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(account_id = auth_user.account_id))]
pub async fn unread_count(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UnreadCountResponse>, AppError> {
    let unread_count = NotificationService::new(&state.db)
        .unread_count(auth_user.account_id)
        .await?;
    Ok(Json(UnreadCountResponse { unread_count }))
}
