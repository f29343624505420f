use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::account::AccountSummary;
use crate::models::message::*;
use crate::social::messaging::MessagingService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/inbox",
    tag = "Messages",
    operation_id = "getInbox",
    summary = "Conversations of the caller",
    responses(
        (status = 200, description = "One entry per counterpart, latest activity first", body = InboxResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(account_id = auth_user.account_id))]
pub async fn get_inbox(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<InboxResponse>, AppError> {
    let threads = MessagingService::new(&state.db)
        .inbox(auth_user.account_id)
        .await?;

    let conversations = threads
        .into_iter()
        .map(|t| InboxEntry {
            counterpart: AccountSummary::from(&t.counterpart),
            last_message: t.last_message.body,
            last_message_at: t.last_message.created_at,
            unread_count: t.unread_count,
        })
        .collect();
    Ok(Json(InboxResponse { conversations }))
}

#[utoipa::path(
    get,
    path = "/conversation/{id}",
    tag = "Messages",
    operation_id = "getConversation",
    summary = "Read a conversation",
    description = "Returns the thread oldest first with read flags as they were, then marks the counterpart's messages read.",
    params(("id" = i32, Path, description = "Counterpart account ID")),
    responses(
        (status = 200, description = "Conversation", body = ConversationResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Account not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id, account_id = auth_user.account_id))]
pub async fn get_conversation(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ConversationResponse>, AppError> {
    let (other, messages) = MessagingService::new(&state.db)
        .conversation(auth_user.account_id, id)
        .await?;
    Ok(Json(ConversationResponse {
        counterpart: AccountSummary::from(&other),
        messages: messages.into_iter().map(MessageResponse::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/conversation/{id}",
    tag = "Messages",
    operation_id = "sendMessage",
    summary = "Send a message",
    params(("id" = i32, Path, description = "Recipient account ID")),
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent", body = MessageResponse),
        (status = 400, description = "Empty message or messaging yourself (INVALID_OPERATION)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Recipient or recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id, account_id = auth_user.account_id))]
pub async fn send_message(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<SendMessageRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_send_message(&payload)?;
    let sender = auth_user.account(&state.db).await?;
    let saved = MessagingService::new(&state.db)
        .send_message(
            sender.id,
            id,
            payload.text.as_deref(),
            payload.recipe_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::from(saved))))
}

#[utoipa::path(
    post,
    path = "/share/{recipe_id}",
    tag = "Messages",
    operation_id = "shareRecipe",
    summary = "Share a recipe in a direct message",
    params(("recipe_id" = i32, Path, description = "Recipe ID")),
    request_body = ShareRecipeRequest,
    responses(
        (status = 201, description = "Recipe shared", body = MessageResponse),
        (status = 400, description = "Sharing with yourself (INVALID_OPERATION)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Recipient or recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(recipe_id, account_id = auth_user.account_id))]
pub async fn share_recipe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
    AppJson(payload): AppJson<ShareRecipeRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_share_recipe(&payload)?;
    let sender = auth_user.account(&state.db).await?;
    let saved = MessagingService::new(&state.db)
        .share_recipe(
            sender.id,
            recipe_id,
            payload.recipient_id,
            payload.text.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::from(saved))))
}
