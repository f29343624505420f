use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{account, comment};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::account::AccountSummary;
use crate::models::recipe::{
    CommentListResponse, CommentResponse, CreateCommentRequest, validate_create_comment,
};
use crate::social::find_recipe;
use crate::state::AppState;

/// Comments on a recipe, oldest first, with their authors.
pub(crate) async fn comments_for<C: ConnectionTrait>(
    db: &C,
    recipe_id: i32,
) -> Result<Vec<CommentResponse>, DbErr> {
    let rows = comment::Entity::find()
        .filter(comment::Column::RecipeId.eq(recipe_id))
        .order_by_asc(comment::Column::CreatedAt)
        .order_by_asc(comment::Column::Id)
        .all(db)
        .await?;

    let author_ids: Vec<i32> = rows.iter().map(|c| c.author_id).collect();
    let authors: HashMap<i32, AccountSummary> = account::Entity::find()
        .filter(account::Column::Id.is_in(author_ids))
        .all(db)
        .await?
        .iter()
        .map(|a| (a.id, AccountSummary::from(a)))
        .collect();

    Ok(rows
        .into_iter()
        .filter_map(|c| {
            let author = authors.get(&c.author_id)?.clone();
            Some(CommentResponse::new(c, author))
        })
        .collect())
}

#[utoipa::path(
    get,
    path = "/recipe/{id}/comments",
    tag = "Comments",
    operation_id = "listComments",
    summary = "Comments on a recipe",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Comments, oldest first", body = CommentListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id))]
pub async fn list_comments(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CommentListResponse>, AppError> {
    find_recipe(&state.db, id).await?;
    Ok(Json(CommentListResponse {
        comments: comments_for(&state.db, id).await?,
    }))
}

#[utoipa::path(
    post,
    path = "/recipe/{id}/comments",
    tag = "Comments",
    operation_id = "createComment",
    summary = "Comment on a recipe",
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id, account_id = auth_user.account_id))]
pub async fn create_comment(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_comment(&payload)?;
    find_recipe(&state.db, id).await?;
    let author = auth_user.account(&state.db).await?;

    let now = chrono::Utc::now();
    let model = comment::ActiveModel {
        content: Set(payload.content.trim().to_string()),
        recipe_id: Set(id),
        author_id: Set(author.id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommentResponse::new(model, AccountSummary::from(&author))),
    ))
}

#[utoipa::path(
    delete,
    path = "/comments/{id}",
    tag = "Comments",
    operation_id = "deleteComment",
    summary = "Delete a comment",
    description = "Only the comment's author may delete it.",
    params(("id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Comment not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_comment(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let existing = comment::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".into()))?;
    if existing.author_id != auth_user.account_id {
        return Err(AppError::PermissionDenied);
    }
    comment::Entity::delete_by_id(id).exec(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}
