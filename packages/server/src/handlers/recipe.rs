use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use ladle_common::AccountKind;
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{recipe, recipe_tag, tag};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::handlers::comment::comments_for;
use crate::models::recipe::*;
use crate::models::shared::non_blank;
use crate::social::like::LikeService;
use crate::social::{cascade, find_recipe, recipes};
use crate::state::AppState;

fn require_author(auth_user: &AuthUser, model: &recipe::Model) -> Result<(), AppError> {
    if model.author_id != auth_user.account_id {
        return Err(AppError::PermissionDenied);
    }
    Ok(())
}

fn require_may_promote(auth_user: &AuthUser, is_promoted: bool) -> Result<(), AppError> {
    if is_promoted && auth_user.kind != AccountKind::Restaurant {
        return Err(AppError::PermissionDenied);
    }
    Ok(())
}

async fn detail<C: ConnectionTrait>(
    db: &C,
    viewer_id: i32,
    model: recipe::Model,
) -> Result<RecipeDetailResponse, AppError> {
    let ingredients = model.ingredient_list();
    let instructions = model.instruction_list();
    let total_time = model.total_time();
    let liked = recipes::has_liked(db, viewer_id, model.id).await?;
    let comments = comments_for(db, model.id).await?;
    Ok(RecipeDetailResponse {
        recipe: recipes::summarize_one(db, model).await?,
        ingredients,
        instructions,
        total_time,
        liked,
        comments,
    })
}

#[utoipa::path(
    post,
    path = "/recipe",
    tag = "Recipes",
    operation_id = "createRecipe",
    summary = "Publish a recipe",
    description = "Tags are created on first use. Only restaurant accounts may mark a recipe as promoted.",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeDetailResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Plain account asked for promotion (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(account_id = auth_user.account_id, title = %payload.title))]
pub async fn create_recipe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRecipeRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_recipe(&payload)?;
    require_may_promote(&auth_user, payload.is_promoted)?;
    let author = auth_user.account(&state.db).await?;

    let now = chrono::Utc::now();
    let txn = state.db.begin().await?;

    let model = recipe::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description.trim().to_string()),
        ingredients: Set(payload.ingredients),
        instructions: Set(payload.instructions),
        cook_time: Set(payload.cook_time),
        servings: Set(payload.servings),
        difficulty: Set(payload.difficulty),
        image: Set(non_blank(payload.image)),
        is_promoted: Set(payload.is_promoted),
        author_id: Set(author.id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if let Some(ref tags) = payload.tags {
        recipes::set_tags(&txn, model.id, &tags.names()).await?;
    }
    txn.commit().await?;

    tracing::info!(recipe_id = model.id, "Recipe created");
    let body = detail(&state.db, auth_user.account_id, model).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

#[utoipa::path(
    get,
    path = "/recipe/{id}",
    tag = "Recipes",
    operation_id = "getRecipe",
    summary = "Recipe detail",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe detail", body = RecipeDetailResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_recipe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeDetailResponse>, AppError> {
    let model = find_recipe(&state.db, id).await?;
    Ok(Json(detail(&state.db, auth_user.account_id, model).await?))
}

#[utoipa::path(
    patch,
    path = "/recipe/{id}",
    tag = "Recipes",
    operation_id = "updateRecipe",
    summary = "Edit a recipe",
    description = "Author only. A `tags` field replaces the whole tag set.",
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeDetailResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_recipe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateRecipeRequest>,
) -> Result<Json<RecipeDetailResponse>, AppError> {
    validate_update_recipe(&payload)?;

    let txn = state.db.begin().await?;
    let existing = find_recipe(&txn, id).await?;
    require_author(&auth_user, &existing)?;
    if let Some(promoted) = payload.is_promoted {
        require_may_promote(&auth_user, promoted)?;
    }

    let mut active: recipe::ActiveModel = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description.trim().to_string());
    }
    if let Some(ingredients) = payload.ingredients {
        active.ingredients = Set(ingredients);
    }
    if let Some(instructions) = payload.instructions {
        active.instructions = Set(instructions);
    }
    if let Some(cook_time) = payload.cook_time {
        active.cook_time = Set(cook_time);
    }
    if let Some(servings) = payload.servings {
        active.servings = Set(servings);
    }
    if let Some(difficulty) = payload.difficulty {
        active.difficulty = Set(difficulty);
    }
    if let Some(image) = payload.image {
        active.image = Set(non_blank(image));
    }
    if let Some(promoted) = payload.is_promoted {
        active.is_promoted = Set(promoted);
    }
    active.updated_at = Set(chrono::Utc::now());
    let model = active.update(&txn).await?;

    if let Some(ref tags) = payload.tags {
        recipes::set_tags(&txn, model.id, &tags.names()).await?;
    }
    txn.commit().await?;

    Ok(Json(detail(&state.db, auth_user.account_id, model).await?))
}

#[utoipa::path(
    delete,
    path = "/recipe/{id}",
    tag = "Recipes",
    operation_id = "deleteRecipe",
    summary = "Delete a recipe",
    description = "Author only. Likes, comments, tag links and the messages and notifications that reference the recipe are removed with it.",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_recipe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let txn = state.db.begin().await?;
    let existing = find_recipe(&txn, id).await?;
    require_author(&auth_user, &existing)?;
    cascade::delete_recipe(&txn, id).await?;
    txn.commit().await?;

    tracing::info!(recipe_id = id, "Recipe deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/recipe/{id}/like",
    tag = "Recipes",
    operation_id = "toggleLike",
    summary = "Like or unlike a recipe",
    description = "Flips the caller's like. A new like on someone else's recipe notifies its author.",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "New like state", body = LikeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id, account_id = auth_user.account_id))]
pub async fn toggle_like(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<LikeResponse>, AppError> {
    let actor = auth_user.account(&state.db).await?;
    let outcome = LikeService::new(&state.db)
        .toggle_like(actor.id, id)
        .await?;
    Ok(Json(LikeResponse {
        liked: outcome.liked,
        likes_count: outcome.likes_count,
    }))
}

#[utoipa::path(
    get,
    path = "/tagged/{tag_name}",
    tag = "Recipes",
    operation_id = "listTaggedRecipes",
    summary = "Recipes carrying a tag",
    params(("tag_name" = String, Path, description = "Tag name, case-insensitive")),
    responses(
        (status = 200, description = "Recipes, newest first", body = TaggedRecipesResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Tag not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_tagged(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(tag_name): Path<String>,
) -> Result<Json<TaggedRecipesResponse>, AppError> {
    let name = tag_name.trim().to_lowercase();
    let found = tag::Entity::find()
        .filter(tag::Column::Name.eq(&name))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tag not found".into()))?;

    let models = recipe::Entity::find()
        .filter(
            recipe::Column::Id.in_subquery(
                SeaQuery::select()
                    .column(recipe_tag::Column::RecipeId)
                    .from(recipe_tag::Entity)
                    .and_where(recipe_tag::Column::TagId.eq(found.id))
                    .to_owned(),
            ),
        )
        .order_by_desc(recipe::Column::CreatedAt)
        .order_by_desc(recipe::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(TaggedRecipesResponse {
        tag: found.name,
        recipes: recipes::summarize(&state.db, models).await?,
    }))
}
