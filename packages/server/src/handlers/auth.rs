use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use ladle_common::{AccountKind, split_full_name};
use sea_orm::*;
use tracing::instrument;

use crate::entity::account;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::auth::{
    LoginRequest, LoginResponse, MeResponse, RegisterResponse, RegisterRestaurantRequest,
    RegisterUserRequest, validate_login_request, validate_register_restaurant,
    validate_register_user,
};
use crate::state::AppState;
use crate::utils::{hash, jwt};

/// Reject a username or email that another account already uses.
pub(crate) async fn ensure_identity_free<C: ConnectionTrait>(
    db: &C,
    username: Option<&str>,
    email: Option<&str>,
    except_id: Option<i32>,
) -> Result<(), AppError> {
    let taken = |col: account::Column, value: &str| {
        let mut q = account::Entity::find().filter(col.eq(value));
        if let Some(id) = except_id {
            q = q.filter(account::Column::Id.ne(id));
        }
        q
    };
    if let Some(username) = username
        && taken(account::Column::Username, username).count(db).await? > 0
    {
        return Err(AppError::UsernameTaken);
    }
    if let Some(email) = email
        && taken(account::Column::Email, email).count(db).await? > 0
    {
        return Err(AppError::EmailTaken);
    }
    Ok(())
}

/// Map a unique violation on insert/update to the matching 409.
pub(crate) fn map_identity_conflict(e: DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("Identity race condition: unique constraint caught on write");
            if detail.contains("email") {
                AppError::EmailTaken
            } else {
                AppError::UsernameTaken
            }
        }
        _ => AppError::from(e),
    }
}

struct NewAccount {
    username: String,
    email: String,
    password: String,
    kind: AccountKind,
    first_name: String,
    last_name: String,
    restaurant_name: Option<String>,
    restaurant_location: Option<String>,
}

async fn create_account(
    db: &DatabaseConnection,
    new: NewAccount,
) -> Result<account::Model, AppError> {
    ensure_identity_free(db, Some(&new.username), Some(&new.email), None).await?;

    let hash = hash::hash_password(&new.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let model = account::ActiveModel {
        username: Set(new.username),
        email: Set(new.email),
        password: Set(hash),
        kind: Set(new.kind),
        is_admin: Set(false),
        first_name: Set(new.first_name),
        last_name: Set(new.last_name),
        restaurant_name: Set(new.restaurant_name),
        restaurant_location: Set(new.restaurant_location),
        is_approved: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(map_identity_conflict)
}

#[utoipa::path(
    post,
    path = "/auth/register/user",
    tag = "Auth",
    operation_id = "registerUser",
    summary = "Register a plain account",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR) or passwords differ (INVALID_OPERATION)", body = ErrorBody),
        (status = 409, description = "Username or email in use (USERNAME_TAKEN, EMAIL_TAKEN)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn register_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_register_user(&payload)?;

    let (first_name, last_name) = split_full_name(payload.full_name.as_deref().unwrap_or(""));
    let created = create_account(
        &state.db,
        NewAccount {
            username: payload.username.trim().to_string(),
            email: payload.email.trim().to_string(),
            password: payload.password,
            kind: AccountKind::Plain,
            first_name,
            last_name,
            restaurant_name: None,
            restaurant_location: None,
        },
    )
    .await?;

    tracing::info!(account_id = created.id, "Plain account registered");
    Ok((StatusCode::CREATED, Json(RegisterResponse::from(created))))
}

#[utoipa::path(
    post,
    path = "/auth/register/restaurant",
    tag = "Auth",
    operation_id = "registerRestaurant",
    summary = "Register a restaurant account",
    description = "The account is created unapproved. Restaurant features stay locked until an administrator approves it.",
    request_body = RegisterRestaurantRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR) or passwords differ (INVALID_OPERATION)", body = ErrorBody),
        (status = 409, description = "Username or email in use (USERNAME_TAKEN, EMAIL_TAKEN)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn register_restaurant(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRestaurantRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_register_restaurant(&payload)?;

    let created = create_account(
        &state.db,
        NewAccount {
            username: payload.username.trim().to_string(),
            email: payload.email.trim().to_string(),
            password: payload.password,
            kind: AccountKind::Restaurant,
            first_name: String::new(),
            last_name: String::new(),
            restaurant_name: Some(payload.restaurant_name.trim().to_string()),
            restaurant_location: Some(payload.restaurant_location.trim().to_string()),
        },
    )
    .await?;

    tracing::info!(account_id = created.id, "Restaurant registered, awaiting approval");
    Ok((StatusCode::CREATED, Json(RegisterResponse::from(created))))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Log in and receive a bearer token",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Wrong username or password (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login_request(&payload)?;

    let account = account::Entity::find()
        .filter(account::Column::Username.eq(payload.username.trim()))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let is_valid = hash::verify_password(&payload.password, &account.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;
    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    let token = jwt::sign(
        account.id,
        &account.username,
        account.kind,
        account.is_admin,
        &state.config.auth.jwt_secret,
        state.config.auth.token_ttl_days,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    Ok(Json(LoginResponse {
        token,
        id: account.id,
        home: account.kind.home(account.is_admin),
        username: account.username,
        kind: account.kind,
        is_admin: account.is_admin,
    }))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Auth",
    operation_id = "me",
    summary = "Current account",
    responses(
        (status = 200, description = "Current account", body = MeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(account_id = auth_user.account_id))]
pub async fn me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<MeResponse>, AppError> {
    let account = auth_user.account(&state.db).await?;
    Ok(Json(MeResponse::from(&account)))
}
