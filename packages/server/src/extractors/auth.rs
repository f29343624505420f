use axum::{extract::FromRequestParts, http::request::Parts};
use ladle_common::AccountKind;
use sea_orm::{ConnectionTrait, EntityTrait};

use crate::entity::account;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Authenticated account extracted from the `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require authentication. The acting
/// account is then passed explicitly into every social operation.
pub struct AuthUser {
    pub account_id: i32,
    pub username: String,
    pub kind: AccountKind,
    pub is_admin: bool,
}

impl AuthUser {
    /// Returns `Ok(())` for administrators, `Err(PermissionDenied)` otherwise.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }

    /// Returns `Ok(())` for restaurant accounts, approved or not.
    pub fn require_restaurant(&self) -> Result<(), AppError> {
        if self.kind.is_restaurant() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }

    /// Load the current account row. A token for a deleted account is treated as invalid.
    pub async fn account<C: ConnectionTrait>(&self, db: &C) -> Result<account::Model, AppError> {
        account::Entity::find_by_id(self.account_id)
            .one(db)
            .await?
            .ok_or(AppError::TokenInvalid)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::TokenInvalid)?;

        let claims = jwt::verify(token, &state.config.auth.jwt_secret)
            .map_err(|_| AppError::TokenInvalid)?;

        Ok(AuthUser {
            account_id: claims.uid,
            username: claims.sub,
            kind: claims.kind,
            is_admin: claims.adm,
        })
    }
}
