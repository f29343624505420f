//! Social graph operations: follows, feeds, likes, messaging, notifications,
//! restaurant approval and ownership cascades.
//!
//! Every operation takes the acting account id explicitly. Handlers resolve it
//! from the bearer token and never pass anything ambient.

pub mod approval;
pub mod cascade;
pub mod feed;
pub mod follow;
pub mod like;
pub mod messaging;
pub mod notification;
pub mod recipes;

use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use thiserror::Error;

use crate::entity::{account, recipe};

#[derive(Debug, Error)]
pub enum SocialError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    InvalidOperation(String),
    #[error("permission denied")]
    PermissionDenied,
    #[error("restaurant awaiting approval")]
    NotApproved,
    #[error(transparent)]
    Db(#[from] DbErr),
}

pub async fn find_account<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<account::Model, SocialError> {
    account::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(SocialError::NotFound("Account"))
}

pub async fn find_recipe<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<recipe::Model, SocialError> {
    recipe::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(SocialError::NotFound("Recipe"))
}
