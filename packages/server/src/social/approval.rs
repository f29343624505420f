use ladle_common::AccountKind;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::entity::account;

use super::{SocialError, find_account};

/// Gate for restaurant-only features.
pub fn require_approved_restaurant(account: &account::Model) -> Result<(), SocialError> {
    if !account.kind.is_restaurant() {
        return Err(SocialError::PermissionDenied);
    }
    if !account.is_active_restaurant() {
        return Err(SocialError::NotApproved);
    }
    Ok(())
}

/// Mark a restaurant approved. Approving twice is a no-op.
pub async fn approve_restaurant<C: ConnectionTrait>(
    conn: &C,
    actor: &account::Model,
    restaurant_id: i32,
) -> Result<account::Model, SocialError> {
    if !actor.is_admin {
        return Err(SocialError::PermissionDenied);
    }
    let target = find_account(conn, restaurant_id).await?;
    if !target.kind.is_restaurant() {
        return Err(SocialError::NotFound("Restaurant"));
    }
    if target.is_approved {
        return Ok(target);
    }

    let mut active = target.into_active_model();
    active.is_approved = Set(true);
    let approved = active.update(conn).await?;
    info!(admin_id = actor.id, restaurant_id, "Restaurant approved");
    Ok(approved)
}

/// Accounts grouped the way the administrator dashboard shows them.
#[derive(Debug)]
pub struct Roster {
    pub users: Vec<account::Model>,
    pub approved_restaurants: Vec<account::Model>,
    pub pending_restaurants: Vec<account::Model>,
}

pub async fn roster<C: ConnectionTrait>(conn: &C) -> Result<Roster, DbErr> {
    let users = account::Entity::find()
        .filter(account::Column::Kind.eq(AccountKind::Plain))
        .order_by_asc(account::Column::Id)
        .all(conn)
        .await?;

    let (approved_restaurants, pending_restaurants) = account::Entity::find()
        .filter(account::Column::Kind.eq(AccountKind::Restaurant))
        .order_by_asc(account::Column::Id)
        .all(conn)
        .await?
        .into_iter()
        .partition(|a| a.is_approved);

    Ok(Roster {
        users,
        approved_restaurants,
        pending_restaurants,
    })
}
