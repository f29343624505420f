//! Explicit ownership-graph deletion.
//!
//! Callers run these inside a transaction. Rows are removed children first so
//! no foreign key is left dangling at any point.

use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
};
use tracing::info;

use crate::entity::{
    account, comment, follow, message, notification, recipe, recipe_like, recipe_tag,
    special_offer,
};

use super::{SocialError, find_account};

/// Remove rows hanging off the given recipes, then the recipes themselves.
async fn delete_recipes<C: ConnectionTrait>(conn: &C, recipe_ids: &[i32]) -> Result<(), DbErr> {
    if recipe_ids.is_empty() {
        return Ok(());
    }
    let ids = || recipe_ids.iter().copied();

    notification::Entity::delete_many()
        .filter(notification::Column::RecipeId.is_in(ids()))
        .exec(conn)
        .await?;
    message::Entity::delete_many()
        .filter(message::Column::RecipeId.is_in(ids()))
        .exec(conn)
        .await?;
    recipe_like::Entity::delete_many()
        .filter(recipe_like::Column::RecipeId.is_in(ids()))
        .exec(conn)
        .await?;
    comment::Entity::delete_many()
        .filter(comment::Column::RecipeId.is_in(ids()))
        .exec(conn)
        .await?;
    recipe_tag::Entity::delete_many()
        .filter(recipe_tag::Column::RecipeId.is_in(ids()))
        .exec(conn)
        .await?;
    recipe::Entity::delete_many()
        .filter(recipe::Column::Id.is_in(ids()))
        .exec(conn)
        .await?;
    Ok(())
}

pub async fn delete_recipe<C: ConnectionTrait>(conn: &C, recipe_id: i32) -> Result<(), DbErr> {
    delete_recipes(conn, &[recipe_id]).await
}

/// Administrator removal of an account and everything it owns.
pub async fn delete_account<C: ConnectionTrait>(
    conn: &C,
    actor: &account::Model,
    account_id: i32,
) -> Result<(), SocialError> {
    if !actor.is_admin {
        return Err(SocialError::PermissionDenied);
    }
    if actor.id == account_id {
        return Err(SocialError::InvalidOperation(
            "You cannot delete your own account".into(),
        ));
    }
    let target = find_account(conn, account_id).await?;

    let recipe_ids: Vec<i32> = recipe::Entity::find()
        .select_only()
        .column(recipe::Column::Id)
        .filter(recipe::Column::AuthorId.eq(account_id))
        .into_tuple()
        .all(conn)
        .await?;
    delete_recipes(conn, &recipe_ids).await?;

    notification::Entity::delete_many()
        .filter(
            Condition::any()
                .add(notification::Column::RecipientId.eq(account_id))
                .add(notification::Column::ActorId.eq(account_id)),
        )
        .exec(conn)
        .await?;
    message::Entity::delete_many()
        .filter(
            Condition::any()
                .add(message::Column::SenderId.eq(account_id))
                .add(message::Column::RecipientId.eq(account_id)),
        )
        .exec(conn)
        .await?;
    follow::Entity::delete_many()
        .filter(
            Condition::any()
                .add(follow::Column::FollowerId.eq(account_id))
                .add(follow::Column::FollowedId.eq(account_id)),
        )
        .exec(conn)
        .await?;
    recipe_like::Entity::delete_many()
        .filter(recipe_like::Column::AccountId.eq(account_id))
        .exec(conn)
        .await?;
    comment::Entity::delete_many()
        .filter(comment::Column::AuthorId.eq(account_id))
        .exec(conn)
        .await?;
    special_offer::Entity::delete_many()
        .filter(special_offer::Column::RestaurantId.eq(account_id))
        .exec(conn)
        .await?;
    account::Entity::delete_by_id(account_id).exec(conn).await?;

    info!(
        admin_id = actor.id,
        account_id,
        username = %target.username,
        recipes = recipe_ids.len(),
        "Account deleted"
    );
    Ok(())
}
