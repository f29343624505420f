use chrono::Utc;
use ladle_common::NotificationKind;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Set, SqlErr,
};
use tracing::debug;

use crate::entity::recipe_like;

use super::notification::NotificationService;
use super::recipes;
use super::{SocialError, find_recipe};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeOutcome {
    pub liked: bool,
    pub likes_count: u64,
}

pub struct LikeService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> LikeService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Flip the like of `actor_id` on `recipe_id`.
    ///
    /// A new like notifies the recipe's author unless the author is the actor.
    /// Unliking leaves earlier notifications in place.
    pub async fn toggle_like(
        &self,
        actor_id: i32,
        recipe_id: i32,
    ) -> Result<LikeOutcome, SocialError> {
        let recipe = find_recipe(self.conn, recipe_id).await?;

        let liked = if self.has_liked(actor_id, recipe_id).await? {
            recipe_like::Entity::delete_many()
                .filter(recipe_like::Column::AccountId.eq(actor_id))
                .filter(recipe_like::Column::RecipeId.eq(recipe_id))
                .exec(self.conn)
                .await?;
            false
        } else {
            let row = recipe_like::ActiveModel {
                account_id: Set(actor_id),
                recipe_id: Set(recipe_id),
                created_at: Set(Utc::now()),
                ..Default::default()
            };
            match recipe_like::Entity::insert(row)
                .exec_without_returning(self.conn)
                .await
            {
                Ok(_) => {
                    if recipe.author_id != actor_id {
                        NotificationService::new(self.conn)
                            .notify_actor_action(
                                actor_id,
                                recipe.author_id,
                                NotificationKind::Like,
                                Some(recipe.id),
                                Some(&recipe.title),
                            )
                            .await;
                    }
                }
                Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                    debug!(actor_id, recipe_id, "Like created concurrently");
                }
                Err(e) => return Err(e.into()),
            }
            true
        };

        Ok(LikeOutcome {
            liked,
            likes_count: self.likes_count(recipe_id).await?,
        })
    }

    pub async fn likes_count(&self, recipe_id: i32) -> Result<u64, DbErr> {
        recipe_like::Entity::find()
            .filter(recipe_like::Column::RecipeId.eq(recipe_id))
            .count(self.conn)
            .await
    }

    pub async fn has_liked(&self, actor_id: i32, recipe_id: i32) -> Result<bool, DbErr> {
        recipes::has_liked(self.conn, actor_id, recipe_id).await
    }
}
