use chrono::Utc;
use ladle_common::{FollowStatus, NotificationKind};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr,
};
use tracing::debug;

use crate::entity::follow;

use super::notification::NotificationService;
use super::{SocialError, find_account};

pub struct FollowService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> FollowService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Toggle the edge `actor_id -> target_id`.
    ///
    /// Creating the edge notifies the target. A concurrent duplicate insert is
    /// reported as `Followed` without a second notification.
    pub async fn follow(&self, actor_id: i32, target_id: i32) -> Result<FollowStatus, SocialError> {
        find_account(self.conn, target_id).await?;
        if actor_id == target_id {
            return Err(SocialError::InvalidOperation(
                "You cannot follow yourself".into(),
            ));
        }

        if self.is_following(actor_id, target_id).await? {
            self.remove_edge(actor_id, target_id).await?;
            return Ok(FollowStatus::Unfollowed);
        }

        let edge = follow::ActiveModel {
            follower_id: Set(actor_id),
            followed_id: Set(target_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        match follow::Entity::insert(edge)
            .exec_without_returning(self.conn)
            .await
        {
            Ok(_) => {}
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                debug!(actor_id, target_id, "Follow edge created concurrently");
                return Ok(FollowStatus::Followed);
            }
            Err(e) => return Err(e.into()),
        }

        NotificationService::new(self.conn)
            .notify_actor_action(actor_id, target_id, NotificationKind::Follow, None, None)
            .await;

        Ok(FollowStatus::Followed)
    }

    /// Remove the edge if present. Never creates one.
    pub async fn unfollow(&self, actor_id: i32, target_id: i32) -> Result<(), SocialError> {
        find_account(self.conn, target_id).await?;
        if actor_id == target_id {
            return Ok(());
        }
        self.remove_edge(actor_id, target_id).await?;
        Ok(())
    }

    async fn remove_edge(&self, actor_id: i32, target_id: i32) -> Result<u64, DbErr> {
        let res = follow::Entity::delete_many()
            .filter(follow::Column::FollowerId.eq(actor_id))
            .filter(follow::Column::FollowedId.eq(target_id))
            .exec(self.conn)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn is_following(&self, actor_id: i32, target_id: i32) -> Result<bool, DbErr> {
        let count = follow::Entity::find()
            .filter(follow::Column::FollowerId.eq(actor_id))
            .filter(follow::Column::FollowedId.eq(target_id))
            .count(self.conn)
            .await?;
        Ok(count > 0)
    }

    /// Ids `account_id` follows, oldest edge first.
    pub async fn following_ids(&self, account_id: i32) -> Result<Vec<i32>, DbErr> {
        follow::Entity::find()
            .select_only()
            .column(follow::Column::FollowedId)
            .filter(follow::Column::FollowerId.eq(account_id))
            .order_by_asc(follow::Column::CreatedAt)
            .order_by_asc(follow::Column::FollowedId)
            .into_tuple()
            .all(self.conn)
            .await
    }

    pub async fn follower_count(&self, account_id: i32) -> Result<u64, DbErr> {
        follow::Entity::find()
            .filter(follow::Column::FollowedId.eq(account_id))
            .count(self.conn)
            .await
    }

    pub async fn following_count(&self, account_id: i32) -> Result<u64, DbErr> {
        follow::Entity::find()
            .filter(follow::Column::FollowerId.eq(account_id))
            .count(self.conn)
            .await
    }
}
