use chrono::Utc;
use ladle_common::{NotificationKind, render_notification};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::warn;

use crate::entity::notification;

use super::find_account;

/// A notification about to be written.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient_id: i32,
    pub actor_id: Option<i32>,
    pub kind: NotificationKind,
    pub message: String,
    pub recipe_id: Option<i32>,
}

pub struct NotificationService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Insert a notification. Failures are logged and swallowed: the action
    /// that triggered the notification has already happened.
    ///
    /// Returns whether the row was written.
    pub async fn notify_best_effort(&self, new: NewNotification) -> bool {
        let model = notification::ActiveModel {
            recipient_id: Set(new.recipient_id),
            actor_id: Set(new.actor_id),
            kind: Set(new.kind),
            message: Set(new.message),
            recipe_id: Set(new.recipe_id),
            is_read: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        match model.insert(self.conn).await {
            Ok(_) => true,
            Err(e) => {
                warn!(
                    recipient_id = new.recipient_id,
                    kind = %new.kind,
                    error = %e,
                    "Failed to create notification"
                );
                false
            }
        }
    }

    /// Render and write the notification for `actor_id` acting on `recipient_id`.
    ///
    /// `recipe_title` is quoted in the text; `recipe_id` is only referenced.
    pub async fn notify_actor_action(
        &self,
        actor_id: i32,
        recipient_id: i32,
        kind: NotificationKind,
        recipe_id: Option<i32>,
        recipe_title: Option<&str>,
    ) -> bool {
        let actor = match find_account(self.conn, actor_id).await {
            Ok(actor) => actor,
            Err(e) => {
                warn!(actor_id, error = %e, "Failed to load notification actor");
                return false;
            }
        };

        let message = render_notification(kind, &actor.display_name(), recipe_title);

        self.notify_best_effort(NewNotification {
            recipient_id,
            actor_id: Some(actor_id),
            kind,
            message,
            recipe_id,
        })
        .await
    }

    /// All notifications for `recipient_id`, newest first, as they were before
    /// this call. Every unread one is marked read afterwards.
    pub async fn list_and_mark_read(
        &self,
        recipient_id: i32,
    ) -> Result<Vec<notification::Model>, DbErr> {
        let items = notification::Entity::find()
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .order_by_desc(notification::Column::CreatedAt)
            .order_by_desc(notification::Column::Id)
            .all(self.conn)
            .await?;

        if items.iter().any(|n| !n.is_read) {
            notification::Entity::update_many()
                .col_expr(notification::Column::IsRead, Expr::value(true))
                .filter(notification::Column::RecipientId.eq(recipient_id))
                .filter(notification::Column::IsRead.eq(false))
                .exec(self.conn)
                .await?;
        }

        Ok(items)
    }

    pub async fn unread_count(&self, recipient_id: i32) -> Result<u64, DbErr> {
        notification::Entity::find()
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .filter(notification::Column::IsRead.eq(false))
            .count(self.conn)
            .await
    }
}
