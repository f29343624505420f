use std::collections::HashMap;

use chrono::Utc;
use ladle_common::NotificationKind;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entity::{account, message};

use super::notification::NotificationService;
use super::{SocialError, find_account, find_recipe};

/// One row of an inbox: the latest message exchanged with a counterpart.
#[derive(Debug)]
pub struct InboxThread {
    pub counterpart: account::Model,
    pub last_message: message::Model,
    pub unread_count: u64,
}

pub struct MessagingService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> MessagingService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Store a message and notify the recipient.
    ///
    /// Whitespace-only text counts as empty; a message needs text or a recipe.
    pub async fn send_message(
        &self,
        sender_id: i32,
        recipient_id: i32,
        text: Option<&str>,
        recipe_id: Option<i32>,
    ) -> Result<message::Model, SocialError> {
        self.deliver(sender_id, recipient_id, text, recipe_id, false)
            .await
    }

    /// Send `recipe_id` to `recipient_id`, optionally with a note.
    pub async fn share_recipe(
        &self,
        sender_id: i32,
        recipe_id: i32,
        recipient_id: i32,
        text: Option<&str>,
    ) -> Result<message::Model, SocialError> {
        self.deliver(sender_id, recipient_id, text, Some(recipe_id), true)
            .await
    }

    /// `announce_recipe` quotes the recipe title in the notification text.
    async fn deliver(
        &self,
        sender_id: i32,
        recipient_id: i32,
        text: Option<&str>,
        recipe_id: Option<i32>,
        announce_recipe: bool,
    ) -> Result<message::Model, SocialError> {
        let body = text.map(str::trim).unwrap_or_default();
        if body.is_empty() && recipe_id.is_none() {
            return Err(SocialError::InvalidOperation(
                "A message needs text or an attached recipe".into(),
            ));
        }
        if sender_id == recipient_id {
            return Err(SocialError::InvalidOperation(
                "You cannot message yourself".into(),
            ));
        }

        find_account(self.conn, recipient_id).await?;
        let recipe = match recipe_id {
            Some(id) => Some(find_recipe(self.conn, id).await?),
            None => None,
        };

        let saved = message::ActiveModel {
            sender_id: Set(sender_id),
            recipient_id: Set(recipient_id),
            body: Set(body.to_string()),
            recipe_id: Set(recipe_id),
            is_read: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;

        let quoted_title = recipe
            .as_ref()
            .filter(|_| announce_recipe)
            .map(|r| r.title.as_str());
        NotificationService::new(self.conn)
            .notify_actor_action(
                sender_id,
                recipient_id,
                NotificationKind::Message,
                recipe_id,
                quoted_title,
            )
            .await;

        Ok(saved)
    }

    /// The whole thread between `viewer_id` and `other_id`, oldest first.
    ///
    /// Rows are returned as they were before the call; afterwards every
    /// message addressed to the viewer in the thread is marked read.
    pub async fn conversation(
        &self,
        viewer_id: i32,
        other_id: i32,
    ) -> Result<(account::Model, Vec<message::Model>), SocialError> {
        let other = find_account(self.conn, other_id).await?;

        let messages = message::Entity::find()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(message::Column::SenderId.eq(viewer_id))
                            .add(message::Column::RecipientId.eq(other_id)),
                    )
                    .add(
                        Condition::all()
                            .add(message::Column::SenderId.eq(other_id))
                            .add(message::Column::RecipientId.eq(viewer_id)),
                    ),
            )
            .order_by_asc(message::Column::CreatedAt)
            .order_by_asc(message::Column::Id)
            .all(self.conn)
            .await?;

        let has_unread = messages
            .iter()
            .any(|m| m.recipient_id == viewer_id && !m.is_read);
        if has_unread {
            message::Entity::update_many()
                .col_expr(message::Column::IsRead, Expr::value(true))
                .filter(message::Column::SenderId.eq(other_id))
                .filter(message::Column::RecipientId.eq(viewer_id))
                .filter(message::Column::IsRead.eq(false))
                .exec(self.conn)
                .await?;
        }

        Ok((other, messages))
    }

    /// One thread per counterpart, most recent activity first.
    pub async fn inbox(&self, viewer_id: i32) -> Result<Vec<InboxThread>, DbErr> {
        let messages = message::Entity::find()
            .filter(
                Condition::any()
                    .add(message::Column::SenderId.eq(viewer_id))
                    .add(message::Column::RecipientId.eq(viewer_id)),
            )
            .order_by_desc(message::Column::CreatedAt)
            .order_by_desc(message::Column::Id)
            .all(self.conn)
            .await?;

        // Newest first, so the first message seen per counterpart is the latest.
        let mut order: Vec<i32> = Vec::new();
        let mut threads: HashMap<i32, (message::Model, u64)> = HashMap::new();
        for m in messages {
            let counterpart = if m.sender_id == viewer_id {
                m.recipient_id
            } else {
                m.sender_id
            };
            let unread = u64::from(m.recipient_id == viewer_id && !m.is_read);
            match threads.get_mut(&counterpart) {
                Some((_, count)) => *count += unread,
                None => {
                    order.push(counterpart);
                    threads.insert(counterpart, (m, unread));
                }
            }
        }

        let mut accounts: HashMap<i32, account::Model> = account::Entity::find()
            .filter(account::Column::Id.is_in(order.iter().copied()))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        Ok(order
            .into_iter()
            .filter_map(|id| {
                let counterpart = accounts.remove(&id)?;
                let (last_message, unread_count) = threads.remove(&id)?;
                Some(InboxThread {
                    counterpart,
                    last_message,
                    unread_count,
                })
            })
            .collect())
    }
}
