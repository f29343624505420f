use chrono::{DateTime, Utc};
use ladle_common::NotificationKind;
use serde::Serialize;

use crate::entity::notification;

#[derive(Serialize, utoipa::ToSchema)]
pub struct NotificationResponse {
    pub id: i32,
    pub kind: NotificationKind,
    #[schema(example = "alice liked your recipe 'Carbonara'.")]
    pub message: String,
    pub actor_id: Option<i32>,
    pub recipe_id: Option<i32>,
    /// Read state before this listing marked it read.
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<notification::Model> for NotificationResponse {
    fn from(m: notification::Model) -> Self {
        Self {
            id: m.id,
            kind: m.kind,
            message: m.message,
            actor_id: m.actor_id,
            recipe_id: m.recipe_id,
            is_read: m.is_read,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationResponse>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UnreadCountResponse {
    #[schema(example = 2)]
    pub unread_count: u64,
}
