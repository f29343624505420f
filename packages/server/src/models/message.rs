use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::message;
use crate::error::AppError;

use super::account::AccountSummary;
use super::shared::validate_optional_len;

const MAX_MESSAGE_LEN: usize = 5000;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SendMessageRequest {
    /// May be omitted when a recipe is attached.
    #[schema(example = "Have you tried this one?")]
    pub text: Option<String>,
    pub recipe_id: Option<i32>,
}

pub fn validate_send_message(payload: &SendMessageRequest) -> Result<(), AppError> {
    validate_optional_len("Message", payload.text.as_deref(), 0, MAX_MESSAGE_LEN)
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ShareRecipeRequest {
    #[schema(example = 5)]
    pub recipient_id: i32,
    pub text: Option<String>,
}

pub fn validate_share_recipe(payload: &ShareRecipeRequest) -> Result<(), AppError> {
    validate_optional_len("Message", payload.text.as_deref(), 0, MAX_MESSAGE_LEN)
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub id: i32,
    pub sender_id: i32,
    pub recipient_id: i32,
    pub body: String,
    pub recipe_id: Option<i32>,
    /// Read state at the time of the request.
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<message::Model> for MessageResponse {
    fn from(m: message::Model) -> Self {
        Self {
            id: m.id,
            sender_id: m.sender_id,
            recipient_id: m.recipient_id,
            body: m.body,
            recipe_id: m.recipe_id,
            is_read: m.is_read,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ConversationResponse {
    pub counterpart: AccountSummary,
    /// Oldest first.
    pub messages: Vec<MessageResponse>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct InboxEntry {
    pub counterpart: AccountSummary,
    pub last_message: String,
    pub last_message_at: DateTime<Utc>,
    /// Unread messages from the counterpart.
    pub unread_count: u64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct InboxResponse {
    /// Most recent conversation first.
    pub conversations: Vec<InboxEntry>,
}
