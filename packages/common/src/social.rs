#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;

/// What triggered a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "like"))]
    Like,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "follow"))]
    Follow,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "message"))]
    Message,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Follow => "follow",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a follow toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FollowStatus {
    Followed,
    Unfollowed,
}

/// Number of items in each of the fixed feed side panels.
pub const FEED_SLICE_LEN: u64 = 5;

/// What an inline search box query is looking for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchTarget {
    /// `#pasta` searches tag names containing `pasta`.
    Tags(String),
    /// Anything else searches accounts by username or first name.
    Accounts(String),
}

impl SearchTarget {
    pub fn parse(query: &str) -> Self {
        let query = query.trim();
        match query.strip_prefix('#') {
            Some(tag) => Self::Tags(tag.trim().to_lowercase()),
            None => Self::Accounts(query.to_string()),
        }
    }
}

/// Render the text of a notification.
pub fn render_notification(
    kind: NotificationKind,
    actor: &str,
    recipe_title: Option<&str>,
) -> String {
    match (kind, recipe_title) {
        (NotificationKind::Like, Some(title)) => format!("{actor} liked your recipe '{title}'."),
        (NotificationKind::Like, None) => format!("{actor} liked your recipe."),
        (NotificationKind::Follow, _) => format!("{actor} started following you."),
        (NotificationKind::Message, Some(title)) => {
            format!("{actor} shared the recipe '{title}' with you.")
        }
        (NotificationKind::Message, None) => format!("{actor} sent you a message."),
    }
}
