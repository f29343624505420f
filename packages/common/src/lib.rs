pub mod account;
pub mod recipe;
pub mod social;

use thiserror::Error;

pub use account::{AccountKind, HomeView, NameParts, split_full_name};
pub use recipe::{Difficulty, MAX_TAG_LEN, normalize_tags, parse_tag_input, split_lines};
pub use social::{
    FEED_SLICE_LEN, FollowStatus, NotificationKind, SearchTarget, render_notification,
};

/// Error when parsing an unknown enum string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {what} '{invalid}'. Valid values: {valid}")]
pub struct ParseEnumError {
    what: &'static str,
    invalid: String,
    valid: String,
}

impl ParseEnumError {
    pub(crate) fn new<'a>(
        what: &'static str,
        invalid: &str,
        valid: impl Iterator<Item = &'a str>,
    ) -> Self {
        Self {
            what,
            invalid: invalid.to_string(),
            valid: valid.collect::<Vec<_>>().join(", "),
        }
    }
}
