#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ParseEnumError;

/// Kind of a registered principal. Fixed at registration.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// An individual member.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "plain"))]
    Plain,
    /// A restaurant. Restaurant features unlock once an administrator approves it.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "restaurant"))]
    Restaurant,
}

impl AccountKind {
    pub const ALL: &'static [AccountKind] = &[Self::Plain, Self::Restaurant];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Restaurant => "restaurant",
        }
    }

    pub fn is_restaurant(&self) -> bool {
        matches!(self, Self::Restaurant)
    }

    /// Landing view a client should open after login.
    pub fn home(&self, is_admin: bool) -> HomeView {
        if is_admin {
            HomeView::AdminDashboard
        } else if self.is_restaurant() {
            HomeView::RestaurantDashboard
        } else {
            HomeView::Feed
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Self::Plain),
            "restaurant" => Ok(Self::Restaurant),
            _ => Err(ParseEnumError::new(
                "account kind",
                s,
                Self::ALL.iter().map(|k| k.as_str()),
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HomeView {
    AdminDashboard,
    RestaurantDashboard,
    Feed,
}

/// The name-bearing fields of an account.
#[derive(Clone, Copy, Debug)]
pub struct NameParts<'a> {
    pub kind: AccountKind,
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub restaurant_name: Option<&'a str>,
}

impl NameParts<'_> {
    /// Resolve the label shown to other accounts.
    ///
    /// Restaurant name for restaurants that set one, then the full name,
    /// then the username.
    pub fn display_name(&self) -> String {
        if self.kind.is_restaurant()
            && let Some(name) = self.restaurant_name.map(str::trim)
            && !name.is_empty()
        {
            return name.to_string();
        }
        let full = self.full_name();
        if full.is_empty() {
            self.username.to_string()
        } else {
            full
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// Split a free-form full name into `(first_name, last_name)`.
///
/// The first whitespace-separated token is the first name; the remaining
/// tokens, joined by single spaces, form the last name.
pub fn split_full_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}
