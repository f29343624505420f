use ladle_common::{AccountKind, NameParts};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string.
    pub password: String,

    /// Fixed at registration.
    #[sea_orm(indexed)]
    pub kind: AccountKind,
    #[sea_orm(default_value = false)]
    pub is_admin: bool,

    pub first_name: String,
    pub last_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    /// Reference returned by the media store.
    pub profile_picture: Option<String>,

    pub restaurant_name: Option<String>,
    pub restaurant_location: Option<String>,
    pub contact_number: Option<String>,
    pub opening_hours: Option<String>,
    /// Only meaningful for restaurants. Flipped by an administrator, never back.
    #[sea_orm(default_value = false)]
    pub is_approved: bool,

    #[sea_orm(has_many)]
    pub recipes: HasMany<super::recipe::Entity>,

    #[sea_orm(has_many)]
    pub offers: HasMany<super::special_offer::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn name_parts(&self) -> NameParts<'_> {
        NameParts {
            kind: self.kind,
            username: &self.username,
            first_name: &self.first_name,
            last_name: &self.last_name,
            restaurant_name: self.restaurant_name.as_deref(),
        }
    }

    pub fn display_name(&self) -> String {
        self.name_parts().display_name()
    }

    /// Restaurant whose features are unlocked.
    pub fn is_active_restaurant(&self) -> bool {
        self.kind.is_restaurant() && self.is_approved
    }
}
