use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Direct message. Both directions between two accounts form one thread.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "message")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub sender_id: i32,
    #[sea_orm(belongs_to, relation_enum = "Sender", from = "sender_id", to = "id")]
    pub sender: HasOne<super::account::Entity>,

    pub recipient_id: i32,
    #[sea_orm(belongs_to, relation_enum = "Recipient", from = "recipient_id", to = "id")]
    pub recipient: HasOne<super::account::Entity>,

    /// May be empty when a recipe is attached.
    #[sea_orm(column_type = "Text")]
    pub body: String,

    pub recipe_id: Option<i32>,
    #[sea_orm(belongs_to, from = "recipe_id", to = "id")]
    pub recipe: Option<super::recipe::Entity>,

    #[sea_orm(default_value = false)]
    pub is_read: bool,
    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
