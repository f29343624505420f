use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Time-boxed promotion published by a restaurant.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "special_offer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    #[sea_orm(default_value = true)]
    pub is_active: bool,

    pub restaurant_id: i32,
    #[sea_orm(belongs_to, from = "restaurant_id", to = "id")]
    pub restaurant: HasOne<super::account::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Active and not yet expired on `today`.
    pub fn is_live(&self, today: Date) -> bool {
        self.is_active && self.end_date >= today
    }
}
