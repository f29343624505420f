use ladle_common::{Difficulty, split_lines};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// One ingredient per line.
    #[sea_orm(column_type = "Text")]
    pub ingredients: String,
    /// One step per line.
    #[sea_orm(column_type = "Text")]
    pub instructions: String,
    pub cook_time: i32, // in minutes
    pub servings: i32,
    pub difficulty: Difficulty,
    pub image: Option<String>,
    /// Only restaurant authors may set this.
    #[sea_orm(default_value = false, indexed)]
    pub is_promoted: bool,

    pub author_id: i32,
    #[sea_orm(belongs_to, from = "author_id", to = "id")]
    pub author: HasOne<super::account::Entity>,

    #[sea_orm(has_many)]
    pub comments: HasMany<super::comment::Entity>,

    #[sea_orm(indexed)]
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn ingredient_list(&self) -> Vec<String> {
        split_lines(&self.ingredients)
    }

    pub fn instruction_list(&self) -> Vec<String> {
        split_lines(&self.instructions)
    }

    pub fn total_time(&self) -> i32 {
        self.cook_time
    }
}
