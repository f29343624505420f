use chrono::{DateTime, Utc};
use ladle_common::{Difficulty, MAX_TAG_LEN, normalize_tags, parse_tag_input};
use serde::{Deserialize, Serialize};

use crate::entity::comment;
use crate::error::AppError;

use super::account::AccountSummary;
use super::shared::{double_option, validate_len, validate_optional_len};

/// Tags may be sent as `"pasta, quick"` or `["pasta", "quick"]`.
#[derive(Deserialize, Debug, Clone, utoipa::ToSchema)]
#[serde(untagged)]
pub enum TagInput {
    Text(String),
    List(Vec<String>),
}

impl TagInput {
    /// Normalized tag names.
    pub fn names(&self) -> Vec<String> {
        match self {
            TagInput::Text(s) => parse_tag_input(s),
            TagInput::List(items) => normalize_tags(items.iter().map(String::as_str)),
        }
    }
}

fn validate_tags(tags: Option<&TagInput>) -> Result<(), AppError> {
    let Some(tags) = tags else { return Ok(()) };
    let names = tags.names();
    if names.len() > 20 {
        return Err(AppError::Validation("At most 20 tags per recipe".into()));
    }
    if let Some(long) = names.iter().find(|n| n.chars().count() > MAX_TAG_LEN) {
        return Err(AppError::Validation(format!(
            "Tag '{long}' exceeds {MAX_TAG_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_counts(cook_time: Option<i32>, servings: Option<i32>) -> Result<(), AppError> {
    if let Some(t) = cook_time
        && !(0..=10_000).contains(&t)
    {
        return Err(AppError::Validation(
            "Cook time must be 0-10000 minutes".into(),
        ));
    }
    if let Some(s) = servings
        && !(1..=1_000).contains(&s)
    {
        return Err(AppError::Validation("Servings must be 1-1000".into()));
    }
    Ok(())
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateRecipeRequest {
    #[schema(example = "Weeknight Carbonara")]
    pub title: String,
    #[schema(example = "Silky, peppery and ready in twenty minutes.")]
    pub description: String,
    /// One ingredient per line.
    #[schema(example = "200g spaghetti\n2 eggs\n50g pecorino")]
    pub ingredients: String,
    /// One step per line.
    #[schema(example = "Boil pasta\nWhisk eggs and cheese\nToss together off the heat")]
    pub instructions: String,
    /// Minutes.
    #[schema(example = 20)]
    pub cook_time: i32,
    #[schema(example = 2)]
    pub servings: i32,
    pub difficulty: Difficulty,
    pub image: Option<String>,
    pub tags: Option<TagInput>,
    /// Restaurant accounts only.
    #[serde(default)]
    pub is_promoted: bool,
}

pub fn validate_create_recipe(payload: &CreateRecipeRequest) -> Result<(), AppError> {
    validate_len("Title", &payload.title, 1, 200)?;
    validate_len("Description", &payload.description, 1, 5000)?;
    validate_len("Ingredients", &payload.ingredients, 1, 10_000)?;
    validate_len("Instructions", &payload.instructions, 1, 20_000)?;
    validate_optional_len("Image", payload.image.as_deref(), 0, 500)?;
    validate_counts(Some(payload.cook_time), Some(payload.servings))?;
    validate_tags(payload.tags.as_ref())
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<Difficulty>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
    /// Replaces the whole tag set when present.
    pub tags: Option<TagInput>,
    pub is_promoted: Option<bool>,
}

pub fn validate_update_recipe(payload: &UpdateRecipeRequest) -> Result<(), AppError> {
    validate_optional_len("Title", payload.title.as_deref(), 1, 200)?;
    validate_optional_len("Description", payload.description.as_deref(), 1, 5000)?;
    validate_optional_len("Ingredients", payload.ingredients.as_deref(), 1, 10_000)?;
    validate_optional_len("Instructions", payload.instructions.as_deref(), 1, 20_000)?;
    validate_optional_len(
        "Image",
        payload.image.as_ref().and_then(|i| i.as_deref()),
        0,
        500,
    )?;
    validate_counts(payload.cook_time, payload.servings)?;
    validate_tags(payload.tags.as_ref())
}

/// Recipe card as shown in feeds, profiles and tag listings.
#[derive(Serialize, Clone, utoipa::ToSchema)]
pub struct RecipeSummary {
    #[schema(example = 12)]
    pub id: i32,
    #[schema(example = "Weeknight Carbonara")]
    pub title: String,
    pub description: String,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: Difficulty,
    pub image: Option<String>,
    pub is_promoted: bool,
    pub author: AccountSummary,
    #[schema(example = json!(["pasta", "quick"]))]
    pub tags: Vec<String>,
    /// Counted from like rows on every read.
    pub likes_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeDetailResponse {
    pub recipe: RecipeSummary,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Minutes.
    pub total_time: i32,
    /// Whether the caller likes this recipe.
    pub liked: bool,
    pub comments: Vec<CommentResponse>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeListResponse {
    pub recipes: Vec<RecipeSummary>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TaggedRecipesResponse {
    #[schema(example = "pasta")]
    pub tag: String,
    pub recipes: Vec<RecipeSummary>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct LikeResponse {
    pub liked: bool,
    #[schema(example = 3)]
    pub likes_count: u64,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateCommentRequest {
    #[schema(example = "Made this tonight, delicious!")]
    pub content: String,
}

pub fn validate_create_comment(payload: &CreateCommentRequest) -> Result<(), AppError> {
    validate_len("Comment", &payload.content, 1, 2000)
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CommentResponse {
    pub id: i32,
    pub recipe_id: i32,
    pub author: AccountSummary,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentResponse {
    pub fn new(model: comment::Model, author: AccountSummary) -> Self {
        Self {
            id: model.id,
            recipe_id: model.recipe_id,
            author,
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
}
