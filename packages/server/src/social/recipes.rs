//! Recipe card assembly and tag bookkeeping.

use std::collections::HashMap;

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entity::{account, recipe, recipe_like, recipe_tag, tag};
use crate::models::account::AccountSummary;
use crate::models::recipe::RecipeSummary;

/// Build recipe cards, preserving input order.
///
/// Authors, tags and like counts are each fetched in one batch query.
pub async fn summarize<C: ConnectionTrait>(
    conn: &C,
    recipes: Vec<recipe::Model>,
) -> Result<Vec<RecipeSummary>, DbErr> {
    if recipes.is_empty() {
        return Ok(Vec::new());
    }

    let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
    let mut author_ids: Vec<i32> = recipes.iter().map(|r| r.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let authors: HashMap<i32, AccountSummary> = account::Entity::find()
        .filter(account::Column::Id.is_in(author_ids))
        .all(conn)
        .await?
        .iter()
        .map(|a| (a.id, AccountSummary::from(a)))
        .collect();
    let mut tags = tag_names_for(conn, &recipe_ids).await?;
    let likes = like_counts(conn, &recipe_ids).await?;

    let mut out = Vec::with_capacity(recipes.len());
    for r in recipes {
        let Some(author) = authors.get(&r.author_id).cloned() else {
            return Err(DbErr::RecordNotFound(format!(
                "author {} of recipe {}",
                r.author_id, r.id
            )));
        };
        out.push(RecipeSummary {
            tags: tags.remove(&r.id).unwrap_or_default(),
            likes_count: likes.get(&r.id).copied().unwrap_or(0),
            id: r.id,
            title: r.title,
            description: r.description,
            cook_time: r.cook_time,
            servings: r.servings,
            difficulty: r.difficulty,
            image: r.image,
            is_promoted: r.is_promoted,
            author,
            created_at: r.created_at,
            updated_at: r.updated_at,
        });
    }
    Ok(out)
}

pub async fn summarize_one<C: ConnectionTrait>(
    conn: &C,
    recipe: recipe::Model,
) -> Result<RecipeSummary, DbErr> {
    summarize(conn, vec![recipe])
        .await?
        .pop()
        .ok_or_else(|| DbErr::Custom("recipe summary missing".into()))
}

/// Tag names per recipe, alphabetical.
pub async fn tag_names_for<C: ConnectionTrait>(
    conn: &C,
    recipe_ids: &[i32],
) -> Result<HashMap<i32, Vec<String>>, DbErr> {
    let rows: Vec<(i32, String)> = recipe_tag::Entity::find()
        .select_only()
        .column(recipe_tag::Column::RecipeId)
        .column_as(tag::Column::Name, "name")
        .inner_join(tag::Entity)
        .filter(recipe_tag::Column::RecipeId.is_in(recipe_ids.iter().copied()))
        .order_by_asc(tag::Column::Name)
        .into_tuple()
        .all(conn)
        .await?;

    let mut map: HashMap<i32, Vec<String>> = HashMap::new();
    for (recipe_id, name) in rows {
        map.entry(recipe_id).or_default().push(name);
    }
    Ok(map)
}

pub async fn like_counts<C: ConnectionTrait>(
    conn: &C,
    recipe_ids: &[i32],
) -> Result<HashMap<i32, u64>, DbErr> {
    let rows: Vec<(i32, i64)> = recipe_like::Entity::find()
        .select_only()
        .column(recipe_like::Column::RecipeId)
        .column_as(recipe_like::Column::AccountId.count(), "likes")
        .filter(recipe_like::Column::RecipeId.is_in(recipe_ids.iter().copied()))
        .group_by(recipe_like::Column::RecipeId)
        .into_tuple()
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, n)| (id, u64::try_from(n).unwrap_or(0)))
        .collect())
}

/// Look up a tag by name, creating it if needed.
pub async fn get_or_create_tag<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<tag::Model, DbErr> {
    let model = tag::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };
    match tag::Entity::insert(model)
        .on_conflict(OnConflict::column(tag::Column::Name).do_nothing().to_owned())
        .exec_without_returning(conn)
        .await
    {
        Ok(_) | Err(DbErr::RecordNotInserted) => {}
        Err(e) => return Err(e),
    }

    tag::Entity::find()
        .filter(tag::Column::Name.eq(name))
        .one(conn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("tag '{name}'")))
}

/// Replace the tag set of a recipe. `names` must already be normalized.
pub async fn set_tags<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    names: &[String],
) -> Result<(), DbErr> {
    recipe_tag::Entity::delete_many()
        .filter(recipe_tag::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await?;

    if names.is_empty() {
        return Ok(());
    }

    let mut links = Vec::with_capacity(names.len());
    for name in names {
        let tag = get_or_create_tag(conn, name).await?;
        links.push(recipe_tag::ActiveModel {
            recipe_id: Set(recipe_id),
            tag_id: Set(tag.id),
            ..Default::default()
        });
    }
    recipe_tag::Entity::insert_many(links)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub async fn has_liked<C: ConnectionTrait>(
    conn: &C,
    account_id: i32,
    recipe_id: i32,
) -> Result<bool, DbErr> {
    let n = recipe_like::Entity::find()
        .filter(recipe_like::Column::AccountId.eq(account_id))
        .filter(recipe_like::Column::RecipeId.eq(recipe_id))
        .count(conn)
        .await?;
    Ok(n > 0)
}

/// Recipes by one author, newest first.
pub async fn by_author<C: ConnectionTrait>(
    conn: &C,
    author_id: i32,
) -> Result<Vec<recipe::Model>, DbErr> {
    recipe::Entity::find()
        .filter(recipe::Column::AuthorId.eq(author_id))
        .order_by_desc(recipe::Column::CreatedAt)
        .order_by_desc(recipe::Column::Id)
        .all(conn)
        .await
}
