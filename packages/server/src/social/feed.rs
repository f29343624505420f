use chrono::NaiveDate;
use ladle_common::{AccountKind, FEED_SLICE_LEN};
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::entity::{account, recipe, special_offer};

use super::follow::FollowService;

/// Raw feed contents before they are turned into response cards.
#[derive(Debug)]
pub struct Feed {
    pub recipes: Vec<recipe::Model>,
    pub promoted: Vec<recipe::Model>,
    pub offers: Vec<special_offer::Model>,
    pub suggested: Vec<account::Model>,
    pub followed_ids: Vec<i32>,
}

pub struct FeedService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> FeedService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// The viewer's following set plus the viewer.
    async fn visible_authors(&self, viewer_id: i32) -> Result<(Vec<i32>, Vec<i32>), DbErr> {
        let followed = FollowService::new(self.conn).following_ids(viewer_id).await?;
        let mut visible = followed.clone();
        visible.push(viewer_id);
        Ok((followed, visible))
    }

    pub async fn compute_feed(&self, viewer_id: i32, today: NaiveDate) -> Result<Feed, DbErr> {
        let (followed_ids, visible) = self.visible_authors(viewer_id).await?;

        let recipes = recipe::Entity::find()
            .filter(recipe::Column::AuthorId.is_in(visible))
            .order_by_desc(recipe::Column::CreatedAt)
            .order_by_desc(recipe::Column::Id)
            .all(self.conn)
            .await?;

        let promoted = recipe::Entity::find()
            .filter(recipe::Column::IsPromoted.eq(true))
            .order_by_desc(recipe::Column::UpdatedAt)
            .order_by_desc(recipe::Column::Id)
            .limit(FEED_SLICE_LEN)
            .all(self.conn)
            .await?;

        let offers = special_offer::Entity::find()
            .filter(special_offer::Column::IsActive.eq(true))
            .filter(special_offer::Column::EndDate.gte(today))
            .filter(
                special_offer::Column::RestaurantId.in_subquery(
                    SeaQuery::select()
                        .column(account::Column::Id)
                        .from(account::Entity)
                        .and_where(account::Column::Kind.eq(AccountKind::Restaurant))
                        .and_where(account::Column::IsApproved.eq(true))
                        .to_owned(),
                ),
            )
            .order_by_desc(special_offer::Column::StartDate)
            .order_by_desc(special_offer::Column::Id)
            .limit(FEED_SLICE_LEN)
            .all(self.conn)
            .await?;

        let suggested = account::Entity::find()
            .filter(account::Column::Id.ne(viewer_id))
            .order_by_asc(account::Column::Id)
            .limit(FEED_SLICE_LEN)
            .all(self.conn)
            .await?;

        Ok(Feed {
            recipes,
            promoted,
            offers,
            suggested,
            followed_ids,
        })
    }

    /// Recipes by anyone outside the viewer's following set, newest first.
    pub async fn compute_explore(&self, viewer_id: i32) -> Result<Vec<recipe::Model>, DbErr> {
        let (_, visible) = self.visible_authors(viewer_id).await?;

        recipe::Entity::find()
            .filter(recipe::Column::AuthorId.is_not_in(visible))
            .order_by_desc(recipe::Column::CreatedAt)
            .order_by_desc(recipe::Column::Id)
            .all(self.conn)
            .await
    }
}
