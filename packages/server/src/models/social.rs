use ladle_common::FollowStatus;
use serde::Serialize;

use super::account::AccountSummary;
use super::offer::OfferResponse;
use super::recipe::RecipeSummary;

#[derive(Serialize, utoipa::ToSchema)]
pub struct FollowResponse {
    pub status: FollowStatus,
}

/// Home feed for the caller.
#[derive(Serialize, utoipa::ToSchema)]
pub struct FeedResponse {
    /// Recipes by followed accounts and the caller, newest first.
    pub recipes: Vec<RecipeSummary>,
    /// Most recently updated promoted recipes, from anyone.
    pub promoted: Vec<RecipeSummary>,
    /// Live offers from approved restaurants.
    pub offers: Vec<OfferResponse>,
    pub suggested_accounts: Vec<AccountSummary>,
    /// Accounts the caller follows.
    #[schema(example = json!([2, 5]))]
    pub followed_ids: Vec<i32>,
}

/// Recipes by accounts the caller does not follow.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ExploreResponse {
    pub recipes: Vec<RecipeSummary>,
}
