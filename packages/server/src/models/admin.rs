use chrono::{DateTime, Utc};
use ladle_common::AccountKind;
use serde::Serialize;

use crate::entity::account;

use super::account::AccountDetail;
use super::offer::OfferResponse;
use super::recipe::RecipeSummary;

/// Account row on the administrator dashboard. Includes the email.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AdminAccountRow {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub kind: AccountKind,
    pub is_admin: bool,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<account::Model> for AdminAccountRow {
    fn from(m: account::Model) -> Self {
        Self {
            display_name: m.display_name(),
            id: m.id,
            username: m.username,
            email: m.email,
            kind: m.kind,
            is_admin: m.is_admin,
            is_approved: m.is_approved,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AdminDashboardResponse {
    pub users: Vec<AdminAccountRow>,
    pub approved_restaurants: Vec<AdminAccountRow>,
    pub pending_restaurants: Vec<AdminAccountRow>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ApproveResponse {
    pub id: i32,
    pub is_approved: bool,
}

/// An approved restaurant's own workspace.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RestaurantDashboardResponse {
    pub account: AccountDetail,
    pub recipes: Vec<RecipeSummary>,
    /// Newest start date first.
    pub offers: Vec<OfferResponse>,
    pub unread_notifications: u64,
}
