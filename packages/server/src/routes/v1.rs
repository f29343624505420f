use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::{
    admin, auth, comment, messaging, notification, offer, profile, recipe, restaurant, social,
};
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(auth_routes())
        .merge(profile_routes())
        .merge(recipe_routes())
        .merge(social_routes())
        .merge(messaging_routes())
        .merge(restaurant_routes())
        .merge(admin_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(auth::register_user))
        .routes(routes!(auth::register_restaurant))
        .routes(routes!(auth::login))
        .routes(routes!(auth::me))
}

fn profile_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(profile::get_own_profile, profile::update_own_profile))
        .routes(routes!(profile::get_public_profile))
        .routes(routes!(profile::search_accounts))
        .routes(routes!(profile::quick_search))
}

fn recipe_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(recipe::create_recipe))
        .routes(routes!(
            recipe::get_recipe,
            recipe::update_recipe,
            recipe::delete_recipe
        ))
        .routes(routes!(recipe::toggle_like))
        .routes(routes!(recipe::list_tagged))
        .routes(routes!(comment::list_comments, comment::create_comment))
        .routes(routes!(comment::delete_comment))
}

fn social_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(social::toggle_follow))
        .routes(routes!(social::unfollow))
        .routes(routes!(social::get_feed))
        .routes(routes!(social::get_explore))
        .routes(routes!(notification::list_notifications))
        .routes(routes!(notification::unread_count))
}

fn messaging_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(messaging::get_inbox))
        .routes(routes!(
            messaging::get_conversation,
            messaging::send_message
        ))
        .routes(routes!(messaging::share_recipe))
}

fn restaurant_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(restaurant::get_dashboard))
        .routes(routes!(restaurant::update_profile))
        .routes(routes!(offer::create_offer))
        .routes(routes!(offer::update_offer))
        .routes(routes!(offer::get_promotion))
}

fn admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(admin::get_dashboard))
        .routes(routes!(admin::approve_restaurant))
        .routes(routes!(admin::delete_account))
}
