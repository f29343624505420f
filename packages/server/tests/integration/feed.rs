use chrono::{Duration, NaiveDate, Utc};
use serde_json::json;

use crate::common::{TestApp, routes, titles};

#[tokio::test]
async fn feed_shows_followed_authors_and_explore_shows_the_rest() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let carol = app.create_user("carol").await;
    app.follow(&alice, bob.id).await;
    app.create_recipe(&bob.token, "Pasta").await;
    app.create_recipe(&carol.token, "Salad").await;

    let feed = app.get_with_token(routes::FEED, &alice.token).await;
    assert_eq!(feed.status, 200, "{}", feed.text);
    assert_eq!(titles(&feed.body["recipes"]), vec!["Pasta"]);
    assert_eq!(feed.body["followed_ids"], json!([bob.id]));

    let explore = app.get_with_token(routes::EXPLORE, &alice.token).await;
    assert_eq!(explore.status, 200, "{}", explore.text);
    assert_eq!(titles(&explore.body["recipes"]), vec!["Salad"]);
}

#[tokio::test]
async fn feed_includes_own_recipes_newest_first() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    app.follow(&alice, bob.id).await;
    app.create_recipe(&alice.token, "Soup").await;
    app.create_recipe(&bob.token, "Pasta").await;

    let feed = app.get_with_token(routes::FEED, &alice.token).await;

    assert_eq!(titles(&feed.body["recipes"]), vec!["Pasta", "Soup"]);
    let explore = app.get_with_token(routes::EXPLORE, &alice.token).await;
    assert!(titles(&explore.body["recipes"]).is_empty());
}

#[tokio::test]
async fn promoted_recipes_appear_regardless_of_follows() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let bistro = app.create_approved_restaurant("bistro", "Le Bistro").await;
    app.create_recipe_with(
        &bistro.token,
        json!({"title": "Chef Special", "is_promoted": true}),
    )
    .await;

    let feed = app.get_with_token(routes::FEED, &alice.token).await;

    assert!(titles(&feed.body["recipes"]).is_empty());
    assert_eq!(titles(&feed.body["promoted"]), vec!["Chef Special"]);
}

#[tokio::test]
async fn plain_account_cannot_promote() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;

    let res = app
        .post_with_token(
            routes::RECIPES,
            &json!({
                "title": "Sneaky",
                "description": "Sneaky dish",
                "ingredients": "x",
                "instructions": "y",
                "cook_time": 1,
                "servings": 1,
                "difficulty": "easy",
                "is_promoted": true,
            }),
            &alice.token,
        )
        .await;

    assert_eq!(res.status, 403);
    assert_eq!(res.body["code"], "PERMISSION_DENIED");
}

#[tokio::test]
async fn only_live_offers_from_approved_restaurants_reach_the_feed() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let approved = app.create_approved_restaurant("bistro", "Le Bistro").await;
    let pending = app.create_restaurant("diner", "The Diner").await;

    let today = Utc::now().date_naive();
    let offer = |title: &str, start: NaiveDate, end: NaiveDate| {
        json!({
            "title": title,
            "description": "Deal",
            "start_date": start,
            "end_date": end,
        })
    };
    let live = app
        .post_with_token(
            routes::OFFERS,
            &offer("Half price", today - Duration::days(1), today + Duration::days(3)),
            &approved.token,
        )
        .await;
    assert_eq!(live.status, 201, "{}", live.text);
    let expired = app
        .post_with_token(
            routes::OFFERS,
            &offer("Old deal", today - Duration::days(10), today - Duration::days(5)),
            &approved.token,
        )
        .await;
    assert_eq!(expired.status, 201, "{}", expired.text);
    let unapproved = app
        .post_with_token(
            routes::OFFERS,
            &offer("Pending deal", today, today + Duration::days(3)),
            &pending.token,
        )
        .await;
    assert_eq!(unapproved.status, 201, "{}", unapproved.text);

    let feed = app.get_with_token(routes::FEED, &alice.token).await;

    assert_eq!(titles(&feed.body["offers"]), vec!["Half price"]);
}

#[tokio::test]
async fn suggestions_exclude_the_viewer() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    let feed = app.get_with_token(routes::FEED, &alice.token).await;

    let suggested: Vec<i64> = feed.body["suggested_accounts"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|a| a["id"].as_i64())
        .collect();
    assert_eq!(suggested, vec![bob.id as i64]);
}
