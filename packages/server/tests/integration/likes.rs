use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn liking_twice_restores_the_count() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let recipe = app.create_recipe(&bob.token, "Pasta").await;

    let first = app
        .post_with_token(&routes::recipe_like(recipe), &json!({}), &alice.token)
        .await;
    assert_eq!(first.status, 200, "{}", first.text);
    assert_eq!(first.body["liked"], true);
    assert_eq!(first.body["likes_count"], 1);

    let second = app
        .post_with_token(&routes::recipe_like(recipe), &json!({}), &alice.token)
        .await;
    assert_eq!(second.body["liked"], false);
    assert_eq!(second.body["likes_count"], 0);
}

#[tokio::test]
async fn like_notifies_the_author_once_and_unlike_keeps_it() {
    let app = TestApp::spawn().await;
    let dave = app.create_user("dave").await;
    let eve = app.create_user("eve").await;
    let tacos = app.create_recipe(&eve.token, "Tacos").await;

    app.post_with_token(&routes::recipe_like(tacos), &json!({}), &dave.token)
        .await;
    app.post_with_token(&routes::recipe_like(tacos), &json!({}), &dave.token)
        .await;

    let count = app.get_with_token(routes::UNREAD_COUNT, &eve.token).await;
    assert_eq!(count.body["unread_count"], 1);

    let res = app.get_with_token(routes::NOTIFICATIONS, &eve.token).await;
    let list = res.body["notifications"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["kind"], "like");
    assert_eq!(list[0]["actor_id"], dave.id);
    assert_eq!(list[0]["recipe_id"], tacos);
    assert_eq!(list[0]["message"], "dave liked your recipe 'Tacos'.");
}

#[tokio::test]
async fn liking_your_own_recipe_is_silent() {
    let app = TestApp::spawn().await;
    let eve = app.create_user("eve").await;
    let tacos = app.create_recipe(&eve.token, "Tacos").await;

    let res = app
        .post_with_token(&routes::recipe_like(tacos), &json!({}), &eve.token)
        .await;
    assert_eq!(res.body["liked"], true);

    let count = app.get_with_token(routes::UNREAD_COUNT, &eve.token).await;
    assert_eq!(count.body["unread_count"], 0);
}

#[tokio::test]
async fn reading_notifications_marks_them_read() {
    let app = TestApp::spawn().await;
    let dave = app.create_user("dave").await;
    let eve = app.create_user("eve").await;
    app.follow(&dave, eve.id).await;

    let first = app.get_with_token(routes::NOTIFICATIONS, &eve.token).await;
    assert_eq!(first.body["notifications"][0]["is_read"], false);

    let count = app.get_with_token(routes::UNREAD_COUNT, &eve.token).await;
    assert_eq!(count.body["unread_count"], 0);
    let second = app.get_with_token(routes::NOTIFICATIONS, &eve.token).await;
    assert_eq!(second.body["notifications"][0]["is_read"], true);
}

#[tokio::test]
async fn liking_a_missing_recipe_is_not_found() {
    let app = TestApp::spawn().await;
    let dave = app.create_user("dave").await;

    let res = app
        .post_with_token(&routes::recipe_like(4242), &json!({}), &dave.token)
        .await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn concurrent_likes_keep_one_row_and_one_notification() {
    let app = TestApp::spawn().await;
    let dave = app.create_user("dave").await;
    let eve = app.create_user("eve").await;
    let tacos = app.create_recipe(&eve.token, "Tacos").await;
    let path = routes::recipe_like(tacos);
    let body = json!({});

    let (first, second) = tokio::join!(
        app.post_with_token(&path, &body, &dave.token),
        app.post_with_token(&path, &body, &dave.token),
    );
    assert_eq!(first.status, 200, "{}", first.text);
    assert_eq!(second.status, 200, "{}", second.text);

    let detail = app.get_with_token(&routes::recipe(tacos), &eve.token).await;
    let likes = detail.body["recipe"]["likes_count"].as_i64().unwrap();
    assert!(likes <= 1, "likes_count was {likes}");

    let res = app.get_with_token(routes::NOTIFICATIONS, &eve.token).await;
    let likes_noted = res.body["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|n| n["kind"] == "like")
        .count();
    assert_eq!(likes_noted, 1);
}
