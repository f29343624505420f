use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn following_twice_toggles_the_edge_off() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    app.follow(&alice, bob.id).await;
    let profile = app.get_with_token(routes::PROFILE, &alice.token).await;
    assert_eq!(profile.body["following_count"], 1);

    let res = app
        .post_with_token(&routes::follow(bob.id), &json!({}), &alice.token)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["status"], "unfollowed");

    let profile = app.get_with_token(routes::PROFILE, &alice.token).await;
    assert_eq!(profile.body["following_count"], 0);
}

#[tokio::test]
async fn cannot_follow_yourself() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;

    let res = app
        .post_with_token(&routes::follow(alice.id), &json!({}), &alice.token)
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "INVALID_OPERATION");
    let profile = app.get_with_token(routes::PROFILE, &alice.token).await;
    assert_eq!(profile.body["following_count"], 0);
}

#[tokio::test]
async fn following_an_unknown_account_is_not_found() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;

    let res = app
        .post_with_token(&routes::follow(9999), &json!({}), &alice.token)
        .await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn unfollow_is_idempotent() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    app.follow(&alice, bob.id).await;

    for _ in 0..2 {
        let res = app
            .post_with_token(&routes::unfollow(bob.id), &json!({}), &alice.token)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["status"], "unfollowed");
    }

    let public = app.get_with_token(&routes::user(bob.id), &alice.token).await;
    assert_eq!(public.body["is_following"], false);
    assert_eq!(public.body["follower_count"], 0);
}

#[tokio::test]
async fn follow_notifies_the_target() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    app.follow(&alice, bob.id).await;

    let res = app.get_with_token(routes::NOTIFICATIONS, &bob.token).await;
    assert_eq!(res.status, 200, "{}", res.text);
    let list = res.body["notifications"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["kind"], "follow");
    assert_eq!(list[0]["actor_id"], alice.id);
    assert_eq!(list[0]["message"], "alice started following you.");
}

#[tokio::test]
async fn public_profile_reports_follow_state() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    app.follow(&alice, bob.id).await;

    let res = app.get_with_token(&routes::user(bob.id), &alice.token).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["is_following"], true);
    assert_eq!(res.body["follower_count"], 1);
    assert_eq!(res.body["following_count"], 0);
    assert!(res.body["account"].get("email").is_none());
}

#[tokio::test]
async fn concurrent_follows_keep_one_edge_and_one_notification() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let path = routes::follow(bob.id);
    let body = json!({});

    let (first, second) = tokio::join!(
        app.post_with_token(&path, &body, &alice.token),
        app.post_with_token(&path, &body, &alice.token),
    );
    assert_eq!(first.status, 200, "{}", first.text);
    assert_eq!(second.status, 200, "{}", second.text);

    let profile = app.get_with_token(routes::PROFILE, &bob.token).await;
    let followers = profile.body["follower_count"].as_i64().unwrap();
    assert!(followers <= 1, "follower_count was {followers}");

    let res = app.get_with_token(routes::NOTIFICATIONS, &bob.token).await;
    let follows_noted = res.body["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|n| n["kind"] == "follow")
        .count();
    assert_eq!(follows_noted, 1);
}
