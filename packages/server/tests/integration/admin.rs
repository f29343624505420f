use serde_json::json;

use crate::common::{TestApp, routes};

fn ids(list: &serde_json::Value) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .filter_map(|a| a["id"].as_i64())
        .collect()
}

mod approval {
    use super::*;

    #[tokio::test]
    async fn approval_moves_a_restaurant_between_lists() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let bistro = app.create_restaurant("bistro", "Le Bistro").await;

        let before = app.get_with_token(routes::ADMIN_DASHBOARD, &admin.token).await;
        assert_eq!(before.status, 200, "{}", before.text);
        assert_eq!(ids(&before.body["pending_restaurants"]), vec![bistro.id as i64]);
        assert!(ids(&before.body["approved_restaurants"]).is_empty());

        let res = app
            .post_with_token(&routes::approve(bistro.id), &json!({}), &admin.token)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["is_approved"], true);

        let after = app.get_with_token(routes::ADMIN_DASHBOARD, &admin.token).await;
        assert!(ids(&after.body["pending_restaurants"]).is_empty());
        assert_eq!(ids(&after.body["approved_restaurants"]), vec![bistro.id as i64]);
    }

    #[tokio::test]
    async fn approving_twice_is_a_no_op() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let bistro = app.create_restaurant("bistro", "Le Bistro").await;

        for _ in 0..2 {
            let res = app
                .post_with_token(&routes::approve(bistro.id), &json!({}), &admin.token)
                .await;
            assert_eq!(res.status, 200, "{}", res.text);
        }
    }

    #[tokio::test]
    async fn plain_accounts_cannot_be_approved() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let alice = app.create_user("alice").await;

        let res = app
            .post_with_token(&routes::approve(alice.id), &json!({}), &admin.token)
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn non_admins_are_denied() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let bistro = app.create_restaurant("bistro", "Le Bistro").await;

        let dashboard = app.get_with_token(routes::ADMIN_DASHBOARD, &alice.token).await;
        assert_eq!(dashboard.status, 403);

        let res = app
            .post_with_token(&routes::approve(bistro.id), &json!({}), &alice.token)
            .await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn deleting_an_account_removes_what_it_owns() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let alice = app.create_user("alice").await;
        let bob = app.create_user("bob").await;
        app.follow(&alice, bob.id).await;
        app.follow(&bob, alice.id).await;
        let pasta = app.create_recipe(&bob.token, "Pasta").await;
        let soup = app.create_recipe(&alice.token, "Soup").await;
        app.post_with_token(&routes::recipe_like(soup), &json!({}), &bob.token)
            .await;
        app.post_with_token(
            &routes::conversation(alice.id),
            &json!({"text": "hi"}),
            &bob.token,
        )
        .await;

        let res = app
            .delete_with_token(&routes::admin_account(bob.id), &admin.token)
            .await;
        assert_eq!(res.status, 204, "{}", res.text);

        let gone = app.get_with_token(&routes::user(bob.id), &alice.token).await;
        assert_eq!(gone.status, 404);
        let recipe = app.get_with_token(&routes::recipe(pasta), &alice.token).await;
        assert_eq!(recipe.status, 404);

        let profile = app.get_with_token(routes::PROFILE, &alice.token).await;
        assert_eq!(profile.body["follower_count"], 0);
        assert_eq!(profile.body["following_count"], 0);
        assert_eq!(profile.body["recipes"][0]["likes_count"], 0);

        let inbox = app.get_with_token(routes::INBOX, &alice.token).await;
        assert!(inbox.body["conversations"].as_array().unwrap().is_empty());
        let notes = app.get_with_token(routes::NOTIFICATIONS, &alice.token).await;
        assert!(notes.body["notifications"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn admin_cannot_delete_themselves() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;

        let res = app
            .delete_with_token(&routes::admin_account(admin.id), &admin.token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "INVALID_OPERATION");
    }

    #[tokio::test]
    async fn deleted_account_token_stops_working_on_account_reads() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let alice = app.create_user("alice").await;

        app.delete_with_token(&routes::admin_account(alice.id), &admin.token)
            .await;

        let res = app.get_with_token(routes::PROFILE, &alice.token).await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn deleted_account_token_is_rejected_on_writes() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let alice = app.create_user("alice").await;
        let bob = app.create_user("bob").await;
        let pasta = app.create_recipe(&bob.token, "Pasta").await;

        app.delete_with_token(&routes::admin_account(alice.id), &admin.token)
            .await;

        let writes = [
            (routes::follow(bob.id), json!({})),
            (routes::unfollow(bob.id), json!({})),
            (routes::recipe_like(pasta), json!({})),
            (routes::conversation(bob.id), json!({"text": "hi"})),
            (routes::share(pasta), json!({"recipient_id": bob.id})),
            (routes::recipe_comments(pasta), json!({"content": "Yum"})),
        ];
        for (path, body) in &writes {
            let res = app.post_with_token(path, body, &alice.token).await;
            assert_eq!(res.status, 401, "{path}: {}", res.text);
            assert_eq!(res.body["code"], "TOKEN_INVALID");
        }
    }
}
