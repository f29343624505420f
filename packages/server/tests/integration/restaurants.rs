use chrono::{Duration, Utc};
use serde_json::json;

use crate::common::{TestApp, routes};

fn offer_body(title: &str) -> serde_json::Value {
    let today = Utc::now().date_naive();
    json!({
        "title": title,
        "description": "Two for one",
        "start_date": today,
        "end_date": today + Duration::days(7),
    })
}

mod dashboard {
    use super::*;

    #[tokio::test]
    async fn pending_restaurant_is_not_approved() {
        let app = TestApp::spawn().await;
        let bob = app.create_restaurant("bob", "Bob's").await;

        let res = app
            .get_with_token(routes::RESTAURANT_DASHBOARD, &bob.token)
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "RESTAURANT_NOT_APPROVED");
    }

    #[tokio::test]
    async fn plain_account_is_denied() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;

        let res = app
            .get_with_token(routes::RESTAURANT_DASHBOARD, &alice.token)
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn approved_restaurant_sees_its_recipes_and_offers() {
        let app = TestApp::spawn().await;
        let bistro = app.create_approved_restaurant("bistro", "Le Bistro").await;
        app.create_recipe(&bistro.token, "House Stew").await;
        app.post_with_token(routes::OFFERS, &offer_body("Lunch deal"), &bistro.token)
            .await;

        let res = app
            .get_with_token(routes::RESTAURANT_DASHBOARD, &bistro.token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["account"]["is_approved"], true);
        assert_eq!(res.body["recipes"][0]["title"], "House Stew");
        assert_eq!(res.body["offers"][0]["title"], "Lunch deal");
    }
}

mod offers {
    use super::*;

    #[tokio::test]
    async fn plain_account_cannot_create_offers() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;

        let res = app
            .post_with_token(routes::OFFERS, &offer_body("Deal"), &alice.token)
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn end_before_start_is_rejected() {
        let app = TestApp::spawn().await;
        let bistro = app.create_approved_restaurant("bistro", "Le Bistro").await;
        let today = Utc::now().date_naive();

        let res = app
            .post_with_token(
                routes::OFFERS,
                &json!({
                    "title": "Backwards",
                    "description": "Odd dates",
                    "start_date": today,
                    "end_date": today - Duration::days(1),
                }),
                &bistro.token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn deactivated_offer_is_hidden_from_promotions() {
        let app = TestApp::spawn().await;
        let bistro = app.create_approved_restaurant("bistro", "Le Bistro").await;
        let alice = app.create_user("alice").await;
        let id = app
            .post_with_token(routes::OFFERS, &offer_body("Deal"), &bistro.token)
            .await
            .id();

        let visible = app.get_with_token(&routes::promotion(id), &alice.token).await;
        assert_eq!(visible.status, 200, "{}", visible.text);

        let res = app
            .patch_with_token(&routes::offer(id), &json!({"is_active": false}), &bistro.token)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["is_active"], false);

        let hidden = app.get_with_token(&routes::promotion(id), &alice.token).await;
        assert_eq!(hidden.status, 404);
    }

    #[tokio::test]
    async fn only_the_owner_can_edit_an_offer() {
        let app = TestApp::spawn().await;
        let bistro = app.create_approved_restaurant("bistro", "Le Bistro").await;
        let rival = app.create_approved_restaurant("rival", "Rival").await;
        let id = app
            .post_with_token(routes::OFFERS, &offer_body("Deal"), &bistro.token)
            .await
            .id();

        let res = app
            .patch_with_token(&routes::offer(id), &json!({"title": "Stolen"}), &rival.token)
            .await;

        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn public_profile_lists_active_offers() {
        let app = TestApp::spawn().await;
        let bistro = app.create_approved_restaurant("bistro", "Le Bistro").await;
        let alice = app.create_user("alice").await;
        app.post_with_token(routes::OFFERS, &offer_body("Deal"), &bistro.token)
            .await;

        let res = app.get_with_token(&routes::user(bistro.id), &alice.token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["account"]["display_name"], "Le Bistro");
        assert_eq!(res.body["offers"][0]["title"], "Deal");
    }
}
