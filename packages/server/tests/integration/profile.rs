use serde_json::json;

use crate::common::{TestApp, routes};

fn usernames(list: &serde_json::Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .filter_map(|a| a["username"].as_str().map(str::to_string))
        .collect()
}

mod editing {
    use super::*;

    #[tokio::test]
    async fn plain_account_updates_name_and_bio() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;

        let res = app
            .patch_with_token(
                routes::PROFILE,
                &json!({"full_name": "Alice Waters", "bio": "I cook."}),
                &alice.token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["first_name"], "Alice");
        assert_eq!(res.body["last_name"], "Waters");
        assert_eq!(res.body["bio"], "I cook.");

        let cleared = app
            .patch_with_token(routes::PROFILE, &json!({"bio": null}), &alice.token)
            .await;
        assert_eq!(cleared.status, 200, "{}", cleared.text);
        assert!(cleared.body["bio"].is_null());
    }

    #[tokio::test]
    async fn renaming_to_a_taken_username_conflicts() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        app.create_user("bob").await;

        let res = app
            .patch_with_token(routes::PROFILE, &json!({"username": "bob"}), &alice.token)
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "USERNAME_TAKEN");
    }

    #[tokio::test]
    async fn restaurants_use_their_own_profile_endpoint() {
        let app = TestApp::spawn().await;
        let bistro = app.create_restaurant("bistro", "Le Bistro").await;

        let denied = app
            .patch_with_token(routes::PROFILE, &json!({"bio": "Hi"}), &bistro.token)
            .await;
        assert_eq!(denied.status, 403);

        let res = app
            .patch_with_token(
                routes::RESTAURANT_PROFILE,
                &json!({"restaurant_name": "Bistro Deux", "opening_hours": "9-5"}),
                &bistro.token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["display_name"], "Bistro Deux");
        assert_eq!(res.body["opening_hours"], "9-5");
    }
}

mod search {
    use super::*;

    #[tokio::test]
    async fn account_search_matches_substrings_and_skips_the_caller() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        app.create_user("alfred").await;
        app.create_user("bob").await;

        let res = app
            .get_with_token(&format!("{}?q=AL", routes::USER_SEARCH), &alice.token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(usernames(&res.body["results"]), vec!["alfred"]);
    }

    #[tokio::test]
    async fn empty_query_returns_nothing() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        app.create_user("bob").await;

        let res = app
            .get_with_token(&format!("{}?q=", routes::USER_SEARCH), &alice.token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["results"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn hash_prefix_searches_tags() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        app.create_user("pasta_fan").await;
        app.create_recipe_with(&alice.token, json!({"title": "Pasta", "tags": "pasta, pastry"}))
            .await;

        let tags = app
            .get_with_token(&format!("{}?query=%23PAST", routes::QUICK_SEARCH), &alice.token)
            .await;
        assert_eq!(tags.status, 200, "{}", tags.text);
        assert_eq!(tags.body["tags"], json!(["pasta", "pastry"]));
        assert!(tags.body["users"].as_array().unwrap().is_empty());

        let users = app
            .get_with_token(&format!("{}?query=pasta", routes::QUICK_SEARCH), &alice.token)
            .await;
        assert_eq!(usernames(&users.body["users"]), vec!["pasta_fan"]);
        assert!(users.body["tags"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn quick_search_includes_the_caller_and_is_not_capped() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        for i in 0..11 {
            app.create_user(&format!("alix{i}")).await;
        }

        let res = app
            .get_with_token(&format!("{}?query=ali", routes::QUICK_SEARCH), &alice.token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let found = usernames(&res.body["users"]);
        assert_eq!(found.len(), 12);
        assert!(found.contains(&"alice".to_string()));

        let capped = app
            .get_with_token(&format!("{}?q=ali", routes::USER_SEARCH), &alice.token)
            .await;
        let listed = usernames(&capped.body["results"]);
        assert_eq!(listed.len(), 10);
        assert!(!listed.contains(&"alice".to_string()));
    }
}
