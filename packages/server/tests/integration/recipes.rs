use serde_json::json;

use crate::common::{TestApp, routes, titles};

mod crud {
    use super::*;

    #[tokio::test]
    async fn created_recipe_exposes_lines_and_normalized_tags() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;

        let res = app
            .post_with_token(
                routes::RECIPES,
                &json!({
                    "title": "Pasta",
                    "description": "Weeknight dinner",
                    "ingredients": "pasta\n\n tomatoes \nbasil",
                    "instructions": "Boil water.\nCook pasta.",
                    "cook_time": 20,
                    "servings": 4,
                    "difficulty": "medium",
                    "tags": "Italian, quick ,,italian",
                }),
                &alice.token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["ingredients"], json!(["pasta", "tomatoes", "basil"]));
        assert_eq!(res.body["instructions"], json!(["Boil water.", "Cook pasta."]));
        assert_eq!(res.body["total_time"], 20);
        assert_eq!(res.body["liked"], false);
        assert_eq!(res.body["recipe"]["tags"], json!(["italian", "quick"]));
        assert_eq!(res.body["recipe"]["author"]["id"], alice.id);
        assert_eq!(res.body["recipe"]["likes_count"], 0);
    }

    #[tokio::test]
    async fn invalid_servings_are_rejected() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;

        let res = app
            .post_with_token(
                routes::RECIPES,
                &json!({
                    "title": "Pasta",
                    "description": "Plain",
                    "ingredients": "pasta",
                    "instructions": "cook",
                    "cook_time": 20,
                    "servings": 0,
                    "difficulty": "easy",
                }),
                &alice.token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn author_can_edit_and_replace_tags() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let id = app
            .create_recipe_with(&alice.token, json!({"title": "Pasta", "tags": ["old"]}))
            .await;

        let res = app
            .patch_with_token(
                &routes::recipe(id),
                &json!({"title": "Better Pasta", "tags": ["new", "Fresh"]}),
                &alice.token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["recipe"]["title"], "Better Pasta");
        assert_eq!(res.body["recipe"]["tags"], json!(["fresh", "new"]));

        let old = app.get_with_token(&routes::tagged("old"), &alice.token).await;
        assert_eq!(old.status, 200, "{}", old.text);
        assert!(titles(&old.body["recipes"]).is_empty());
    }

    #[tokio::test]
    async fn only_the_author_can_edit_or_delete() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let mallory = app.create_user("mallory").await;
        let id = app.create_recipe(&alice.token, "Pasta").await;

        let edit = app
            .patch_with_token(&routes::recipe(id), &json!({"title": "Mine"}), &mallory.token)
            .await;
        assert_eq!(edit.status, 403);
        assert_eq!(edit.body["code"], "PERMISSION_DENIED");

        let delete = app.delete_with_token(&routes::recipe(id), &mallory.token).await;
        assert_eq!(delete.status, 403);
    }

    #[tokio::test]
    async fn deleting_a_recipe_removes_its_likes_comments_and_shares() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let bob = app.create_user("bob").await;
        let id = app.create_recipe(&alice.token, "Pasta").await;
        app.post_with_token(&routes::recipe_like(id), &json!({}), &bob.token)
            .await;
        app.post_with_token(
            &routes::recipe_comments(id),
            &json!({"content": "Yum"}),
            &bob.token,
        )
        .await;
        app.post_with_token(&routes::share(id), &json!({"recipient_id": alice.id}), &bob.token)
            .await;

        let res = app.delete_with_token(&routes::recipe(id), &alice.token).await;
        assert_eq!(res.status, 204, "{}", res.text);

        let gone = app.get_with_token(&routes::recipe(id), &alice.token).await;
        assert_eq!(gone.status, 404);
        let thread = app
            .get_with_token(&routes::conversation(bob.id), &alice.token)
            .await;
        assert!(thread.body["messages"].as_array().unwrap().is_empty());
        let notes = app.get_with_token(routes::NOTIFICATIONS, &alice.token).await;
        assert!(notes.body["notifications"].as_array().unwrap().is_empty());
    }
}

mod tags {
    use super::*;

    #[tokio::test]
    async fn tag_listing_is_case_insensitive() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        app.create_recipe_with(&alice.token, json!({"title": "Pasta", "tags": "Italian"}))
            .await;
        app.create_recipe_with(&alice.token, json!({"title": "Pizza", "tags": "italian"}))
            .await;

        let res = app.get_with_token(&routes::tagged("ITALIAN"), &alice.token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["tag"], "italian");
        assert_eq!(titles(&res.body["recipes"]), vec!["Pizza", "Pasta"]);
    }

    #[tokio::test]
    async fn unknown_tag_is_not_found() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;

        let res = app.get_with_token(&routes::tagged("nothing"), &alice.token).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod comments {
    use super::*;

    #[tokio::test]
    async fn comments_are_listed_with_their_authors() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let bob = app.create_user("bob").await;
        let id = app.create_recipe(&alice.token, "Pasta").await;

        let res = app
            .post_with_token(
                &routes::recipe_comments(id),
                &json!({"content": "Looks great"}),
                &bob.token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["author"]["id"], bob.id);

        let list = app
            .get_with_token(&routes::recipe_comments(id), &alice.token)
            .await;
        assert_eq!(list.status, 200, "{}", list.text);
        assert_eq!(list.body["comments"][0]["content"], "Looks great");

        let detail = app.get_with_token(&routes::recipe(id), &alice.token).await;
        assert_eq!(detail.body["comments"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_comment_is_rejected() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let id = app.create_recipe(&alice.token, "Pasta").await;

        let res = app
            .post_with_token(&routes::recipe_comments(id), &json!({"content": ""}), &alice.token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn only_the_comment_author_can_delete_it() {
        let app = TestApp::spawn().await;
        let alice = app.create_user("alice").await;
        let bob = app.create_user("bob").await;
        let id = app.create_recipe(&alice.token, "Pasta").await;
        let comment = app
            .post_with_token(&routes::recipe_comments(id), &json!({"content": "Hi"}), &bob.token)
            .await
            .id();

        let denied = app.delete_with_token(&routes::comment(comment), &alice.token).await;
        assert_eq!(denied.status, 403);

        let ok = app.delete_with_token(&routes::comment(comment), &bob.token).await;
        assert_eq!(ok.status, 204, "{}", ok.text);
    }
}
