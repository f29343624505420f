use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn text_message_reaches_the_recipient() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    let res = app
        .post_with_token(
            &routes::conversation(bob.id),
            &json!({"text": "hi"}),
            &alice.token,
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["body"], "hi");
    assert_eq!(res.body["sender_id"], alice.id);

    let thread = app
        .get_with_token(&routes::conversation(alice.id), &bob.token)
        .await;
    assert_eq!(thread.status, 200, "{}", thread.text);
    assert_eq!(thread.body["counterpart"]["id"], alice.id);
    let messages = thread.body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["body"], "hi");

    let notes = app.get_with_token(routes::NOTIFICATIONS, &bob.token).await;
    assert_eq!(
        notes.body["notifications"][0]["message"],
        "alice sent you a message."
    );
}

#[tokio::test]
async fn empty_message_without_recipe_is_rejected() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;

    let res = app
        .post_with_token(
            &routes::conversation(bob.id),
            &json!({"text": "   "}),
            &alice.token,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "INVALID_OPERATION");
}

#[tokio::test]
async fn cannot_message_yourself() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;

    let res = app
        .post_with_token(
            &routes::conversation(alice.id),
            &json!({"text": "note to self"}),
            &alice.token,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "INVALID_OPERATION");
}

#[tokio::test]
async fn messaging_an_unknown_account_is_not_found() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;

    let res = app
        .post_with_token(
            &routes::conversation(777),
            &json!({"text": "hello?"}),
            &alice.token,
        )
        .await;

    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn sharing_a_recipe_quotes_its_title() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let pasta = app.create_recipe(&alice.token, "Pasta").await;

    let res = app
        .post_with_token(
            &routes::share(pasta),
            &json!({"recipient_id": bob.id}),
            &alice.token,
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["recipe_id"], pasta);

    let notes = app.get_with_token(routes::NOTIFICATIONS, &bob.token).await;
    let first = &notes.body["notifications"][0];
    assert_eq!(first["kind"], "message");
    assert_eq!(first["recipe_id"], pasta);
    assert_eq!(first["message"], "alice shared the recipe 'Pasta' with you.");
}

#[tokio::test]
async fn inbox_groups_threads_and_counts_unread() {
    let app = TestApp::spawn().await;
    let alice = app.create_user("alice").await;
    let bob = app.create_user("bob").await;
    let carol = app.create_user("carol").await;

    for text in ["one", "two"] {
        app.post_with_token(
            &routes::conversation(alice.id),
            &json!({"text": text}),
            &bob.token,
        )
        .await;
    }
    app.post_with_token(
        &routes::conversation(alice.id),
        &json!({"text": "from carol"}),
        &carol.token,
    )
    .await;

    let inbox = app.get_with_token(routes::INBOX, &alice.token).await;
    assert_eq!(inbox.status, 200, "{}", inbox.text);
    let threads = inbox.body["conversations"].as_array().unwrap();
    assert_eq!(threads.len(), 2);
    assert_eq!(threads[0]["counterpart"]["id"], carol.id);
    assert_eq!(threads[0]["last_message"], "from carol");
    assert_eq!(threads[1]["counterpart"]["id"], bob.id);
    assert_eq!(threads[1]["last_message"], "two");
    assert_eq!(threads[1]["unread_count"], 2);

    app.get_with_token(&routes::conversation(bob.id), &alice.token)
        .await;
    let inbox = app.get_with_token(routes::INBOX, &alice.token).await;
    assert_eq!(inbox.body["conversations"][1]["unread_count"], 0);
}
