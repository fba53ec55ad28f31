//! Notification persistence: recipient scoping, ordering and the read flag.

mod common;

use common::{register, setup};
use devnet_service::notification::NotificationInput;
use devnet_service::{Error, Mutation, Query};
use pretty_assertions::assert_eq;

fn input(recipient: i32, message: &str) -> NotificationInput {
    NotificationInput {
        recipient,
        message: message.to_owned(),
    }
}

#[tokio::test]
async fn notifications_are_recipient_scoped() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;
    let bob = register(&db, "bob@example.com").await;
    let carol = register(&db, "carol@example.com").await;

    Mutation::create_notification(&db, alice.id, input(bob.id, "for bob"))
        .await
        .unwrap();
    Mutation::create_notification(&db, alice.id, input(carol.id, "for carol"))
        .await
        .unwrap();

    let bobs = Query::notifications(&db, bob.id).await.unwrap();
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0].message, "for bob");
    assert_eq!(bobs[0].sender, alice.id);
    assert!(!bobs[0].is_read);

    assert!(Query::notifications(&db, alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_message_and_missing_recipient_are_rejected() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;

    let err = Mutation::create_notification(&db, alice.id, input(alice.id, "  "))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = Mutation::create_notification(&db, alice.id, input(9999, "hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn only_the_recipient_marks_a_notification_read() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;
    let bob = register(&db, "bob@example.com").await;

    let out = Mutation::create_notification(&db, alice.id, input(bob.id, "hello"))
        .await
        .unwrap();

    // The sender cannot flip the flag.
    let err = Mutation::mark_notification_read(&db, alice.id, out.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let read = Mutation::mark_notification_read(&db, bob.id, out.id)
        .await
        .unwrap();
    assert!(read.is_read);

    let listed = Query::notifications(&db, bob.id).await.unwrap();
    assert!(listed[0].is_read);
}

#[tokio::test]
async fn events_serialize_with_their_timestamp() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;
    let bob = register(&db, "bob@example.com").await;

    let out = Mutation::create_notification(&db, alice.id, input(bob.id, "hello"))
        .await
        .unwrap();

    // The wire shape the websocket path publishes verbatim.
    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(value["sender"], alice.id);
    assert_eq!(value["recipient"], bob.id);
    assert_eq!(value["message"], "hello");
    assert_eq!(value["is_read"], false);
    assert!(value["created_at"].is_string());
}

#[tokio::test]
async fn listing_is_newest_first() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;
    let bob = register(&db, "bob@example.com").await;

    for message in ["one", "two", "three"] {
        Mutation::create_notification(&db, alice.id, input(bob.id, message))
            .await
            .unwrap();
    }

    let listed = Query::notifications(&db, bob.id).await.unwrap();
    assert_eq!(listed.len(), 3);
    assert!(listed
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));
}
