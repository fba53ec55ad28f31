//! Follow graph and like toggle properties.

mod common;

use common::{register, setup};
use devnet_service::graph::LikeOutcome;
use devnet_service::post::PostInput;
use devnet_service::{Error, Mutation, Query};
use entity::prelude::UserFollow;
use pretty_assertions::assert_eq;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

async fn make_post(db: &DatabaseConnection, author: i32) -> i32 {
    Mutation::create_post(
        db,
        author,
        PostInput {
            content: "hello".to_owned(),
            group_id: None,
            hashtags: None,
        },
    )
    .await
    .unwrap()
    .post
    .id
}

#[tokio::test]
async fn follow_is_idempotent() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;
    let bob = register(&db, "bob@example.com").await;

    let message = Mutation::follow(&db, alice.id, bob.id).await.unwrap();
    assert_eq!(message, "You are now following Test User");
    Mutation::follow(&db, alice.id, bob.id).await.unwrap();

    assert_eq!(UserFollow::find().count(&db).await.unwrap(), 1);

    let following = Query::following(&db, alice.id).await.unwrap();
    assert_eq!(following.len(), 1);
    assert_eq!(following[0].id, bob.id);
    assert!(Query::followers(&db, alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn follow_edges_are_directed() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;
    let bob = register(&db, "bob@example.com").await;

    Mutation::follow(&db, alice.id, bob.id).await.unwrap();

    let bobs_followers = Query::followers(&db, bob.id).await.unwrap();
    assert_eq!(bobs_followers.len(), 1);
    assert_eq!(bobs_followers[0].id, alice.id);
    assert!(Query::following(&db, bob.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn following_yourself_is_rejected() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;

    let err = Mutation::follow(&db, alice.id, alice.id).await.unwrap_err();
    assert!(matches!(err, Error::SelfReference));
    assert_eq!(UserFollow::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn following_a_missing_user_is_not_found() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;

    let err = Mutation::follow(&db, alice.id, 9999).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn unfollowing_yourself_is_a_noop() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;
    let bob = register(&db, "bob@example.com").await;
    Mutation::follow(&db, alice.id, bob.id).await.unwrap();

    // The self edge can never exist, so this succeeds like any other
    // absent-edge removal and touches nothing.
    Mutation::unfollow(&db, alice.id, alice.id).await.unwrap();
    assert_eq!(UserFollow::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn unfollow_of_an_absent_edge_is_a_noop() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;
    let bob = register(&db, "bob@example.com").await;

    Mutation::unfollow(&db, alice.id, bob.id).await.unwrap();

    Mutation::follow(&db, alice.id, bob.id).await.unwrap();
    Mutation::unfollow(&db, alice.id, bob.id).await.unwrap();
    Mutation::unfollow(&db, alice.id, bob.id).await.unwrap();
    assert_eq!(UserFollow::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn like_toggles_and_count_is_computed() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;
    let bob = register(&db, "bob@example.com").await;
    let post_id = make_post(&db, alice.id).await;

    let liked = Mutation::toggle_like(&db, bob.id, post_id).await.unwrap();
    assert_eq!(liked.outcome, LikeOutcome::Liked);
    assert_eq!(liked.like_count, 1);

    let also_liked = Mutation::toggle_like(&db, alice.id, post_id).await.unwrap();
    assert_eq!(also_liked.like_count, 2);

    let unliked = Mutation::toggle_like(&db, bob.id, post_id).await.unwrap();
    assert_eq!(unliked.outcome, LikeOutcome::Unliked);
    assert_eq!(unliked.like_count, 1);

    assert_eq!(Query::like_count(&db, post_id).await.unwrap(), 1);
    let likers = Query::likers(&db, post_id).await.unwrap();
    assert_eq!(likers.len(), 1);
    assert_eq!(likers[0].id, alice.id);
}

#[tokio::test]
async fn liking_a_missing_post_is_not_found() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;

    let err = Mutation::toggle_like(&db, alice.id, 404).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
