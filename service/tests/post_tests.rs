//! Posts and hashtags: the default hashtag, per-author ownership and
//! the feed views.

mod common;

use common::{register, setup};
use devnet_service::post::{HashtagInput, PostInput, PostUpdateInput, DEFAULT_HASHTAG};
use devnet_service::{Error, Mutation, Query};
use entity::prelude::{Hashtag, Post};
use pretty_assertions::assert_eq;
use sea_orm::{EntityTrait, PaginatorTrait};

fn plain_post(content: &str) -> PostInput {
    PostInput {
        content: content.to_owned(),
        group_id: None,
        hashtags: None,
    }
}

#[tokio::test]
async fn hashtag_name_defaults_when_omitted() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;

    let detail = Mutation::create_post(
        &db,
        alice.id,
        PostInput {
            content: "hello".to_owned(),
            group_id: None,
            hashtags: Some(vec![HashtagInput { name: None }]),
        },
    )
    .await
    .unwrap();

    assert_eq!(detail.hashtags.len(), 1);
    assert_eq!(detail.hashtags[0].name, DEFAULT_HASHTAG);
}

#[tokio::test]
async fn hashtags_are_reused_per_author() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;

    let with_tag = || PostInput {
        content: "hello".to_owned(),
        group_id: None,
        hashtags: Some(vec![HashtagInput {
            name: Some("rustlang".to_owned()),
        }]),
    };

    let first = Mutation::create_post(&db, alice.id, with_tag()).await.unwrap();
    let second = Mutation::create_post(&db, alice.id, with_tag()).await.unwrap();

    assert_eq!(first.hashtags[0].id, second.hashtags[0].id);
    assert_eq!(Hashtag::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn add_hashtag_is_author_only() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;
    let bob = register(&db, "bob@example.com").await;

    let detail = Mutation::create_post(&db, alice.id, plain_post("hello"))
        .await
        .unwrap();

    let err = Mutation::add_hashtag(
        &db,
        bob.id,
        detail.post.id,
        HashtagInput {
            name: Some("spam".to_owned()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let attachment = Mutation::add_hashtag(&db, alice.id, detail.post.id, HashtagInput::default())
        .await
        .unwrap();
    assert_eq!(attachment.hashtag.name, DEFAULT_HASHTAG);
    assert_eq!(attachment.hashtag.user_id, alice.id);
}

#[tokio::test]
async fn reattaching_a_hashtag_reports_no_new_association() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;

    let detail = Mutation::create_post(&db, alice.id, plain_post("hello"))
        .await
        .unwrap();
    let input = || HashtagInput {
        name: Some("rustlang".to_owned()),
    };

    let first = Mutation::add_hashtag(&db, alice.id, detail.post.id, input())
        .await
        .unwrap();
    assert!(first.created);

    let second = Mutation::add_hashtag(&db, alice.id, detail.post.id, input())
        .await
        .unwrap();
    assert!(!second.created);
    assert_eq!(second.hashtag.id, first.hashtag.id);
    assert_eq!(Hashtag::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn empty_content_is_rejected() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;

    let err = Mutation::create_post(&db, alice.id, plain_post("   "))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(Post::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn feed_lists_only_the_callers_posts() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;
    let bob = register(&db, "bob@example.com").await;

    Mutation::create_post(&db, alice.id, plain_post("mine")).await.unwrap();
    Mutation::create_post(&db, bob.id, plain_post("theirs")).await.unwrap();

    let feed = Query::posts(&db, alice.id).await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].post.content, "mine");
    assert_eq!(feed[0].like_count, 0);
    assert!(!feed[0].liked);
}

#[tokio::test]
async fn detail_reports_the_callers_like_state() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;
    let bob = register(&db, "bob@example.com").await;

    let detail = Mutation::create_post(&db, alice.id, plain_post("hello"))
        .await
        .unwrap();
    Mutation::toggle_like(&db, bob.id, detail.post.id).await.unwrap();

    let as_bob = Query::post(&db, bob.id, detail.post.id).await.unwrap();
    assert!(as_bob.liked);
    assert_eq!(as_bob.like_count, 1);

    let as_alice = Query::post(&db, alice.id, detail.post.id).await.unwrap();
    assert!(!as_alice.liked);
    assert_eq!(as_alice.like_count, 1);
}

#[tokio::test]
async fn update_and_delete_are_author_scoped() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;
    let bob = register(&db, "bob@example.com").await;

    let detail = Mutation::create_post(&db, alice.id, plain_post("original"))
        .await
        .unwrap();
    let post_id = detail.post.id;

    let err = Mutation::update_post(
        &db,
        bob.id,
        post_id,
        PostUpdateInput {
            content: Some("defaced".to_owned()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = Mutation::delete_post(&db, bob.id, post_id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let updated = Mutation::update_post(
        &db,
        alice.id,
        post_id,
        PostUpdateInput {
            content: Some("edited".to_owned()),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.content, "edited");
    assert!(updated.updated >= updated.posted);

    Mutation::delete_post(&db, alice.id, post_id).await.unwrap();
    assert_eq!(Post::find().count(&db).await.unwrap(), 0);
}
