//! Registration, credential checks and the bearer-token round trip.

mod common;

use common::{register, setup};
use devnet_service::profile::{RegisterInput, TagInput, UpdateProfileInput, WorkExperienceInput};
use devnet_service::{Error, Mutation, Query};
use pretty_assertions::assert_eq;
use uuid::Uuid;

#[tokio::test]
async fn registration_normalizes_the_email() {
    let db = setup().await;

    let profile = Mutation::register(
        &db,
        RegisterInput {
            email: "  Alice@Example.COM ".to_owned(),
            password: "secret-pass".to_owned(),
            first_name: "Alice".to_owned(),
            last_name: "Doe".to_owned(),
            tags: Some(vec![TagInput {
                name: "rust".to_owned(),
            }]),
        },
    )
    .await
    .unwrap();

    assert_eq!(profile.user.email, "alice@example.com");
    assert_eq!(profile.user.full_name(), "Alice Doe");
    assert!(profile.user.is_active);
    assert_eq!(profile.tags.len(), 1);
}

#[tokio::test]
async fn invalid_registrations_are_rejected() {
    let db = setup().await;

    let input = |email: &str, password: &str| RegisterInput {
        email: email.to_owned(),
        password: password.to_owned(),
        first_name: String::new(),
        last_name: String::new(),
        tags: None,
    };

    let err = Mutation::register(&db, input("not-an-email", "secret-pass"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = Mutation::register(&db, input("a@b.com", "tiny"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn duplicate_email_is_a_validation_error() {
    let db = setup().await;
    register(&db, "alice@example.com").await;

    let err = Mutation::register(
        &db,
        RegisterInput {
            email: "alice@example.com".to_owned(),
            password: "secret-pass".to_owned(),
            first_name: String::new(),
            last_name: String::new(),
            tags: None,
        },
    )
    .await
    .unwrap_err();

    match err {
        Error::Validation(message) => assert_eq!(message, "email is already registered"),
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn token_round_trip() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;

    let token = Mutation::create_token(&db, "alice@example.com", "secret-pass")
        .await
        .unwrap();

    let resolved = Query::user_by_token(&db, token).await.unwrap().unwrap();
    assert_eq!(resolved.id, alice.id);

    assert!(Query::user_by_token(&db, Uuid::new_v4())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
    let db = setup().await;
    register(&db, "alice@example.com").await;

    let err = Mutation::create_token(&db, "alice@example.com", "wrong-pass")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized));

    let err = Mutation::create_token(&db, "nobody@example.com", "secret-pass")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized));
}

#[tokio::test]
async fn profile_update_leaves_omitted_fields_alone() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;

    let profile = Mutation::update_profile(
        &db,
        alice.id,
        UpdateProfileInput {
            first_name: Some("Alicia".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(profile.user.first_name, "Alicia");
    assert_eq!(profile.user.last_name, "User");
    assert_eq!(profile.user.email, "alice@example.com");

    // The old password still works.
    Mutation::create_token(&db, "alice@example.com", "secret-pass")
        .await
        .unwrap();
}

#[tokio::test]
async fn password_change_invalidates_the_old_one() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;

    Mutation::update_profile(
        &db,
        alice.id,
        UpdateProfileInput {
            password: Some("new-secret".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let err = Mutation::create_token(&db, "alice@example.com", "secret-pass")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized));
    Mutation::create_token(&db, "alice@example.com", "new-secret")
        .await
        .unwrap();
}

#[tokio::test]
async fn work_experience_crud_is_owner_scoped() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;
    let bob = register(&db, "bob@example.com").await;

    let experience = Mutation::create_work_experience(
        &db,
        alice.id,
        WorkExperienceInput {
            business: "Acme".to_owned(),
            year: Some(2020),
            position: "engineer".to_owned(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(experience.user_id, alice.id);

    let err = Mutation::delete_work_experience(&db, bob.id, experience.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let listed = Query::work_experiences(&db, alice.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(Query::work_experiences(&db, bob.id).await.unwrap().is_empty());

    Mutation::delete_work_experience(&db, alice.id, experience.id)
        .await
        .unwrap();
    assert!(Query::work_experiences(&db, alice.id).await.unwrap().is_empty());
}
