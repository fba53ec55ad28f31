//! Nested-relation write pipeline: idempotent child creation, ownership
//! isolation, partial-update and replacement semantics.

mod common;

use common::{register, setup};
use devnet_service::profile::{TagInput, UpdateProfileInput};
use devnet_service::project::{ProjectInput, ProjectUpdateInput, TechnologieInput};
use devnet_service::{Error, Mutation, Query};
use entity::prelude::{Project, Tag, Technologie};
use pretty_assertions::assert_eq;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

fn project_input(technologies: Vec<&str>) -> ProjectInput {
    ProjectInput {
        name: "P1".to_owned(),
        description: "d".to_owned(),
        year: Some(2024),
        technologies: Some(
            technologies
                .into_iter()
                .map(|name| TechnologieInput {
                    name: name.to_owned(),
                })
                .collect(),
        ),
    }
}

#[tokio::test]
async fn repeated_child_input_creates_one_row() {
    let db = setup().await;
    let owner = register(&db, "u1@example.com").await;

    let first = Mutation::create_project(&db, owner.id, project_input(vec!["Go"]))
        .await
        .unwrap();
    let second = Mutation::create_project(&db, owner.id, project_input(vec!["Go"]))
        .await
        .unwrap();

    let rows = Technologie::find()
        .filter(entity::technologie::Column::Name.eq("Go"))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, owner.id);

    // Both projects link the same row, each association set has one entry.
    assert_eq!(first.technologies.len(), 1);
    assert_eq!(second.technologies.len(), 1);
    assert_eq!(first.technologies[0].id, second.technologies[0].id);
}

#[tokio::test]
async fn duplicate_children_in_one_payload_collapse() {
    let db = setup().await;
    let owner = register(&db, "u1@example.com").await;

    let detail = Mutation::create_project(&db, owner.id, project_input(vec!["Go", "Go", "Rust"]))
        .await
        .unwrap();

    assert_eq!(detail.technologies.len(), 2);
}

#[tokio::test]
async fn child_rows_are_owner_scoped() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;
    let bob = register(&db, "bob@example.com").await;

    let alices = Mutation::create_project(&db, alice.id, project_input(vec!["Go"]))
        .await
        .unwrap();
    let bobs = Mutation::create_project(&db, bob.id, project_input(vec!["Go"]))
        .await
        .unwrap();

    // Same natural key, different owners: two distinct rows, never shared.
    assert_ne!(alices.technologies[0].id, bobs.technologies[0].id);
    assert_eq!(alices.technologies[0].user_id, alice.id);
    assert_eq!(bobs.technologies[0].user_id, bob.id);
    assert_eq!(Technologie::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn empty_child_name_aborts_whole_write() {
    let db = setup().await;
    let owner = register(&db, "u1@example.com").await;

    let err = Mutation::create_project(&db, owner.id, project_input(vec!["Go", "  "]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    // The transaction rolled back: no parent, no children.
    assert_eq!(Project::find().count(&db).await.unwrap(), 0);
    assert_eq!(Technologie::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn profile_tags_are_additive_and_idempotent() {
    let db = setup().await;
    let owner = register(&db, "u1@example.com").await;

    let tags = |names: Vec<&str>| {
        Some(
            names
                .into_iter()
                .map(|name| TagInput {
                    name: name.to_owned(),
                })
                .collect::<Vec<_>>(),
        )
    };

    let profile = Mutation::update_profile(
        &db,
        owner.id,
        UpdateProfileInput {
            tags: tags(vec!["rust", "backend"]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(profile.tags.len(), 2);

    // Re-supplying an overlapping list attaches nothing new and clears
    // nothing.
    let profile = Mutation::update_profile(
        &db,
        owner.id,
        UpdateProfileInput {
            tags: tags(vec!["rust"]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(profile.tags.len(), 2);
    assert_eq!(Tag::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn omitted_relation_survives_parent_update() {
    let db = setup().await;
    let owner = register(&db, "u1@example.com").await;

    let detail = Mutation::create_project(&db, owner.id, project_input(vec!["Go", "Rust"]))
        .await
        .unwrap();

    let updated = Mutation::update_project(
        &db,
        owner.id,
        detail.project.id,
        ProjectUpdateInput {
            name: Some("renamed".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.project.name, "renamed");
    assert_eq!(updated.technologies.len(), 2);
}

#[tokio::test]
async fn replacement_list_clears_then_reattaches() {
    let db = setup().await;
    let owner = register(&db, "u1@example.com").await;

    let detail = Mutation::create_project(&db, owner.id, project_input(vec!["Go", "Rust"]))
        .await
        .unwrap();

    let replaced = Mutation::update_project(
        &db,
        owner.id,
        detail.project.id,
        ProjectUpdateInput {
            technologies: Some(vec![TechnologieInput {
                name: "Zig".to_owned(),
            }]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(replaced.technologies.len(), 1);
    assert_eq!(replaced.technologies[0].name, "Zig");

    // An explicit empty list clears the association set entirely.
    let cleared = Mutation::update_project(
        &db,
        owner.id,
        detail.project.id,
        ProjectUpdateInput {
            technologies: Some(vec![]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(cleared.technologies.len(), 0);

    // Replaced-away child rows are not deleted, only detached.
    assert_eq!(Technologie::find().count(&db).await.unwrap(), 3);
}

#[tokio::test]
async fn update_is_scoped_to_the_owner() {
    let db = setup().await;
    let alice = register(&db, "alice@example.com").await;
    let bob = register(&db, "bob@example.com").await;

    let detail = Mutation::create_project(&db, alice.id, project_input(vec!["Go"]))
        .await
        .unwrap();

    let err = Mutation::update_project(
        &db,
        bob.id,
        detail.project.id,
        ProjectUpdateInput {
            name: Some("stolen".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let kept = Query::project(&db, alice.id, detail.project.id).await.unwrap();
    assert_eq!(kept.project.name, "P1");
}
