//! Lookup-or-insert and idempotent association, shared by every nested
//! child relation (profile tags, project technologies, post hashtags).
//!
//! Child entities are keyed by `(name, owner)`. The owner always comes from
//! the caller or the parent row, never from the child payload. The unique
//! index on the natural key is the real guard; `ON CONFLICT DO NOTHING`
//! plus a re-fetch covers two requests racing on the same key.

use entity::{group_tag, post_hashtag, project_technologie, user_tag};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set, TryInsertResult,
};

use crate::{Error, Result};

macro_rules! lookup_or_insert {
    ($name:ident => $module:ident, $label:literal) => {
        pub(crate) async fn $name<C: ConnectionTrait>(
            db: &C,
            owner_id: i32,
            name: &str,
        ) -> Result<entity::$module::Model> {
            use entity::$module::{ActiveModel, Column, Entity};

            let name = name.trim();
            if name.is_empty() {
                return Err(Error::Validation(concat!(
                    $label,
                    " name must not be empty"
                )
                .to_owned()));
            }

            if let Some(existing) = Entity::find()
                .filter(Column::UserId.eq(owner_id))
                .filter(Column::Name.eq(name))
                .one(db)
                .await?
            {
                return Ok(existing);
            }

            let inserted = Entity::insert(ActiveModel {
                name: Set(name.to_owned()),
                user_id: Set(owner_id),
                ..Default::default()
            })
            .on_conflict(
                OnConflict::columns([Column::Name, Column::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(db)
            .await?;

            match inserted {
                TryInsertResult::Inserted(res) => Entity::find_by_id(res.last_insert_id)
                    .one(db)
                    .await?
                    .ok_or_else(|| {
                        Error::Db(DbErr::RecordNotFound(concat!($label, " after insert").to_owned()))
                    }),
                // Lost the race against a concurrent writer; the row exists now.
                _ => {
                    tracing::debug!(
                        owner_id,
                        name,
                        concat!($label, " insert conflicted, reusing existing row")
                    );
                    Entity::find()
                        .filter(Column::UserId.eq(owner_id))
                        .filter(Column::Name.eq(name))
                        .one(db)
                        .await?
                        .ok_or_else(|| {
                            Error::Db(DbErr::RecordNotFound(
                                concat!($label, " after conflict").to_owned(),
                            ))
                        })
                }
            }
        }
    };
}

lookup_or_insert!(get_or_create_tag => tag, "tag");
lookup_or_insert!(get_or_create_technologie => technologie, "technologie");
lookup_or_insert!(get_or_create_hashtag => hashtag, "hashtag");

// Attach helpers return whether a new association row was inserted; a
// conflicted insert means the attachment already existed.

pub(crate) async fn attach_tag_to_user<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    tag_id: i32,
) -> Result<bool> {
    let res = user_tag::Entity::insert(user_tag::ActiveModel {
        user_id: Set(user_id),
        tag_id: Set(tag_id),
    })
    .on_conflict(
        OnConflict::columns([user_tag::Column::UserId, user_tag::Column::TagId])
            .do_nothing()
            .to_owned(),
    )
    .do_nothing()
    .exec(db)
    .await?;
    Ok(matches!(res, TryInsertResult::Inserted(_)))
}

pub(crate) async fn attach_technologie_to_project<C: ConnectionTrait>(
    db: &C,
    project_id: i32,
    technologie_id: i32,
) -> Result<bool> {
    let res = project_technologie::Entity::insert(project_technologie::ActiveModel {
        project_id: Set(project_id),
        technologie_id: Set(technologie_id),
    })
    .on_conflict(
        OnConflict::columns([
            project_technologie::Column::ProjectId,
            project_technologie::Column::TechnologieId,
        ])
        .do_nothing()
        .to_owned(),
    )
    .do_nothing()
    .exec(db)
    .await?;
    Ok(matches!(res, TryInsertResult::Inserted(_)))
}

pub(crate) async fn attach_hashtag_to_post<C: ConnectionTrait>(
    db: &C,
    post_id: i32,
    hashtag_id: i32,
) -> Result<bool> {
    let res = post_hashtag::Entity::insert(post_hashtag::ActiveModel {
        post_id: Set(post_id),
        hashtag_id: Set(hashtag_id),
    })
    .on_conflict(
        OnConflict::columns([
            post_hashtag::Column::PostId,
            post_hashtag::Column::HashtagId,
        ])
        .do_nothing()
        .to_owned(),
    )
    .do_nothing()
    .exec(db)
    .await?;
    Ok(matches!(res, TryInsertResult::Inserted(_)))
}

pub(crate) async fn attach_tag_to_group<C: ConnectionTrait>(
    db: &C,
    group_id: i32,
    tag_id: i32,
) -> Result<bool> {
    let res = group_tag::Entity::insert(group_tag::ActiveModel {
        group_id: Set(group_id),
        tag_id: Set(tag_id),
    })
    .on_conflict(
        OnConflict::columns([group_tag::Column::GroupId, group_tag::Column::TagId])
            .do_nothing()
            .to_owned(),
    )
    .do_nothing()
    .exec(db)
    .await?;
    Ok(matches!(res, TryInsertResult::Inserted(_)))
}
