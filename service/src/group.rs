//! Groups: creator-scoped CRUD, admin management and the group post feed.
//! The creator lands in the admin set in the same transaction that creates
//! the group.

use entity::{group, group_admin, group_member, post, tag, user};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::pipeline::{attach_tag_to_group, get_or_create_tag};
use crate::profile::TagInput;
use crate::{Error, Mutation, Query, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct GroupInput {
    pub name: String,
    pub tags: Option<Vec<TagInput>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupDetail {
    #[serde(flatten)]
    pub group: group::Model,
    pub admins: Vec<user::Model>,
    pub members: Vec<user::Model>,
    pub tags: Vec<tag::Model>,
}

async fn load_detail<C: ConnectionTrait>(db: &C, group: group::Model) -> Result<GroupDetail> {
    let admins = group.find_linked(group::Admins).all(db).await?;
    let members = group.find_linked(group::Members).all(db).await?;
    let tags = group.find_related(tag::Entity).all(db).await?;
    Ok(GroupDetail {
        group,
        admins,
        members,
        tags,
    })
}

async fn is_admin<C: ConnectionTrait>(db: &C, group_id: i32, user_id: i32) -> Result<bool> {
    Ok(group_admin::Entity::find_by_id((group_id, user_id))
        .one(db)
        .await?
        .is_some())
}

impl Mutation {
    /// Create a group; the creator is inserted into the admin set within
    /// the same transaction, so no reader ever sees an admin-less group.
    pub async fn create_group<C>(db: &C, caller: i32, input: GroupInput) -> Result<GroupDetail>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        if input.name.trim().is_empty() {
            return Err(Error::Validation("group name must not be empty".to_owned()));
        }

        let group = db
            .transaction::<_, group::Model, Error>(|txn| {
                Box::pin(async move {
                    let group = group::ActiveModel {
                        name: Set(input.name),
                        creator_id: Set(caller),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    group_admin::ActiveModel {
                        group_id: Set(group.id),
                        user_id: Set(caller),
                    }
                    .insert(txn)
                    .await?;

                    if let Some(specs) = &input.tags {
                        for spec in specs {
                            let tag = get_or_create_tag(txn, caller, &spec.name).await?;
                            attach_tag_to_group(txn, group.id, tag.id).await?;
                        }
                    }

                    Ok(group)
                })
            })
            .await?;

        load_detail(db, group).await
    }

    pub async fn update_group<C: ConnectionTrait>(
        db: &C,
        caller: i32,
        group_id: i32,
        input: GroupInput,
    ) -> Result<GroupDetail> {
        if input.name.trim().is_empty() {
            return Err(Error::Validation("group name must not be empty".to_owned()));
        }
        let group = group::Entity::find_by_id(group_id)
            .filter(group::Column::CreatorId.eq(caller))
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("group {group_id}")))?;

        let mut active: group::ActiveModel = group.into();
        active.name = Set(input.name);
        let group = active.update(db).await?;
        load_detail(db, group).await
    }

    pub async fn delete_group<C: ConnectionTrait>(
        db: &C,
        caller: i32,
        group_id: i32,
    ) -> Result<()> {
        let res = group::Entity::delete_many()
            .filter(group::Column::Id.eq(group_id))
            .filter(group::Column::CreatorId.eq(caller))
            .exec(db)
            .await?;
        if res.rows_affected == 0 {
            return Err(Error::NotFound(format!("group {group_id}")));
        }
        Ok(())
    }

    /// Promote a user to group admin. The caller must already be an admin;
    /// promoting an existing admin is reported, not repeated.
    pub async fn add_admin<C: ConnectionTrait>(
        db: &C,
        caller: i32,
        group_id: i32,
        user_id: i32,
    ) -> Result<String> {
        group::Entity::find_by_id(group_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("group {group_id}")))?;

        if !is_admin(db, group_id, caller).await? {
            return Err(Error::Forbidden(
                "you must be an admin of this group to add admins".to_owned(),
            ));
        }

        let target = user::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {user_id}")))?;

        if is_admin(db, group_id, user_id).await? {
            return Ok(format!("{} is already an admin", target.full_name()));
        }

        group_admin::Entity::insert(group_admin::ActiveModel {
            group_id: Set(group_id),
            user_id: Set(user_id),
        })
        .on_conflict(
            OnConflict::columns([group_admin::Column::GroupId, group_admin::Column::UserId])
                .do_nothing()
                .to_owned(),
        )
        .do_nothing()
        .exec(db)
        .await?;

        Ok(format!("You've added {} as an admin", target.full_name()))
    }

    /// Join a group as an ordinary member. Idempotent.
    pub async fn join_group<C: ConnectionTrait>(
        db: &C,
        caller: i32,
        group_id: i32,
    ) -> Result<String> {
        let group = group::Entity::find_by_id(group_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("group {group_id}")))?;

        group_member::Entity::insert(group_member::ActiveModel {
            group_id: Set(group_id),
            user_id: Set(caller),
        })
        .on_conflict(
            OnConflict::columns([group_member::Column::GroupId, group_member::Column::UserId])
                .do_nothing()
                .to_owned(),
        )
        .do_nothing()
        .exec(db)
        .await?;

        Ok(format!("You joined {}", group.name))
    }
}

impl Query {
    /// Groups the caller created.
    pub async fn groups<C: ConnectionTrait>(db: &C, caller: i32) -> Result<Vec<GroupDetail>> {
        let groups = group::Entity::find()
            .filter(group::Column::CreatorId.eq(caller))
            .order_by_desc(group::Column::Id)
            .all(db)
            .await?;

        let mut details = Vec::with_capacity(groups.len());
        for group in groups {
            details.push(load_detail(db, group).await?);
        }
        Ok(details)
    }

    /// Posts published into a group, newest first.
    pub async fn group_posts<C: ConnectionTrait>(
        db: &C,
        group_id: i32,
    ) -> Result<Vec<post::Model>> {
        group::Entity::find_by_id(group_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("group {group_id}")))?;

        post::Entity::find()
            .filter(post::Column::GroupId.eq(group_id))
            .order_by_desc(post::Column::Posted)
            .all(db)
            .await
            .map_err(Error::from)
    }
}
