//! Accounts and profile sub-entities: registration and profile updates run
//! the nested-relation write pipeline for tags; work experiences are plain
//! owner-scoped CRUD.

use entity::{tag, user, work_experience};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::auth::hash_password;
use crate::pipeline::{attach_tag_to_user, get_or_create_tag};
use crate::{Error, Mutation, Query, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct TagInput {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub tags: Option<Vec<TagInput>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub tags: Option<Vec<TagInput>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    #[serde(flatten)]
    pub user: user::Model,
    pub tags: Vec<tag::Model>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkExperienceInput {
    pub business: String,
    pub year: Option<i32>,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub current_job: bool,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub description: String,
}

fn validate_email(email: &str) -> Result<String> {
    let email = email.trim().to_ascii_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(Error::Validation("a valid email address is required".to_owned()));
    }
    Ok(email)
}

fn validate_password(password: &str) -> Result<()> {
    if password.len() < 5 {
        return Err(Error::Validation(
            "password must be at least 5 characters".to_owned(),
        ));
    }
    Ok(())
}

/// Steps 3–4 of the write pipeline for profile tags: lookup-or-insert each
/// child under the owner, then attach. Input order, fail fast.
async fn run_tag_pipeline<C: ConnectionTrait>(
    db: &C,
    owner_id: i32,
    tags: &[TagInput],
) -> Result<()> {
    for spec in tags {
        let tag = get_or_create_tag(db, owner_id, &spec.name).await?;
        attach_tag_to_user(db, owner_id, tag.id).await?;
    }
    Ok(())
}

async fn load_profile<C: ConnectionTrait>(db: &C, account: user::Model) -> Result<Profile> {
    let tags = account
        .find_related(tag::Entity)
        .order_by_asc(tag::Column::Id)
        .all(db)
        .await?;
    Ok(Profile { user: account, tags })
}

impl Mutation {
    /// Create an account. The embedded tag list runs through the pipeline
    /// with the new account as owner; the whole write is one transaction.
    pub async fn register<C>(db: &C, input: RegisterInput) -> Result<Profile>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let email = validate_email(&input.email)?;
        validate_password(&input.password)?;
        let password_hash = hash_password(&input.password)?;

        let account = db
            .transaction::<_, user::Model, Error>(|txn| {
                Box::pin(async move {
                    let account = user::ActiveModel {
                        email: Set(email),
                        password_hash: Set(password_hash),
                        first_name: Set(input.first_name),
                        last_name: Set(input.last_name),
                        is_active: Set(true),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .map_err(|err| Error::on_unique(err, "email is already registered"))?;

                    if let Some(tags) = &input.tags {
                        run_tag_pipeline(txn, account.id, tags).await?;
                    }

                    Ok(account)
                })
            })
            .await?;

        load_profile(db, account).await
    }

    /// Partial update of the caller's profile. Omitted fields are left
    /// untouched; a supplied tag list is additive (get-or-create and
    /// attach), it never clears existing attachments.
    pub async fn update_profile<C>(db: &C, caller: i32, input: UpdateProfileInput) -> Result<Profile>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let account = db
            .transaction::<_, user::Model, Error>(|txn| {
                Box::pin(async move {
                    let account = user::Entity::find_by_id(caller)
                        .one(txn)
                        .await?
                        .ok_or_else(|| Error::NotFound(format!("user {caller}")))?;

                    let mut active: user::ActiveModel = account.into();
                    if let Some(email) = &input.email {
                        active.email = Set(validate_email(email)?);
                    }
                    if let Some(password) = &input.password {
                        validate_password(password)?;
                        active.password_hash = Set(hash_password(password)?);
                    }
                    if let Some(first_name) = input.first_name {
                        active.first_name = Set(first_name);
                    }
                    if let Some(last_name) = input.last_name {
                        active.last_name = Set(last_name);
                    }
                    let account = active
                        .update(txn)
                        .await
                        .map_err(|err| Error::on_unique(err, "email is already registered"))?;

                    if let Some(tags) = &input.tags {
                        run_tag_pipeline(txn, account.id, tags).await?;
                    }

                    Ok(account)
                })
            })
            .await?;

        load_profile(db, account).await
    }

    /// Standalone tag creation; reuses the pipeline so a duplicate name is
    /// a no-op returning the existing row.
    pub async fn create_tag<C: ConnectionTrait>(
        db: &C,
        caller: i32,
        input: TagInput,
    ) -> Result<tag::Model> {
        let tag = get_or_create_tag(db, caller, &input.name).await?;
        attach_tag_to_user(db, caller, tag.id).await?;
        Ok(tag)
    }

    pub async fn update_tag<C: ConnectionTrait>(
        db: &C,
        caller: i32,
        tag_id: i32,
        input: TagInput,
    ) -> Result<tag::Model> {
        let name = input.name.trim().to_owned();
        if name.is_empty() {
            return Err(Error::Validation("tag name must not be empty".to_owned()));
        }
        let tag = tag::Entity::find_by_id(tag_id)
            .filter(tag::Column::UserId.eq(caller))
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("tag {tag_id}")))?;

        let mut active: tag::ActiveModel = tag.into();
        active.name = Set(name);
        active
            .update(db)
            .await
            .map_err(|err| Error::on_unique(err, "a tag with this name already exists"))
    }

    pub async fn delete_tag<C: ConnectionTrait>(db: &C, caller: i32, tag_id: i32) -> Result<()> {
        let res = tag::Entity::delete_many()
            .filter(tag::Column::Id.eq(tag_id))
            .filter(tag::Column::UserId.eq(caller))
            .exec(db)
            .await?;
        if res.rows_affected == 0 {
            return Err(Error::NotFound(format!("tag {tag_id}")));
        }
        Ok(())
    }

    pub async fn create_work_experience<C: ConnectionTrait>(
        db: &C,
        caller: i32,
        input: WorkExperienceInput,
    ) -> Result<work_experience::Model> {
        if input.business.trim().is_empty() {
            return Err(Error::Validation("business must not be empty".to_owned()));
        }
        work_experience::ActiveModel {
            business: Set(input.business),
            year: Set(input.year),
            time: Set(input.time),
            current_job: Set(input.current_job),
            position: Set(input.position),
            description: Set(input.description),
            user_id: Set(caller),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(Error::from)
    }

    pub async fn update_work_experience<C: ConnectionTrait>(
        db: &C,
        caller: i32,
        id: i32,
        input: WorkExperienceInput,
    ) -> Result<work_experience::Model> {
        let experience = work_experience::Entity::find_by_id(id)
            .filter(work_experience::Column::UserId.eq(caller))
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("work experience {id}")))?;

        let mut active: work_experience::ActiveModel = experience.into();
        active.business = Set(input.business);
        active.year = Set(input.year);
        active.time = Set(input.time);
        active.current_job = Set(input.current_job);
        active.position = Set(input.position);
        active.description = Set(input.description);
        active.update(db).await.map_err(Error::from)
    }

    pub async fn delete_work_experience<C: ConnectionTrait>(
        db: &C,
        caller: i32,
        id: i32,
    ) -> Result<()> {
        let res = work_experience::Entity::delete_many()
            .filter(work_experience::Column::Id.eq(id))
            .filter(work_experience::Column::UserId.eq(caller))
            .exec(db)
            .await?;
        if res.rows_affected == 0 {
            return Err(Error::NotFound(format!("work experience {id}")));
        }
        Ok(())
    }
}

impl Query {
    pub async fn profile<C: ConnectionTrait>(db: &C, caller: i32) -> Result<Profile> {
        let account = user::Entity::find_by_id(caller)
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {caller}")))?;
        load_profile(db, account).await
    }

    /// The caller's tags, name descending.
    pub async fn tags<C: ConnectionTrait>(db: &C, caller: i32) -> Result<Vec<tag::Model>> {
        tag::Entity::find()
            .filter(tag::Column::UserId.eq(caller))
            .order_by_desc(tag::Column::Name)
            .all(db)
            .await
            .map_err(Error::from)
    }

    pub async fn work_experiences<C: ConnectionTrait>(
        db: &C,
        caller: i32,
    ) -> Result<Vec<work_experience::Model>> {
        work_experience::Entity::find()
            .filter(work_experience::Column::UserId.eq(caller))
            .order_by_desc(work_experience::Column::Time)
            .all(db)
            .await
            .map_err(Error::from)
    }
}
