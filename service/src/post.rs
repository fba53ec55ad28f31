//! Posts and their hashtags. Hashtags run the same nested-relation
//! pipeline as profile tags; their owner is always the post's author. The
//! name defaults to `"fyp"` when the payload leaves it out.

use chrono::Utc;
use entity::{hashtag, post, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::pipeline::{attach_hashtag_to_post, get_or_create_hashtag};
use crate::{Error, Mutation, Query, Result};

pub const DEFAULT_HASHTAG: &str = "fyp";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HashtagInput {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostInput {
    pub content: String,
    pub group_id: Option<i32>,
    pub hashtags: Option<Vec<HashtagInput>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostUpdateInput {
    pub content: Option<String>,
}

/// Outcome of attaching a hashtag to a post. `created` is false when both
/// the row and the association already existed.
#[derive(Debug, Clone)]
pub struct HashtagAttachment {
    pub hashtag: hashtag::Model,
    pub created: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: post::Model,
    pub hashtags: Vec<hashtag::Model>,
    pub like_count: u64,
    pub liked: bool,
}

async fn run_hashtag_pipeline<C: ConnectionTrait>(
    db: &C,
    owner_id: i32,
    post_id: i32,
    specs: &[HashtagInput],
) -> Result<()> {
    for spec in specs {
        let name = spec.name.as_deref().unwrap_or(DEFAULT_HASHTAG);
        let hashtag = get_or_create_hashtag(db, owner_id, name).await?;
        attach_hashtag_to_post(db, post_id, hashtag.id).await?;
    }
    Ok(())
}

async fn load_detail<C: ConnectionTrait>(
    db: &C,
    caller: i32,
    post: post::Model,
) -> Result<PostDetail> {
    let hashtags = post
        .find_related(hashtag::Entity)
        .order_by_asc(hashtag::Column::Id)
        .all(db)
        .await?;
    let like_count = Query::like_count(db, post.id).await?;
    let liked = entity::post_like::Entity::find_by_id((post.id, caller))
        .one(db)
        .await?
        .is_some();
    Ok(PostDetail {
        post,
        hashtags,
        like_count,
        liked,
    })
}

impl Mutation {
    pub async fn create_post<C>(db: &C, caller: i32, input: PostInput) -> Result<PostDetail>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        if input.content.trim().is_empty() {
            return Err(Error::Validation("post content must not be empty".to_owned()));
        }
        if let Some(group_id) = input.group_id {
            entity::group::Entity::find_by_id(group_id)
                .one(db)
                .await?
                .ok_or_else(|| Error::NotFound(format!("group {group_id}")))?;
        }

        let post = db
            .transaction::<_, post::Model, Error>(|txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    let post = post::ActiveModel {
                        content: Set(input.content),
                        author_id: Set(caller),
                        group_id: Set(input.group_id),
                        posted: Set(now.into()),
                        updated: Set(now.into()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    if let Some(specs) = &input.hashtags {
                        run_hashtag_pipeline(txn, caller, post.id, specs).await?;
                    }

                    Ok(post)
                })
            })
            .await?;

        load_detail(db, caller, post).await
    }

    pub async fn update_post<C: ConnectionTrait>(
        db: &C,
        caller: i32,
        post_id: i32,
        input: PostUpdateInput,
    ) -> Result<post::Model> {
        let post = post::Entity::find_by_id(post_id)
            .filter(post::Column::AuthorId.eq(caller))
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("post {post_id}")))?;

        let mut active: post::ActiveModel = post.into();
        if let Some(content) = input.content {
            if content.trim().is_empty() {
                return Err(Error::Validation("post content must not be empty".to_owned()));
            }
            active.content = Set(content);
        }
        active.updated = Set(Utc::now().into());
        active.update(db).await.map_err(Error::from)
    }

    pub async fn delete_post<C: ConnectionTrait>(db: &C, caller: i32, post_id: i32) -> Result<()> {
        let res = post::Entity::delete_many()
            .filter(post::Column::Id.eq(post_id))
            .filter(post::Column::AuthorId.eq(caller))
            .exec(db)
            .await?;
        if res.rows_affected == 0 {
            return Err(Error::NotFound(format!("post {post_id}")));
        }
        Ok(())
    }

    /// Attach one hashtag to an existing post. Author-only: hashtags are
    /// always owned by the post's author, never by an arbitrary caller.
    pub async fn add_hashtag<C: ConnectionTrait>(
        db: &C,
        caller: i32,
        post_id: i32,
        input: HashtagInput,
    ) -> Result<HashtagAttachment> {
        let post = post::Entity::find_by_id(post_id)
            .filter(post::Column::AuthorId.eq(caller))
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("post {post_id}")))?;

        let name = input.name.as_deref().unwrap_or(DEFAULT_HASHTAG);
        let hashtag = get_or_create_hashtag(db, post.author_id, name).await?;
        let created = attach_hashtag_to_post(db, post.id, hashtag.id).await?;
        Ok(HashtagAttachment { hashtag, created })
    }
}

impl Query {
    /// The caller's posts, newest first.
    pub async fn posts<C: ConnectionTrait>(db: &C, caller: i32) -> Result<Vec<PostDetail>> {
        let posts = post::Entity::find()
            .filter(post::Column::AuthorId.eq(caller))
            .order_by_desc(post::Column::Posted)
            .all(db)
            .await?;

        let mut details = Vec::with_capacity(posts.len());
        for post in posts {
            details.push(load_detail(db, caller, post).await?);
        }
        Ok(details)
    }

    /// A single post, visible to any authenticated caller.
    pub async fn post<C: ConnectionTrait>(db: &C, caller: i32, post_id: i32) -> Result<PostDetail> {
        let post = post::Entity::find_by_id(post_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("post {post_id}")))?;
        load_detail(db, caller, post).await
    }

    /// Accounts that liked a post.
    pub async fn likers<C: ConnectionTrait>(db: &C, post_id: i32) -> Result<Vec<user::Model>> {
        let post = post::Entity::find_by_id(post_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("post {post_id}")))?;
        post.find_linked(post::Likers).all(db).await.map_err(Error::from)
    }
}
