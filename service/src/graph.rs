//! The social-graph mutator: follow/unfollow edges (idempotent,
//! irreflexive) and the like toggle. Every mutation is a set-membership
//! operation on a single association table.

use entity::{post, post_like, user, user_follow};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, Set,
};
use serde::Serialize;

use crate::{Error, Mutation, Query, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LikeOutcome {
    Liked,
    Unliked,
}

#[derive(Debug, Clone, Serialize)]
pub struct LikeResult {
    pub outcome: LikeOutcome,
    pub like_count: u64,
}

impl Mutation {
    /// Insert a follow edge. Idempotent: following twice leaves one edge.
    pub async fn follow<C: ConnectionTrait>(db: &C, caller: i32, target: i32) -> Result<String> {
        if caller == target {
            return Err(Error::SelfReference);
        }
        let target_user = user::Entity::find_by_id(target)
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {target}")))?;

        user_follow::Entity::insert(user_follow::ActiveModel {
            follower_id: Set(caller),
            followed_id: Set(target),
        })
        .on_conflict(
            OnConflict::columns([
                user_follow::Column::FollowerId,
                user_follow::Column::FollowedId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .do_nothing()
        .exec(db)
        .await?;

        Ok(format!("You are now following {}", target_user.full_name()))
    }

    /// Remove a follow edge. Removing an absent edge is a no-op, and that
    /// includes the self edge, which can never exist.
    pub async fn unfollow<C: ConnectionTrait>(db: &C, caller: i32, target: i32) -> Result<String> {
        let target_user = user::Entity::find_by_id(target)
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {target}")))?;

        user_follow::Entity::delete_by_id((caller, target))
            .exec(db)
            .await?;

        Ok(format!(
            "You are no longer following {}",
            target_user.full_name()
        ))
    }

    /// Toggle the like edge `(caller, post)`. Present → removed, absent →
    /// inserted. Deliberately a toggle, not an idempotent pair; two racing
    /// toggles on the same edge can land on either state.
    pub async fn toggle_like<C: ConnectionTrait>(
        db: &C,
        caller: i32,
        post_id: i32,
    ) -> Result<LikeResult> {
        post::Entity::find_by_id(post_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("post {post_id}")))?;

        let existing = post_like::Entity::find_by_id((post_id, caller)).one(db).await?;

        let outcome = match existing {
            Some(edge) => {
                edge.delete(db).await?;
                LikeOutcome::Unliked
            }
            None => {
                post_like::Entity::insert(post_like::ActiveModel {
                    post_id: Set(post_id),
                    user_id: Set(caller),
                })
                .on_conflict(
                    OnConflict::columns([post_like::Column::PostId, post_like::Column::UserId])
                        .do_nothing()
                        .to_owned(),
                )
                .do_nothing()
                .exec(db)
                .await?;
                LikeOutcome::Liked
            }
        };

        Ok(LikeResult {
            outcome,
            like_count: Query::like_count(db, post_id).await?,
        })
    }
}

impl Query {
    /// Live cardinality of the like set; never read from a stored counter.
    pub async fn like_count<C: ConnectionTrait>(db: &C, post_id: i32) -> Result<u64> {
        post_like::Entity::find()
            .filter(post_like::Column::PostId.eq(post_id))
            .count(db)
            .await
            .map_err(Error::from)
    }

    /// Accounts the given user follows.
    pub async fn following<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Vec<user::Model>> {
        let account = user::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {user_id}")))?;
        account
            .find_linked(user::Following)
            .all(db)
            .await
            .map_err(Error::from)
    }

    /// Transpose view: accounts following the given user.
    pub async fn followers<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Vec<user::Model>> {
        let account = user::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {user_id}")))?;
        account
            .find_linked(user::Followers)
            .all(db)
            .await
            .map_err(Error::from)
    }
}
