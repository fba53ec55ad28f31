//! Notification rows and their wire representation. Real-time delivery is
//! the transport layer's concern; this module only persists and reads. The
//! REST listing is the durable fallback for anything a live session missed.

use chrono::Utc;
use entity::{notification, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use crate::{Error, Mutation, Query, Result};

/// Topic a recipient's real-time sessions subscribe to.
pub fn topic(recipient_id: i32) -> String {
    format!("notifications_{recipient_id}")
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationInput {
    pub recipient: i32,
    pub message: String,
}

/// The serialized notification event, identical on the REST and the
/// websocket paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationOut {
    pub id: i32,
    pub sender: i32,
    pub recipient: i32,
    pub message: String,
    pub is_read: bool,
    pub created_at: sea_orm::prelude::DateTimeWithTimeZone,
}

impl From<notification::Model> for NotificationOut {
    fn from(model: notification::Model) -> Self {
        NotificationOut {
            id: model.id,
            sender: model.sender_id,
            recipient: model.recipient_id,
            message: model.message,
            is_read: model.is_read,
            created_at: model.created_at,
        }
    }
}

impl Mutation {
    pub async fn create_notification<C: ConnectionTrait>(
        db: &C,
        sender: i32,
        input: NotificationInput,
    ) -> Result<NotificationOut> {
        if input.message.trim().is_empty() {
            return Err(Error::Validation("message must not be empty".to_owned()));
        }
        user::Entity::find_by_id(input.recipient)
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {}", input.recipient)))?;

        let model = notification::ActiveModel {
            sender_id: Set(sender),
            recipient_id: Set(input.recipient),
            message: Set(input.message),
            is_read: Set(false),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(model.into())
    }

    /// Flip `is_read`, the only mutable field of a notification.
    pub async fn mark_notification_read<C: ConnectionTrait>(
        db: &C,
        caller: i32,
        id: i32,
    ) -> Result<NotificationOut> {
        let model = notification::Entity::find_by_id(id)
            .filter(notification::Column::RecipientId.eq(caller))
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("notification {id}")))?;

        let mut active: notification::ActiveModel = model.into();
        active.is_read = Set(true);
        Ok(active.update(db).await?.into())
    }
}

impl Query {
    /// The caller's notifications, newest first.
    pub async fn notifications<C: ConnectionTrait>(
        db: &C,
        caller: i32,
    ) -> Result<Vec<NotificationOut>> {
        let rows = notification::Entity::find()
            .filter(notification::Column::RecipientId.eq(caller))
            .order_by_desc(notification::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(rows.into_iter().map(NotificationOut::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_is_recipient_scoped() {
        assert_eq!(topic(42), "notifications_42");
        assert_ne!(topic(1), topic(2));
    }
}
