mod groups;
mod notifications;
mod posts;
mod users;

pub use groups::group_router;
pub use notifications::notification_router;
pub use posts::post_router;
pub use users::user_router;
