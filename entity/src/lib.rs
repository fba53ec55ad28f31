pub mod access_token;
pub mod group;
pub mod group_admin;
pub mod group_member;
pub mod group_tag;
pub mod hashtag;
pub mod notification;
pub mod post;
pub mod post_hashtag;
pub mod post_like;
pub mod project;
pub mod project_technologie;
pub mod tag;
pub mod technologie;
pub mod user;
pub mod user_follow;
pub mod user_tag;
pub mod work_experience;

pub mod prelude {
    pub use super::access_token::Entity as AccessToken;
    pub use super::group::Entity as Group;
    pub use super::group_admin::Entity as GroupAdmin;
    pub use super::group_member::Entity as GroupMember;
    pub use super::group_tag::Entity as GroupTag;
    pub use super::hashtag::Entity as Hashtag;
    pub use super::notification::Entity as Notification;
    pub use super::post::Entity as Post;
    pub use super::post_hashtag::Entity as PostHashtag;
    pub use super::post_like::Entity as PostLike;
    pub use super::project::Entity as Project;
    pub use super::project_technologie::Entity as ProjectTechnologie;
    pub use super::tag::Entity as Tag;
    pub use super::technologie::Entity as Technologie;
    pub use super::user::Entity as User;
    pub use super::user_follow::Entity as UserFollow;
    pub use super::user_tag::Entity as UserTag;
    pub use super::work_experience::Entity as WorkExperience;
}
