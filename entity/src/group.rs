use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub creator_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Creator,
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::group_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::group_tag::Relation::Group.def().rev())
    }
}

/// Group administrators.
#[derive(Debug)]
pub struct Admins;

impl Linked for Admins {
    type FromEntity = Entity;
    type ToEntity = super::user::Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![
            super::group_admin::Relation::Group.def().rev(),
            super::group_admin::Relation::User.def(),
        ]
    }
}

/// Ordinary group members.
#[derive(Debug)]
pub struct Members;

impl Linked for Members {
    type FromEntity = Entity;
    type ToEntity = super::user::Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![
            super::group_member::Relation::Group.def().rev(),
            super::group_member::Relation::User.def(),
        ]
    }
}

impl ActiveModelBehavior for ActiveModel {}
