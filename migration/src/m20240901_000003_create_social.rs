use sea_orm_migration::prelude::*;

use super::m20240901_000001_create_user::User;
use super::m20240901_000002_create_profile::Tag;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserFollow::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserFollow::FollowerId).integer().not_null())
                    .col(ColumnDef::new(UserFollow::FollowedId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserFollow::FollowerId)
                            .col(UserFollow::FollowedId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_follow_follower")
                            .from(UserFollow::Table, UserFollow::FollowerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_follow_followed")
                            .from(UserFollow::Table, UserFollow::FollowedId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Groups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Groups::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Groups::Name).string().not_null())
                    .col(ColumnDef::new(Groups::CreatorId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_groups_creator")
                            .from(Groups::Table, Groups::CreatorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GroupAdmin::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GroupAdmin::GroupId).integer().not_null())
                    .col(ColumnDef::new(GroupAdmin::UserId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(GroupAdmin::GroupId)
                            .col(GroupAdmin::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_admin_group")
                            .from(GroupAdmin::Table, GroupAdmin::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_admin_user")
                            .from(GroupAdmin::Table, GroupAdmin::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GroupMember::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GroupMember::GroupId).integer().not_null())
                    .col(ColumnDef::new(GroupMember::UserId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(GroupMember::GroupId)
                            .col(GroupMember::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_member_group")
                            .from(GroupMember::Table, GroupMember::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_member_user")
                            .from(GroupMember::Table, GroupMember::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GroupTag::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GroupTag::GroupId).integer().not_null())
                    .col(ColumnDef::new(GroupTag::TagId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(GroupTag::GroupId)
                            .col(GroupTag::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_tag_group")
                            .from(GroupTag::Table, GroupTag::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_tag_tag")
                            .from(GroupTag::Table, GroupTag::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GroupTag::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GroupMember::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GroupAdmin::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Groups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserFollow::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserFollow {
    Table,
    FollowerId,
    FollowedId,
}

#[derive(DeriveIden)]
pub enum Groups {
    Table,
    Id,
    Name,
    CreatorId,
}

#[derive(DeriveIden)]
enum GroupAdmin {
    Table,
    GroupId,
    UserId,
}

#[derive(DeriveIden)]
enum GroupMember {
    Table,
    GroupId,
    UserId,
}

#[derive(DeriveIden)]
enum GroupTag {
    Table,
    GroupId,
    TagId,
}
