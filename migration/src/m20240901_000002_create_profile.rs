use sea_orm_migration::prelude::*;

use super::m20240901_000001_create_user::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tag::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tag::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tag::Name).string().not_null())
                    .col(ColumnDef::new(Tag::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tag_user")
                            .from(Tag::Table, Tag::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Natural key: (name, owner). The lookup-or-insert in the service
        // layer relies on this index, not on an application-level check.
        manager
            .create_index(
                Index::create()
                    .name("idx_tag_name_user")
                    .table(Tag::Table)
                    .col(Tag::Name)
                    .col(Tag::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserTag::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserTag::UserId).integer().not_null())
                    .col(ColumnDef::new(UserTag::TagId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserTag::UserId)
                            .col(UserTag::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_tag_user")
                            .from(UserTag::Table, UserTag::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_tag_tag")
                            .from(UserTag::Table, UserTag::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WorkExperience::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkExperience::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WorkExperience::Business).string().not_null())
                    .col(ColumnDef::new(WorkExperience::Year).integer())
                    .col(ColumnDef::new(WorkExperience::Time).string().not_null())
                    .col(
                        ColumnDef::new(WorkExperience::CurrentJob)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(WorkExperience::Position).string().not_null())
                    .col(
                        ColumnDef::new(WorkExperience::Description)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WorkExperience::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_experience_user")
                            .from(WorkExperience::Table, WorkExperience::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Project::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Project::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Project::Name).string().not_null())
                    .col(ColumnDef::new(Project::Description).string().not_null())
                    .col(ColumnDef::new(Project::Year).integer())
                    .col(ColumnDef::new(Project::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_user")
                            .from(Project::Table, Project::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Technologie::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Technologie::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Technologie::Name).string().not_null())
                    .col(ColumnDef::new(Technologie::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_technologie_user")
                            .from(Technologie::Table, Technologie::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_technologie_name_user")
                    .table(Technologie::Table)
                    .col(Technologie::Name)
                    .col(Technologie::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectTechnologie::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectTechnologie::ProjectId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectTechnologie::TechnologieId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ProjectTechnologie::ProjectId)
                            .col(ProjectTechnologie::TechnologieId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_technologie_project")
                            .from(ProjectTechnologie::Table, ProjectTechnologie::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_technologie_technologie")
                            .from(ProjectTechnologie::Table, ProjectTechnologie::TechnologieId)
                            .to(Technologie::Table, Technologie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectTechnologie::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Technologie::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Project::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WorkExperience::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserTag::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tag::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Tag {
    Table,
    Id,
    Name,
    UserId,
}

#[derive(DeriveIden)]
enum UserTag {
    Table,
    UserId,
    TagId,
}

#[derive(DeriveIden)]
enum WorkExperience {
    Table,
    Id,
    Business,
    Year,
    Time,
    CurrentJob,
    Position,
    Description,
    UserId,
}

#[derive(DeriveIden)]
enum Project {
    Table,
    Id,
    Name,
    Description,
    Year,
    UserId,
}

#[derive(DeriveIden)]
enum Technologie {
    Table,
    Id,
    Name,
    UserId,
}

#[derive(DeriveIden)]
enum ProjectTechnologie {
    Table,
    ProjectId,
    TechnologieId,
}
