//! Projects and their technologies. Create attaches through the pipeline;
//! update treats a supplied technology list as a replacement: existing
//! associations are cleared first, then the pipeline re-runs. An omitted
//! list leaves associations untouched.

use entity::{project, project_technologie, technologie};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::pipeline::{attach_technologie_to_project, get_or_create_technologie};
use crate::{Error, Mutation, Query, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct TechnologieInput {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub year: Option<i32>,
    pub technologies: Option<Vec<TechnologieInput>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectUpdateInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub technologies: Option<Vec<TechnologieInput>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: project::Model,
    pub technologies: Vec<technologie::Model>,
}

async fn run_technologie_pipeline<C: ConnectionTrait>(
    db: &C,
    owner_id: i32,
    project_id: i32,
    specs: &[TechnologieInput],
) -> Result<()> {
    for spec in specs {
        let technologie = get_or_create_technologie(db, owner_id, &spec.name).await?;
        attach_technologie_to_project(db, project_id, technologie.id).await?;
    }
    Ok(())
}

async fn load_detail<C: ConnectionTrait>(db: &C, project: project::Model) -> Result<ProjectDetail> {
    let technologies = project
        .find_related(technologie::Entity)
        .order_by_asc(technologie::Column::Id)
        .all(db)
        .await?;
    Ok(ProjectDetail {
        project,
        technologies,
    })
}

impl Mutation {
    pub async fn create_project<C>(db: &C, caller: i32, input: ProjectInput) -> Result<ProjectDetail>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        if input.name.trim().is_empty() {
            return Err(Error::Validation("project name must not be empty".to_owned()));
        }

        let project = db
            .transaction::<_, project::Model, Error>(|txn| {
                Box::pin(async move {
                    let project = project::ActiveModel {
                        name: Set(input.name),
                        description: Set(input.description),
                        year: Set(input.year),
                        user_id: Set(caller),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    if let Some(specs) = &input.technologies {
                        run_technologie_pipeline(txn, caller, project.id, specs).await?;
                    }

                    Ok(project)
                })
            })
            .await?;

        load_detail(db, project).await
    }

    pub async fn update_project<C>(
        db: &C,
        caller: i32,
        project_id: i32,
        input: ProjectUpdateInput,
    ) -> Result<ProjectDetail>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let project = db
            .transaction::<_, project::Model, Error>(|txn| {
                Box::pin(async move {
                    let project = project::Entity::find_by_id(project_id)
                        .filter(project::Column::UserId.eq(caller))
                        .one(txn)
                        .await?
                        .ok_or_else(|| Error::NotFound(format!("project {project_id}")))?;

                    let mut active: project::ActiveModel = project.into();
                    if let Some(name) = input.name {
                        if name.trim().is_empty() {
                            return Err(Error::Validation(
                                "project name must not be empty".to_owned(),
                            ));
                        }
                        active.name = Set(name);
                    }
                    if let Some(description) = input.description {
                        active.description = Set(description);
                    }
                    if let Some(year) = input.year {
                        active.year = Set(Some(year));
                    }
                    let project = active.update(txn).await?;

                    // Replacement semantics: a supplied list (even an empty
                    // one) clears the association set before re-attaching.
                    if let Some(specs) = &input.technologies {
                        project_technologie::Entity::delete_many()
                            .filter(project_technologie::Column::ProjectId.eq(project.id))
                            .exec(txn)
                            .await?;
                        run_technologie_pipeline(txn, caller, project.id, specs).await?;
                    }

                    Ok(project)
                })
            })
            .await?;

        load_detail(db, project).await
    }

    pub async fn delete_project<C: ConnectionTrait>(
        db: &C,
        caller: i32,
        project_id: i32,
    ) -> Result<()> {
        let res = project::Entity::delete_many()
            .filter(project::Column::Id.eq(project_id))
            .filter(project::Column::UserId.eq(caller))
            .exec(db)
            .await?;
        if res.rows_affected == 0 {
            return Err(Error::NotFound(format!("project {project_id}")));
        }
        Ok(())
    }

    /// Standalone technologie creation, same idempotent lookup-or-insert.
    pub async fn create_technologie<C: ConnectionTrait>(
        db: &C,
        caller: i32,
        input: TechnologieInput,
    ) -> Result<technologie::Model> {
        get_or_create_technologie(db, caller, &input.name).await
    }

    pub async fn update_technologie<C: ConnectionTrait>(
        db: &C,
        caller: i32,
        id: i32,
        input: TechnologieInput,
    ) -> Result<technologie::Model> {
        let name = input.name.trim().to_owned();
        if name.is_empty() {
            return Err(Error::Validation(
                "technologie name must not be empty".to_owned(),
            ));
        }
        let technologie = technologie::Entity::find_by_id(id)
            .filter(technologie::Column::UserId.eq(caller))
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("technologie {id}")))?;

        let mut active: technologie::ActiveModel = technologie.into();
        active.name = Set(name);
        active
            .update(db)
            .await
            .map_err(|err| Error::on_unique(err, "a technologie with this name already exists"))
    }

    pub async fn delete_technologie<C: ConnectionTrait>(
        db: &C,
        caller: i32,
        id: i32,
    ) -> Result<()> {
        let res = technologie::Entity::delete_many()
            .filter(technologie::Column::Id.eq(id))
            .filter(technologie::Column::UserId.eq(caller))
            .exec(db)
            .await?;
        if res.rows_affected == 0 {
            return Err(Error::NotFound(format!("technologie {id}")));
        }
        Ok(())
    }
}

impl Query {
    /// The caller's projects with their technologies, year descending.
    pub async fn projects<C: ConnectionTrait>(db: &C, caller: i32) -> Result<Vec<ProjectDetail>> {
        let rows = project::Entity::find()
            .filter(project::Column::UserId.eq(caller))
            .order_by_desc(project::Column::Year)
            .find_with_related(technologie::Entity)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(project, technologies)| ProjectDetail {
                project,
                technologies,
            })
            .collect())
    }

    pub async fn project<C: ConnectionTrait>(
        db: &C,
        caller: i32,
        project_id: i32,
    ) -> Result<ProjectDetail> {
        let project = project::Entity::find_by_id(project_id)
            .filter(project::Column::UserId.eq(caller))
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("project {project_id}")))?;
        load_detail(db, project).await
    }

    pub async fn technologies<C: ConnectionTrait>(
        db: &C,
        caller: i32,
    ) -> Result<Vec<technologie::Model>> {
        technologie::Entity::find()
            .filter(technologie::Column::UserId.eq(caller))
            .order_by_desc(technologie::Column::Name)
            .all(db)
            .await
            .map_err(Error::from)
    }
}
