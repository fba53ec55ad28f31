use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use devnet_service::profile::{
    Profile, RegisterInput, TagInput, UpdateProfileInput, WorkExperienceInput,
};
use devnet_service::project::{ProjectDetail, ProjectInput, ProjectUpdateInput, TechnologieInput};
use devnet_service::{Mutation, Query};
use entity::{tag, technologie, user, work_experience};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::AppState;

pub fn user_router() -> Router<AppState> {
    Router::new()
        .route("/create/", post(register))
        .route("/token/", post(token))
        .route("/me/", get(me).patch(update_me))
        .route("/tags/", get(list_tags).post(create_tag))
        .route("/tags/:id/", post(update_tag).delete(delete_tag))
        .route(
            "/work_experience/",
            get(list_work_experiences).post(create_work_experience),
        )
        .route(
            "/work_experience/:id/",
            post(update_work_experience).delete(delete_work_experience),
        )
        .route("/project/", get(list_projects).post(create_project))
        .route(
            "/project/:id/",
            get(get_project).post(update_project).delete(delete_project),
        )
        .route(
            "/technologie/",
            get(list_technologies).post(create_technologie),
        )
        .route(
            "/technologie/:id/",
            post(update_technologie).delete(delete_technologie),
        )
        .route("/follow/:id/", post(follow))
        .route("/unfollow/:id/", post(unfollow))
        .route("/following/", get(following))
        .route("/followers/", get(followers))
}

async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> ApiResult<(StatusCode, Json<Profile>)> {
    let profile = Mutation::register(&state.conn, input).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

#[derive(Deserialize)]
struct TokenInput {
    email: String,
    password: String,
}

async fn token(
    State(state): State<AppState>,
    Json(input): Json<TokenInput>,
) -> ApiResult<Json<Value>> {
    let token = Mutation::create_token(&state.conn, &input.email, &input.password).await?;
    Ok(Json(json!({ "token": token })))
}

async fn me(State(state): State<AppState>, CurrentUser(user): CurrentUser) -> ApiResult<Json<Profile>> {
    Ok(Json(Query::profile(&state.conn, user.id).await?))
}

async fn update_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<UpdateProfileInput>,
) -> ApiResult<Json<Profile>> {
    Ok(Json(
        Mutation::update_profile(&state.conn, user.id, input).await?,
    ))
}

async fn list_tags(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<tag::Model>>> {
    Ok(Json(Query::tags(&state.conn, user.id).await?))
}

async fn create_tag(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<TagInput>,
) -> ApiResult<(StatusCode, Json<tag::Model>)> {
    let tag = Mutation::create_tag(&state.conn, user.id, input).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

async fn update_tag(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(input): Json<TagInput>,
) -> ApiResult<Json<tag::Model>> {
    Ok(Json(
        Mutation::update_tag(&state.conn, user.id, id, input).await?,
    ))
}

async fn delete_tag(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    Mutation::delete_tag(&state.conn, user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_work_experiences(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<work_experience::Model>>> {
    Ok(Json(Query::work_experiences(&state.conn, user.id).await?))
}

async fn create_work_experience(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<WorkExperienceInput>,
) -> ApiResult<(StatusCode, Json<work_experience::Model>)> {
    let experience = Mutation::create_work_experience(&state.conn, user.id, input).await?;
    Ok((StatusCode::CREATED, Json(experience)))
}

async fn update_work_experience(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(input): Json<WorkExperienceInput>,
) -> ApiResult<Json<work_experience::Model>> {
    Ok(Json(
        Mutation::update_work_experience(&state.conn, user.id, id, input).await?,
    ))
}

async fn delete_work_experience(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    Mutation::delete_work_experience(&state.conn, user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_projects(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<ProjectDetail>>> {
    Ok(Json(Query::projects(&state.conn, user.id).await?))
}

async fn get_project(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<ProjectDetail>> {
    Ok(Json(Query::project(&state.conn, user.id, id).await?))
}

async fn create_project(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<ProjectInput>,
) -> ApiResult<(StatusCode, Json<ProjectDetail>)> {
    let project = Mutation::create_project(&state.conn, user.id, input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

async fn update_project(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(input): Json<ProjectUpdateInput>,
) -> ApiResult<Json<ProjectDetail>> {
    Ok(Json(
        Mutation::update_project(&state.conn, user.id, id, input).await?,
    ))
}

async fn delete_project(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    Mutation::delete_project(&state.conn, user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_technologies(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<technologie::Model>>> {
    Ok(Json(Query::technologies(&state.conn, user.id).await?))
}

async fn create_technologie(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<TechnologieInput>,
) -> ApiResult<(StatusCode, Json<technologie::Model>)> {
    let technologie = Mutation::create_technologie(&state.conn, user.id, input).await?;
    Ok((StatusCode::CREATED, Json(technologie)))
}

async fn update_technologie(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(input): Json<TechnologieInput>,
) -> ApiResult<Json<technologie::Model>> {
    Ok(Json(
        Mutation::update_technologie(&state.conn, user.id, id, input).await?,
    ))
}

async fn delete_technologie(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    Mutation::delete_technologie(&state.conn, user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn follow(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    let detail = Mutation::follow(&state.conn, user.id, id).await?;
    Ok(Json(json!({ "detail": detail })))
}

async fn unfollow(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    let detail = Mutation::unfollow(&state.conn, user.id, id).await?;
    Ok(Json(json!({ "detail": detail })))
}

async fn following(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<user::Model>>> {
    Ok(Json(Query::following(&state.conn, user.id).await?))
}

async fn followers(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<user::Model>>> {
    Ok(Json(Query::followers(&state.conn, user.id).await?))
}
