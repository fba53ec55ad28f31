use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use devnet_service::group::{GroupDetail, GroupInput};
use devnet_service::{Mutation, Query};
use entity::post;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::AppState;

pub fn group_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_groups).post(create_group))
        .route("/:id/", post(update_group).delete(delete_group))
        .route("/:id/admins/", post(add_admin))
        .route("/:id/join/", post(join_group))
        .route("/:id/posts/", get(group_posts))
}

async fn list_groups(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<GroupDetail>>> {
    Ok(Json(Query::groups(&state.conn, user.id).await?))
}

async fn create_group(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<GroupInput>,
) -> ApiResult<(StatusCode, Json<GroupDetail>)> {
    let detail = Mutation::create_group(&state.conn, user.id, input).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

async fn update_group(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(input): Json<GroupInput>,
) -> ApiResult<Json<GroupDetail>> {
    Ok(Json(
        Mutation::update_group(&state.conn, user.id, id, input).await?,
    ))
}

async fn delete_group(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    Mutation::delete_group(&state.conn, user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct AddAdminInput {
    id: i32,
}

async fn add_admin(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(group_id): Path<i32>,
    Json(input): Json<AddAdminInput>,
) -> ApiResult<Json<Value>> {
    let detail = Mutation::add_admin(&state.conn, user.id, group_id, input.id).await?;
    Ok(Json(json!({ "detail": detail })))
}

async fn join_group(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(group_id): Path<i32>,
) -> ApiResult<Json<Value>> {
    let detail = Mutation::join_group(&state.conn, user.id, group_id).await?;
    Ok(Json(json!({ "detail": detail })))
}

async fn group_posts(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(group_id): Path<i32>,
) -> ApiResult<Json<Value>> {
    let posts: Vec<post::Model> = Query::group_posts(&state.conn, group_id).await?;
    Ok(Json(json!({ "posts": posts })))
}
