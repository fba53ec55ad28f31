use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use devnet_service::post::{HashtagInput, PostDetail, PostInput, PostUpdateInput};
use devnet_service::{Mutation, Query};
use entity::{hashtag, post, user};
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::AppState;

pub fn post_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route(
            "/:id/",
            get(get_post).post(update_post).delete(delete_post),
        )
        .route("/:id/like/", post(toggle_like))
        .route("/:id/likes/", get(likers))
        .route("/:id/hashtags/", post(add_hashtag))
}

async fn list_posts(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<PostDetail>>> {
    Ok(Json(Query::posts(&state.conn, user.id).await?))
}

async fn create_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<PostInput>,
) -> ApiResult<(StatusCode, Json<PostDetail>)> {
    let detail = Mutation::create_post(&state.conn, user.id, input).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

async fn get_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<PostDetail>> {
    Ok(Json(Query::post(&state.conn, user.id, id).await?))
}

async fn update_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(input): Json<PostUpdateInput>,
) -> ApiResult<Json<post::Model>> {
    Ok(Json(
        Mutation::update_post(&state.conn, user.id, id, input).await?,
    ))
}

async fn delete_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    Mutation::delete_post(&state.conn, user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn toggle_like(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    let result = Mutation::toggle_like(&state.conn, user.id, id).await?;
    Ok(Json(json!(result)))
}

async fn likers(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<user::Model>>> {
    Ok(Json(Query::likers(&state.conn, id).await?))
}

async fn add_hashtag(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
    Json(input): Json<HashtagInput>,
) -> ApiResult<(StatusCode, Json<hashtag::Model>)> {
    let attachment = Mutation::add_hashtag(&state.conn, user.id, id, input).await?;
    let status = if attachment.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(attachment.hashtag)))
}
