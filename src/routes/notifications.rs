use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query as UrlQuery, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use devnet_service::notification::{self, NotificationInput, NotificationOut};
use devnet_service::{Mutation, Query};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::extract::CurrentUser;
use crate::AppState;

pub fn notification_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications).post(create_notification))
        .route("/:id/read/", post(mark_read))
        .route("/ws", get(ws_notifications))
}

async fn list_notifications(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<NotificationOut>>> {
    Ok(Json(Query::notifications(&state.conn, user.id).await?))
}

async fn create_notification(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<NotificationInput>,
) -> ApiResult<(StatusCode, Json<NotificationOut>)> {
    let out = Mutation::create_notification(&state.conn, user.id, input).await?;

    // Fire-and-forget: the durable write already succeeded, a failed or
    // unserializable publish must not fail the request.
    match serde_json::to_string(&out) {
        Ok(payload) => state.hub.publish(out.recipient, payload),
        Err(err) => tracing::warn!(error = %err, "skipping realtime publish"),
    }

    Ok((StatusCode::CREATED, Json(out)))
}

async fn mark_read(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<NotificationOut>> {
    Ok(Json(
        Mutation::mark_notification_read(&state.conn, user.id, id).await?,
    ))
}

#[derive(Deserialize)]
struct WsParams {
    token: Uuid,
}

/// Websocket sessions authenticate with `?token=<bearer-token>`; browsers
/// cannot set headers on an upgrade request.
async fn ws_notifications(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<WsParams>,
) -> Result<Response, ApiError> {
    let account = Query::user_by_token(&state.conn, params.token)
        .await?
        .ok_or(ApiError(devnet_service::Error::Unauthorized))?;

    Ok(ws.on_upgrade(move |socket| session(socket, state, account.id)))
}

/// One subscribed session. Forwards every event on the recipient's topic
/// verbatim until the client disconnects; all exit paths drop the receiver
/// and prune the topic, so no subscription outlives its connection.
async fn session(mut socket: WebSocket, state: AppState, recipient_id: i32) {
    let mut events = state.hub.subscribe(recipient_id);
    tracing::debug!(topic = %notification::topic(recipient_id), "session subscribed");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(payload) => {
                    if socket.send(Message::Text(payload)).await.is_err() {
                        break;
                    }
                }
                // No replay: a lagged session just misses events.
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            },
            inbound = socket.recv() => match inbound {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                // Inbound frames carry nothing in this protocol.
                Some(Ok(_)) => continue,
            },
        }
    }

    drop(events);
    state.hub.prune(recipient_id);
    tracing::debug!(topic = %notification::topic(recipient_id), "session closed");
}
