use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use devnet_service::{Error, Query};
use entity::user;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// The authenticated caller, resolved exactly once per request from the
/// `Authorization: Bearer <token>` header. Handlers receive it as an
/// explicit argument; nothing downstream reads ambient identity.
pub struct CurrentUser(pub user::Model);

fn bearer_token(parts: &Parts) -> Option<Uuid> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("Token "))?;
    Uuid::parse_str(token.trim()).ok()
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(ApiError(Error::Unauthorized))?;
        let account = Query::user_by_token(&state.conn, token)
            .await?
            .ok_or(ApiError(Error::Unauthorized))?;
        Ok(CurrentUser(account))
    }
}
