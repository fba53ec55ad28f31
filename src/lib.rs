//! HTTP and websocket surface of the social-networking backend. All domain
//! logic lives in the service crate; handlers here validate identity, shape
//! payloads and map errors to status codes.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::Router;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tokio::net::TcpListener;
use tokio::signal::{self, unix::SignalKind};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod error;
pub mod extract;
pub mod hub;
mod routes;

use hub::NotificationHub;

#[derive(Clone)]
pub struct AppState {
    pub conn: DatabaseConnection,
    pub hub: NotificationHub,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_origin(Any)
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .nest("/api/user", routes::user_router())
        .nest("/api/posts", routes::post_router())
        .nest("/api/groups", routes::group_router())
        .nest("/api/notifications", routes::notification_router())
        .layer(cors)
        .with_state(state)
}

pub async fn serve() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_owned());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_owned());

    let conn = Database::connect(&db_url).await?;
    Migrator::up(&conn, None).await?;

    let state = AppState {
        conn,
        hub: NotificationHub::default(),
    };
    let app = router(state);

    let address = format!("{host}:{port}");
    let listener = TcpListener::bind(&address).await?;
    info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
        info!("received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
