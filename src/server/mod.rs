mod error;
pub mod handlers;
mod middleware;
pub mod types;

pub use error::{ApiError, CONNECTION_FAILED, PAYLOAD_TOO_LARGE, PREDICTION_FAILED};
pub use handlers::AppState;

use crate::{Result, config::ServerConfig};
use axum::{
    Router,
    body::Bytes,
    extract::DefaultBodyLimit,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

const BUNDLED_HOME_PAGE: &str = include_str!("../../templates/index.html");

/// Builds the router with the request logging and CORS policy applied to
/// every route, the fallback included.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/", get(handlers::home))
        .route("/test", get(handlers::test_connection))
        .route(
            "/predict",
            post(handlers::predict).layer(DefaultBodyLimit::max(state.max_body_bytes)),
        )
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(cors)
        .layer(axum::middleware::from_fn(middleware::response_policy))
        .layer(TraceLayer::new_for_http())
}

pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    pub async fn new(config: ServerConfig) -> Self {
        let home_page = load_home_page(&config.home_page).await;
        let state = AppState {
            home_page,
            debug: config.debug,
            max_body_bytes: config.max_body_bytes,
        };

        Self { config, state }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        Ok(SocketAddr::new(self.config.host.parse()?, self.config.port))
    }

    pub async fn run(self) -> Result<()> {
        let addr = self.addr()?;
        let app = self.router();

        info!("Starting server on {}", addr);
        if self.config.debug {
            warn!("Debug mode is on: internal error details are returned to clients");
        }

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn load_home_page(path: &str) -> Bytes {
    match tokio::fs::read(path).await {
        Ok(contents) => {
            info!("Loaded home page template: {}", path);
            Bytes::from(contents)
        }
        Err(e) => {
            warn!(
                "Could not read home page template {}, serving bundled page: {}",
                path, e
            );
            Bytes::from_static(BUNDLED_HOME_PAGE.as_bytes())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
