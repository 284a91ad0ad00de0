//! API Server
//!
//! Middleware stack, listener setup and graceful shutdown.

use super::{
    handlers::AppState,
    middleware::{create_cors_layer, request_id_middleware},
    routes::create_router,
};
use crate::config::ApiConfig;
use crate::services::Sportsbook;
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::Duration,
};
use tokio::signal;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

pub struct ApiServer {
    config: ApiConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    pub fn new(config: ApiConfig, book: Sportsbook) -> Self {
        Self {
            config,
            state: Arc::new(AppState::new(book)),
        }
    }

    /// Serve until Ctrl+C or SIGTERM
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.socket_addr()?;
        let app = build_app(self.state.clone(), &self.config);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(%addr, version = %self.state.version, "bookie API listening");
        info!(
            origins = ?self.config.allowed_origins,
            timeout_secs = self.config.request_timeout_secs,
            "server configuration"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("API server stopped gracefully");
        Ok(())
    }

    fn socket_addr(&self) -> Result<SocketAddr, Box<dyn std::error::Error>> {
        let ip: IpAddr = self.config.host.parse()?;
        Ok(SocketAddr::from((ip, self.config.port)))
    }
}

/// Router with the full middleware stack applied
pub fn build_app(state: Arc<AppState>, config: &ApiConfig) -> axum::Router {
    create_router(state)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(create_cors_layer(&config.allowed_origins))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::middleware::REQUEST_ID_HEADER;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn app() -> axum::Router {
        build_app(
            Arc::new(AppState::new(Sportsbook::default())),
            &ApiConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_generates_request_id() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.status().is_success());
        let id = response.headers().get(REQUEST_ID_HEADER).unwrap();
        assert!(uuid::Uuid::parse_str(id.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_echoes_client_request_id() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(REQUEST_ID_HEADER, "client-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "client-42");
    }

    #[test]
    fn test_socket_addr_rejects_hostname() {
        let config = ApiConfig {
            host: "not an ip".to_string(),
            ..ApiConfig::default()
        };
        let server = ApiServer::new(config, Sportsbook::default());

        assert!(server.socket_addr().is_err());
        assert!(ApiServer::new(ApiConfig::default(), Sportsbook::default())
            .socket_addr()
            .is_ok());
    }
}
