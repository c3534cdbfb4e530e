//! API server — serves the cafe REST API and the Prometheus exporter.

use crate::loyalty_rest::{self, LoyaltyState};
use crate::rest::{self, AppState};
use axum::routing::get;
use axum::Router;
use brew_core::config::AppConfig;
use brew_management::{management_router, ManagementState};
use std::net::SocketAddr;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Main API server: management CRUD, loyalty calculators and health checks on one listener.
pub struct ApiServer {
    config: AppConfig,
    state: ManagementState,
    start_time: Instant,
}

impl ApiServer {
    pub fn new(config: AppConfig, state: ManagementState) -> Self {
        Self {
            config,
            state,
            start_time: Instant::now(),
        }
    }

    /// Full application router with middleware applied.
    pub fn router(&self) -> Router {
        let ops_state = AppState {
            store: self.state.store.clone(),
            node_id: self.config.node_id.clone(),
            start_time: self.start_time,
        };
        let ops = Router::new()
            .route("/health", get(rest::health_check))
            .route("/ready", get(rest::readiness))
            .route("/live", get(rest::liveness))
            .with_state(ops_state);

        let mut app = management_router(self.state.clone()).merge(ops);
        if self.config.loyalty.enabled {
            app = app.merge(loyalty_rest::loyalty_router(LoyaltyState {
                engine: self.state.loyalty.clone(),
            }));
        }

        app.layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Start the HTTP REST server.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = self.router();

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, node_id = %self.config.node_id, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the metrics server on a separate port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");
        Ok(())
    }
}
