use std::sync::Arc;

use axum::http::HeaderValue;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use backoffice::adapters::auth::{Pbkdf2PasswordHasher, DEFAULT_ROUNDS};
use backoffice::adapters::http::api_router;
use backoffice::adapters::postgres;
use backoffice::adapters::LoggingEventPublisher;
use backoffice::app::{build_api_state, Repositories};
use backoffice::config::{AppConfig, ServerConfig, StorageBackend};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let repositories = match config.database.backend {
        StorageBackend::Postgres => {
            let pool = postgres::connect(&config.database).await?;
            if config.database.run_migrations {
                postgres::run_migrations(&pool).await?;
                info!("database migrations applied");
            }
            Repositories::postgres(pool)
        }
        StorageBackend::Memory => {
            warn!("using in-memory storage; data is lost on restart");
            Repositories::in_memory()
        }
    };

    let state = build_api_state(
        repositories,
        &config.auth,
        Arc::new(Pbkdf2PasswordHasher::new(DEFAULT_ROUNDS)),
        Arc::new(LoggingEventPublisher::new()),
    );

    let app = api_router(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server));

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "backoffice listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured level; production logs are JSON.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins = server.cors_origins_list();
    if origins.is_empty() && !server.is_production() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
