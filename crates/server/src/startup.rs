use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, LogFormat};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use common::utils::logging::{init_logging_default, init_logging_json};

use crate::errors::{set_expose_error_detail, StartupError};
use crate::routes;
use crate::state::ServerState;

/// Select the subscriber format from `[logging]`. A second call is a no-op.
pub fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => init_logging_default(),
        LogFormat::Json => init_logging_json(),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Public entry: load configuration, connect the database and serve HTTP until the listener fails.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::resolve().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    init_logging(cfg.logging.format);

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    models::db::test_connection(&db)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }

    let expose = !cfg.app.is_production();
    set_expose_error_detail(expose);
    if expose {
        warn!(environment = %cfg.app.environment, "error responses include internal detail");
    }

    let state = ServerState::from_db(db, &cfg.services);
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, environment = %cfg.app.environment, overdue_after_days = cfg.services.overdue_after_days, "starting bike shop server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
