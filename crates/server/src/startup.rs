use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::{init_logging, LogFormat};
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &configs::ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.host, cfg.port).parse()?)
}

/// Connect, migrate and seed, returning the state the router is built on.
pub async fn prepare(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    // 数据库连接与迁移
    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_with_config(&db_cfg).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await.map_err(anyhow::Error::from)?;
        info!(event = "migrated", "database schema up to date");
    }

    // 启动时导入默认套餐与线路数据
    let state = ServerState::from_db(db);
    if cfg.seed.enabled {
        service::seed::run(&state.packages, &state.tours, &cfg.seed).await?;
    } else {
        warn!("seed import disabled");
    }
    Ok(state)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let format = cfg.server.log_format.parse::<LogFormat>().unwrap_or_default();
    init_logging(format);

    let state = prepare(&cfg).await?;
    // 构建路由
    let app: Router = routes::build_router(state, build_cors());

    // 绑定并启动服务
    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
