//! Backend entry-point: configuration, pool, migrations, and the HTTP server.

use std::sync::Arc;

use actix_web::{HttpServer, web};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::state::{HttpState, StateStores};
use backend::outbound::persistence::{
    DbPool, DieselCoreFoodStore, DieselMemberStore, DieselPrStore, DieselWeeklyLogStore,
    DieselWorkoutStore, DieselXpStore, PoolConfig, run_pending_migrations,
};
use backend::server::{AppConfig, build_app};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config =
        AppConfig::load().map_err(|e| std::io::Error::other(format!("configuration: {e}")))?;

    let database_url = config.database_url().to_owned();
    tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(std::io::Error::other)?
        .map_err(|e| std::io::Error::other(format!("migrations: {e}")))?;
    info!("migrations applied");

    let pool = DbPool::new(
        PoolConfig::new(config.database_url()).with_max_size(config.pool_max_size()),
    )
    .await
    .map_err(|e| std::io::Error::other(format!("pool: {e}")))?;

    let stores = StateStores {
        prs: Arc::new(DieselPrStore::new(pool.clone())),
        workouts: Arc::new(DieselWorkoutStore::new(pool.clone())),
        xp: Arc::new(DieselXpStore::new(pool.clone())),
        weekly_logs: Arc::new(DieselWeeklyLogStore::new(pool.clone())),
        core_foods: Arc::new(DieselCoreFoodStore::new(pool.clone())),
        members: Arc::new(DieselMemberStore::new(pool)),
    };
    let state = web::Data::new(HttpState::new(
        stores,
        Arc::new(DefaultClock),
        config.xp_enabled,
    ));

    let bind_addr = config.bind_addr().to_owned();
    info!(%bind_addr, xp_enabled = config.xp_enabled, "starting server");
    HttpServer::new(move || build_app(state.clone()))
        .bind(bind_addr)?
        .run()
        .await
}
