use std::sync::Arc;

use poem::listener::TcpListener;
use portfolio_api::{
    core::db::{init_pool, run_migrations},
    init_openapi_route,
    settings::{get_config, Config},
    AppState,
};
use tracing_appender::non_blocking::WorkerGuard;

/// Console logging, or a daily rolling file under `log_dir` when it is set.
/// The returned guard must live as long as the server.
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    let log_level = config.log_level();
    match &config.log_dir {
        Some(log_dir) => {
            let file_appender = tracing_appender::rolling::daily(log_dir, "app.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_writer(non_blocking)
                .with_max_level(log_level)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt().with_max_level(log_level).init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_config()?;
    let _guard = init_tracing(&config);
    tracing::info!(
        "run with env {}, prefix {:?}, token lifetime {} minutes",
        config.env,
        config.prefix,
        config.jwt_exp
    );

    // Init Database Connection
    tracing::info!("Init Postgres connection");
    let pool = init_pool(&config).await?;
    if config.auto_migrate {
        tracing::info!("run pending migrations");
        run_migrations(&pool).await?;
    }
    if let Some(val) = config.default_profile_id {
        tracing::info!("unlinked credentials fall back to profile {}", val);
    }

    // Init App State
    let bind_address = config.bind_address();
    let app_state = Arc::new(AppState {
        db: pool,
        config: config.clone(),
    });

    let app = init_openapi_route(app_state.clone(), &config);
    tracing::info!("run server on {}", bind_address);
    poem::Server::new(TcpListener::bind(bind_address))
        .run(app)
        .await?;
    Ok(())
}
