use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{Level, info};

use server::config::AppConfig;
use server::database::{ensure_indexes, init_db};
use server::execution::Judge0Client;
use server::judging::FixedPointsPolicy;
use server::judging::sweep::run_stuck_submission_sweep;
use server::problems::FilesystemProblemStore;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = init_db(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    ensure_indexes(&db).await?;
    info!("Database ready");

    let execution = Judge0Client::new(&config.execution)?;
    info!(base_url = %config.execution.base_url, "Execution service configured");

    let problems = FilesystemProblemStore::new(&config.problems.root_dir);
    let scoring = FixedPointsPolicy::from(&config.scoring);

    if config.reconciliation.enabled {
        tokio::spawn(run_stuck_submission_sweep(
            db.clone(),
            config.reconciliation.clone(),
        ));
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        db,
        config: Arc::new(config),
        execution: Arc::new(execution),
        problems: Arc::new(problems),
        scoring: Arc::new(scoring),
    };
    let app = server::build_router(state);

    info!("Server running at http://{}", addr);
    info!("Swagger UI at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
