use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sheetdesk::catalog::SectionCatalog;
use sheetdesk::config::Config;
use sheetdesk::router::{DeskState, desk_router};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        root_folder = %cfg.root_folder.display(),
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        cookie_secret = cfg.cookie_secret.is_some()
    );

    let pool = sheetdesk::db::open(&cfg.database_url).await?;

    let catalog = SectionCatalog::new(cfg.root_folder.clone());
    match catalog.sections() {
        Ok(sections) => info!(count = sections.len(), ?sections, "sections discovered"),
        Err(e) => warn!(
            path = %cfg.root_folder.display(),
            error = %e,
            "failed to list sections"
        ),
    }

    let state = DeskState::new(pool.clone(), catalog, cfg.cookie_key());
    let app = desk_router(state);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("database closed; bye");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
