use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tower_http::services::ServeDir;

use ticklist::db;
use ticklist::server::{self, AppState};

#[derive(Parser)]
#[command(name = "ticklist-server", about = "Task list web server")]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long, env = "TICKLIST_DB", default_value = "db.sqlite")]
    db: String,

    /// Address to listen on
    #[arg(long, env = "TICKLIST_LISTEN", default_value = "127.0.0.1:8080")]
    listen: String,

    /// Directory of static assets served under /static
    #[arg(long, env = "TICKLIST_ASSETS", default_value = "static")]
    assets: String,
}

fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("failed to listen for ctrl-c: {e}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let conn = db::open(&cli.db).with_context(|| format!("failed to open database {}", cli.db))?;
    db::init(&conn).context("failed to initialize schema")?;

    let state = Arc::new(AppState::new(conn));
    let app = server::router(state).nest_service("/static", ServeDir::new(&cli.assets));

    let listener = tokio::net::TcpListener::bind(&cli.listen)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen))?;
    info!("listening on {} (db={})", listener.local_addr()?, cli.db);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}
