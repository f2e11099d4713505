use std::{path::PathBuf, sync::Arc};

use chapter_dashboard::{
    catalog::ChapterStore,
    config::Config,
    server::{AppState, build_router},
    utils::init_log,
};
use clap::Parser;
use tracing::info;

#[derive(Debug, Parser)]
#[command(author, version, about = "Chapter progress dashboard API", long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "dashboard.toml")]
    config: PathBuf,
    #[arg(short = 'H', long)]
    host: Option<String>,
    #[arg(short, long)]
    port: Option<u16>,
    /// Directory for daily-rolling log files, stdout when omitted
    #[arg(short, long)]
    log_dir: Option<PathBuf>,
    /// JSON chapter dataset replacing the built-in one
    #[arg(short, long)]
    dataset: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let mut config = Config::load(&args.config)?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if args.log_dir.is_some() {
        config.log_dir = args.log_dir;
    }
    if args.dataset.is_some() {
        config.dataset = args.dataset;
    }

    let _guard = init_log(config.log_dir.clone())?;

    let store = match &config.dataset {
        Some(path) => ChapterStore::from_dataset(path)?,
        None => ChapterStore::seeded()?,
    };
    let state = AppState::with_config(Arc::new(store), &config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Starting server at http://{}", listener.local_addr()?);
    info!(
        "Swagger UI available at http://{}/swagger-ui/",
        listener.local_addr()?
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}
