mod ai;
mod app;
mod config;
mod domain;
mod infrastructure;
mod triage;

use anyhow::Result;
use infrastructure::{directories, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    let inbox_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.inbox_file.clone());

    let app = app::TriageApp::initialize(config)?;
    app.run(&inbox_path).await
}
