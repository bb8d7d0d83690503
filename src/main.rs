use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use sakti::cli::Console;
use sakti::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    // Startup banner at info level so something always prints at default verbosity
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    info!(
        target: "sakti",
        "SAKTI console starting: RUST_LOG='{}', api_base={}, token_file='{}'",
        rust_log,
        config.api_base,
        config.token_file.display()
    );

    let console = Console::new(&config)?;
    console.run().await
}
