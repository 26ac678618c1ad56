use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod autocomplete;
mod interactive;

use crate::interactive::InteractiveApp;

#[derive(Parser, Debug)]
#[command(name = "leadtrack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lead management assistant - terminal chat interface")]
struct Args {
    /// Load settings from a specific file instead of ~/.leadtrack/settings.toml
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
}

fn main() -> Result<()> {
    setup_tracing()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let args = Args::parse();

    info!(settings = ?args.settings, "CLI startup");

    let mut app = InteractiveApp::new(args.settings).await?;
    app.run().await
}

fn setup_tracing() -> Result<()> {
    use std::fs;
    use tracing_subscriber::fmt;

    // Logs go to a file so they never interleave with the chat output
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
    let trace_dir = home.join(".leadtrack").join("trace");
    fs::create_dir_all(&trace_dir)?;

    let log_file = trace_dir.join("leadtrack.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true),
        )
        .with(EnvFilter::new("info"))
        .init();

    info!("Tracing initialized to {:?}", log_file);
    Ok(())
}
