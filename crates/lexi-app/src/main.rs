use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use lexi_config::Config;
use lexi_types::Mode;
use tracing_subscriber::EnvFilter;

mod controller;
mod events;
mod io;
mod profile;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[derive(Parser)]
#[command(name = "lexi", about = "Level-aware English reading companion")]
struct Args {
    /// JSON config file; environment defaults are used without one
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Profile name, stored under the configured profile directory
    #[arg(short, long, default_value = "main")]
    profile: String,

    /// Initial annotation mode
    #[arg(short, long, default_value = "support", value_parser = parse_mode)]
    mode: Mode,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive reader on stdin (default)
    Read,
    /// Print the effective configuration
    Config,
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    Mode::parse(s).ok_or_else(|| format!("unknown mode '{s}', expected support or challenge"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LEXI_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn log_task_result(result: Result<anyhow::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("Task exited with error: {e}"),
        Err(e) => tracing::error!("Task panicked: {e}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            Config::load(path)?
        }
        None => Config::new(),
    };

    if let Some(Command::Config) = args.command {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let state = Arc::new(AppState::bootstrap(config, &args.profile).await);
    let controller = AppController::new(state).await;
    let mut tasks = controller.spawn_tasks(args.mode);
    let cancel = controller.cancel_token();

    println!("{}", io::HELP);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received");
        }
        _ = cancel.cancelled() => {}
        Some(result) = tasks.join_next() => log_task_result(result),
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        log_task_result(result);
    }

    tracing::info!("Bye");
    Ok(())
}
