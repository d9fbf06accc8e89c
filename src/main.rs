use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cmm_core::config::{self, Config};
use cmm_feeds::{HttpFeed, Poller};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "cmm", about = "Concrete maturity monitor — telemetry feed projections")]
struct Cli {
    /// Config file (default: ~/.config/cmm/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write debug logs to /tmp/cmm-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the JSON API (default).
    Serve {
        /// Listen address, overrides `server.bind`.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Poll the feed and log a dashboard summary per refresh.
    Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug)?;

    let path = cli.config.clone().unwrap_or_else(config::config_path);
    let config = Config::load_from(&path)
        .with_context(|| format!("loading config from {}", path.display()))?;
    tracing::debug!(?config, "configuration loaded");

    let source = Arc::new(HttpFeed::new(config.feed.clone()).context("invalid feed configuration")?);

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown signal received");
        }
        on_signal.cancel();
    });

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            let bind = bind.unwrap_or(config.server.bind);
            let listener = tokio::net::TcpListener::bind(&bind)
                .await
                .with_context(|| format!("binding {bind}"))?;
            let state = cmm_api::AppState::new(source, config.maturity);
            cmm_api::serve(listener, state, cancel).await?;
        }
        Command::Watch => watch(source, &config, cancel).await,
    }

    tracing::info!("shutdown complete");
    Ok(())
}

async fn watch(source: Arc<HttpFeed>, config: &Config, cancel: CancellationToken) {
    let poller = Poller::spawn(
        source,
        config.poll.interval(),
        config.maturity.clone(),
        cancel.clone(),
    );
    let mut snapshots = poller.subscribe();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let Some(snapshot) = snapshots.borrow_and_update().clone() else {
                    continue;
                };
                let stats = &snapshot.projections.dashboard.stats;
                tracing::info!(
                    generation = snapshot.generation,
                    records = snapshot.record_count,
                    avg_temperature = stats.avg_temperature,
                    health_score = stats.health_score,
                    alerts_resolved = stats.alerts_resolved,
                    ttf_c_h = snapshot.projections.maturity.ttf_c_h,
                    "dashboard refreshed"
                );
            }
        }
    }

    poller.shutdown().await;
}

/// Plain stderr logging, or a debug-level file with `--debug`. `RUST_LOG`
/// overrides the level either way.
fn init_logging(debug: bool) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/cmm-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(filter)
            .init();
        tracing::info!("cmm debug log started — tail -f /tmp/cmm-debug.log");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    }
    Ok(())
}
