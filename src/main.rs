//! Visitor gate - logs genuine browser visits, skips bots and private traffic
//!
//! Module structure:
//! - `domain/` - Request-scoped value types (signals, decisions)
//! - `services/` - Pure classifiers (signatures, browser, IP, UA summary)
//! - `io/` - External interfaces (HTTP server, log stores, metrics endpoint)
//! - `infra/` - Infrastructure (Config, Metrics)

use clap::Parser;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use visitor_gate::infra::{Config, Metrics};
use visitor_gate::io::{start_http_server, AppState};

/// Visitor gate - visitor classification and logging service
#[derive(Parser, Debug)]
#[command(name = "visitor-gate", version, about)]
struct Args {
    /// Path to TOML configuration file (falls back to CONFIG_FILE, then config/dev.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Listen port, overrides the config file and the PORT env var
    #[arg(short, long)]
    port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    // Default: INFO, use RUST_LOG=debug for per-request detail
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    init_tracing(args.log_json);

    info!(git_hash = %env!("GIT_HASH"), "visitor-gate starting");

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Config::resolve_config_path(&[]),
    };
    let mut config = Config::load_from_path(&config_path).with_env_overrides();
    if let Some(port) = args.port {
        config = config.with_port(port);
    }

    info!(
        config_file = %config.config_file(),
        bind_address = %config.bind_address(),
        port = %config.port(),
        trust_forwarded_for = %config.trust_forwarded_for(),
        visits_file = %config.visits_file(),
        submissions_file = %config.submissions_file(),
        extra_signatures = %config.extra_signatures().len(),
        metrics_enabled = %config.metrics_enabled(),
        "config_loaded"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let metrics = Arc::new(Metrics::new());
    let state = Arc::new(AppState::from_config(&config, metrics.clone()));

    // Periodic metrics log line
    let report_interval = config.metrics_report_interval_secs();
    if report_interval > 0 {
        let metrics = metrics.clone();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(report_interval));
            interval.tick().await;
            loop {
                interval.tick().await;
                metrics.report().log();
            }
        });
    }

    // Handle shutdown on Ctrl+C
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("shutdown_signal_received");
        let _ = shutdown_tx.send(true);
    });

    start_http_server(&config, state, shutdown_rx).await?;

    metrics.report().log();
    info!("visitor-gate shutdown complete");
    Ok(())
}
