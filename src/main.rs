//! ctxlog demo daemon.
//!
//! Registers one logger per configured name (plus `app`), emits a heartbeat
//! at every severity so threshold changes are visible, and optionally
//! hot-reloads levels from the config file and serves the admin API.
//!
//! ```text
//!   ctxlog.toml ──▶ loader ──▶ LoggerRegistry ◀── admin API (GET/PUT levels)
//!        │                          │
//!     watcher ──▶ apply_levels ─────┘
//!                                   ▼
//!                         heartbeat ──▶ StreamSink (stderr)
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use ctxlog::admin::{self, AdminState};
use ctxlog::config::{apply_levels, load_config, ConfigWatcher, LoggingConfig};
use ctxlog::observability::{logging, metrics};
use ctxlog::{ctx, Level, LoggerOptions, LoggerRegistry};

#[derive(Parser)]
#[command(name = "ctxlog")]
#[command(about = "Demo daemon for the ctxlog logger registry", long_about = None)]
struct Args {
    /// Path to the TOML logging config.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Re-apply per-logger levels when the config file changes.
    #[arg(long, requires = "config")]
    watch: bool,

    /// Heartbeat interval in milliseconds.
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => LoggingConfig::default(),
    };

    logging::init_tracing(&config.observability.tracing_filter);
    tracing::info!("ctxlog v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let registry = Arc::new(LoggerRegistry::new(config.default_logger_config()?));
    registry.must_create("app", LoggerOptions::default());
    for (name, level) in config.levels()? {
        if name != "app" {
            registry.must_create(&name, LoggerOptions::default().with_level(level));
        }
    }
    let report = apply_levels(&registry, &config);
    tracing::info!(loggers = ?registry.list(), updated = report.updated.len(), "Loggers registered");

    // Keep the watcher alive for the lifetime of the process.
    let _watcher = match (&args.config, args.watch) {
        (Some(path), true) => {
            let (watcher, mut updates) = ConfigWatcher::new(path);
            let watcher = watcher.run()?;
            let registry = registry.clone();
            tokio::spawn(async move {
                while let Some(new_config) = updates.recv().await {
                    let report = apply_levels(&registry, &new_config);
                    tracing::info!(
                        updated = ?report.updated,
                        unknown = ?report.unknown,
                        "Logging config reloaded"
                    );
                }
            });
            Some(watcher)
        }
        _ => None,
    };

    if config.admin.enabled {
        let listener = TcpListener::bind(&config.admin.bind_address).await?;
        let state = AdminState::new(registry.clone(), config.admin.api_key.as_str());
        tokio::spawn(async move {
            let shutdown = async {
                let _ = tokio::signal::ctrl_c().await;
            };
            if let Err(e) = admin::serve(listener, state, shutdown).await {
                tracing::error!(error = %e, "Admin API stopped");
            }
        });
    }

    let mut ticker = tokio::time::interval(Duration::from_millis(args.interval_ms.max(1)));
    let mut tick: u64 = 0;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tick += 1;
                heartbeat(&registry, tick);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

fn heartbeat(registry: &LoggerRegistry, tick: u64) {
    for name in registry.list() {
        let Ok(logger) = registry.get(&name) else {
            continue;
        };
        let ctx = ctx! { "tick" => tick };
        for level in Level::ALL {
            logger.log(level, &ctx, format_args!("heartbeat at {}", level));
        }
    }
}
