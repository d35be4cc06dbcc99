//! memtrack — a memory usage tracker for the terminal.
//!
//! Run with:  `RUST_LOG=info memtrack --source simulated --log-file memtrack.log`

use anyhow::{Context, Result};
use clap::Parser;
use memtrack_app::RunOptions;
use memtrack_config::{AlertMode, SourceKind, TrackerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Track memory usage with a live label, progress bar and rolling chart.
#[derive(Debug, Parser)]
#[command(name = "memtrack", version, about)]
struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/memtrack/memtrack.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Metric source: proc-file, simulated or system.
    #[arg(long)]
    source: Option<SourceKind>,

    /// File read by the proc-file source.
    #[arg(long)]
    path: Option<PathBuf>,

    /// Alert threshold in percent.
    #[arg(long)]
    threshold: Option<f64>,

    /// Alert on every tick above the threshold, not just on crossing it.
    #[arg(long)]
    level_alerts: bool,

    /// Emit one JSON object per sample instead of drawing the terminal UI.
    #[arg(long)]
    json: bool,

    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    tracing::info!("memtrack v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = args.config.clone().unwrap_or_else(memtrack_config::default_path);
    let mut config = memtrack_config::load(&config_path)?;
    let file_sampler = config.sampler.clone();
    apply_overrides(&mut config, &args);
    memtrack_config::validate(&config)?;

    let options = RunOptions {
        config_path,
        headless: args.json,
        file_sampler,
    };
    memtrack_app::run(config, options).map_err(Into::into)
}

/// Structured logging — RUST_LOG controls verbosity (default: info).
///
/// The terminal UI owns stdout/stderr, so without `--log-file` logs are off
/// there unless RUST_LOG asks for them.
fn init_logging(args: &Args) -> Result<()> {
    let default = if args.json || args.log_file.is_some() { "info" } else { "off" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    match &args.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot create log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut TrackerConfig, args: &Args) {
    if let Some(kind) = args.source {
        config.source.kind = kind;
    }
    if let Some(path) = &args.path {
        config.source.path = path.clone();
    }
    if let Some(threshold) = args.threshold {
        config.sampler.alert_threshold_percent = threshold;
    }
    if args.level_alerts {
        config.sampler.alert_mode = AlertMode::Level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from([
            "memtrack",
            "--source",
            "simulated",
            "--threshold",
            "80",
            "--level-alerts",
            "--path",
            "/tmp/mem",
        ])
        .unwrap();

        let mut config = TrackerConfig::default();
        apply_overrides(&mut config, &args);

        assert_eq!(config.source.kind, SourceKind::Simulated);
        assert_eq!(config.source.path, PathBuf::from("/tmp/mem"));
        assert_eq!(config.sampler.alert_threshold_percent, 80.0);
        assert_eq!(config.sampler.alert_mode, AlertMode::Level);
    }

    #[test]
    fn no_flags_leave_config_alone() {
        let args = Args::try_parse_from(["memtrack"]).unwrap();
        let mut config = TrackerConfig::default();
        apply_overrides(&mut config, &args);
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn unknown_source_is_rejected() {
        assert!(Args::try_parse_from(["memtrack", "--source", "swap"]).is_err());
    }
}
