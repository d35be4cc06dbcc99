pub mod schema;
pub mod watcher;

pub use schema::{
    ExportConfig, PaletteConfig, SamplerConfig, SourceConfig, SourceKind, ThemeConfig, ThemeMode,
    TrackerConfig,
};
pub use watcher::ConfigWatcher;
pub use memtrack_core::AlertMode;

use memtrack_core::{Result, TrackerError};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `TrackerConfig::default()` if
/// the file doesn't exist so the tracker always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<TrackerConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(TrackerConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| TrackerError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse and validate a TOML document.
pub fn parse(raw: &str) -> Result<TrackerConfig> {
    let config: TrackerConfig =
        toml::from_str(raw).map_err(|e| TrackerError::Config(format!("TOML parse error: {e}")))?;
    validate(&config)?;
    Ok(config)
}

/// Reject settings the sampling loop cannot run with.
pub fn validate(config: &TrackerConfig) -> Result<()> {
    let sampler = &config.sampler;

    if sampler.tick_period_ms == 0 {
        return Err(TrackerError::Config("sampler.tick_period_ms must be at least 1".into()));
    }
    if sampler.history_capacity == 0 {
        return Err(TrackerError::Config("sampler.history_capacity must be at least 1".into()));
    }
    let threshold = sampler.alert_threshold_percent;
    if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
        return Err(TrackerError::Config(format!(
            "sampler.alert_threshold_percent must be within 0..=100, got {threshold}"
        )));
    }

    Ok(())
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("memtrack").join("memtrack.toml")
}
