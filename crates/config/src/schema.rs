use memtrack_core::AlertMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Root configuration structure parsed from `memtrack.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Sampling loop settings.
    pub sampler: SamplerConfig,
    /// Where readings come from.
    pub source: SourceConfig,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
    /// Graph export settings.
    pub export: ExportConfig,
}

/// Settings for the periodic sampling loop. Fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Interval between ticks in milliseconds.
    pub tick_period_ms: u64,
    /// Number of samples kept for the chart.
    pub history_capacity: usize,
    /// Usage (percent) at which the alert fires.
    pub alert_threshold_percent: f64,
    /// Fire once per breach (`edge`) or on every tick above (`level`).
    pub alert_mode: AlertMode,
}

impl SamplerConfig {
    pub const DEFAULT_TICK_PERIOD_MS: u64 = 1_000;
    pub const DEFAULT_HISTORY_CAPACITY: usize = 30;
    pub const DEFAULT_THRESHOLD_PERCENT: f64 = 45.0;

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: Self::DEFAULT_TICK_PERIOD_MS,
            history_capacity: Self::DEFAULT_HISTORY_CAPACITY,
            alert_threshold_percent: Self::DEFAULT_THRESHOLD_PERCENT,
            alert_mode: AlertMode::Edge,
        }
    }
}

/// Which metric source backs the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// Two-line `<label>:<value>` pseudo-file.
    #[default]
    ProcFile,
    /// Sinusoidal test signal.
    Simulated,
    /// Live system RAM via `sysinfo`.
    System,
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "proc-file" | "file" => Ok(Self::ProcFile),
            "simulated" => Ok(Self::Simulated),
            "system" => Ok(Self::System),
            other => Err(format!(
                "unknown source '{other}' (expected proc-file, simulated or system)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Path read by the `proc-file` source.
    pub path: PathBuf,
}

impl SourceConfig {
    pub const DEFAULT_PATH: &'static str = "/proc/mem_tracker";
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::ProcFile,
            path: PathBuf::from(Self::DEFAULT_PATH),
        }
    }
}

/// Dark or light presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Mode used at startup.
    pub mode: ThemeMode,
    pub dark: PaletteConfig,
    pub light: PaletteConfig,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Dark,
            dark: PaletteConfig::dark(),
            light: PaletteConfig::light(),
        }
    }
}

/// Hex colors (`#RRGGBB` or `#RRGGBBAA`) for one theme mode.
///
/// Missing keys inherit from the mode's built-in palette rather than from
/// `Default`, so a partial `[theme.light]` table stays light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Window / chart figure background.
    pub background: Option<String>,
    /// Label text.
    pub foreground: Option<String>,
    /// Header and chart title.
    pub title: Option<String>,
    /// Progress bar fill and chart line.
    pub accent: Option<String>,
    /// Progress bar trough.
    pub trough: Option<String>,
    /// Plot area background.
    pub plot_background: Option<String>,
    /// Axis ticks and spines.
    pub axis: Option<String>,
    /// Dashed grid lines.
    pub grid: Option<String>,
}

impl PaletteConfig {
    pub fn dark() -> Self {
        Self {
            background:      Some("#121212".to_string()),
            foreground:      Some("#E0E0E0".to_string()),
            title:           Some("#00BFA6".to_string()), // teal
            accent:          Some("#FF6F61".to_string()), // coral
            trough:          Some("#2A2A2A".to_string()),
            plot_background: Some("#1E1E1E".to_string()),
            axis:            Some("#E0E0E0".to_string()),
            grid:            Some("#444444".to_string()),
        }
    }

    pub fn light() -> Self {
        Self {
            background:      Some("#F0F0F0".to_string()),
            foreground:      Some("#121212".to_string()),
            title:           Some("#007A63".to_string()),
            accent:          Some("#FF6F61".to_string()),
            trough:          Some("#D0D0D0".to_string()),
            plot_background: Some("#FFFFFF".to_string()),
            axis:            Some("#333333".to_string()),
            grid:            Some("#CCCCCC".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory that exported graphs are written to.
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { directory: PathBuf::from(".") }
    }
}
