use serde::{Deserialize, Serialize};

/// A single `(used, total)` memory reading with its derived percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Memory in use (KB).
    pub used: u64,
    /// Memory available in total (KB).
    pub total: u64,
    /// `used / total` as a percentage in `[0, 100]`.
    pub percent: f64,
}

impl Reading {
    /// Substituted whenever a metric source fails. Indistinguishable from a
    /// genuine idle reading on screen.
    pub const FALLBACK: Self = Self { used: 0, total: 1, percent: 0.0 };

    /// Build a reading, deriving `percent`. A zero `total` yields `0%`.
    #[must_use]
    pub fn new(used: u64, total: u64) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            (100.0 * used as f64 / total as f64).clamp(0.0, 100.0)
        };
        Self { used, total, percent }
    }
}

impl Default for Reading {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Whether the sampling loop is currently doing work on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopState {
    #[default]
    Running,
    Paused,
}

impl LoopState {
    /// The opposite state.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Running => Self::Paused,
            Self::Paused => Self::Running,
        }
    }

    pub fn is_paused(self) -> bool {
        self == Self::Paused
    }
}

/// How the threshold alert fires while usage stays above the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertMode {
    /// Fire once per continuous breach.
    #[default]
    Edge,
    /// Fire on every tick at or above the threshold.
    Level,
}

/// Display-ready values handed from the sampler to a renderer once per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    /// Sequence number of this snapshot, starting at 1.
    pub tick: u64,
    /// `Used: 1,234 KB / Total: 5,678 KB (21.73%)`.
    pub label_text: String,
    /// Progress bar value, in percent.
    pub bar_value: f64,
    /// Copy of the rolling history, oldest first.
    pub series: Vec<f64>,
    /// `true` when the threshold alert fired on this tick.
    pub alert_fired: bool,
    /// The reading this snapshot was built from.
    pub reading: Reading,
    /// Alert threshold in percent.
    pub threshold: f64,
    /// History capacity; the chart's x-range.
    pub capacity: usize,
}

impl RenderSnapshot {
    /// `true` while the sampled value sits at or above the threshold.
    #[must_use]
    pub fn above_threshold(&self) -> bool {
        self.bar_value >= self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_derived_from_used_and_total() {
        let reading = Reading::new(450, 1000);
        assert_eq!(reading.percent, 45.0);
    }

    #[test]
    fn zero_total_yields_zero_percent() {
        let reading = Reading::new(5, 0);
        assert_eq!(reading.percent, 0.0);
        assert_eq!(reading.used, 5);
    }

    #[test]
    fn percent_is_clamped_when_used_exceeds_total() {
        assert_eq!(Reading::new(3, 2).percent, 100.0);
    }

    #[test]
    fn fallback_reading() {
        assert_eq!(Reading::default(), Reading { used: 0, total: 1, percent: 0.0 });
    }

    #[test]
    fn loop_state_toggles() {
        assert_eq!(LoopState::Running.toggled(), LoopState::Paused);
        assert_eq!(LoopState::Paused.toggled(), LoopState::Running);
        assert!(LoopState::Paused.is_paused());
    }
}
