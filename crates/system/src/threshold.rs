use memtrack_core::AlertMode;

/// Decides, per sample, whether the usage alert should fire.
///
/// `armed` tracks whether the last sample was at or above the threshold. In
/// [`AlertMode::Edge`] the alert fires only when that flips from false to true.
#[derive(Debug, Clone)]
pub struct ThresholdMonitor {
    threshold: f64,
    mode:      AlertMode,
    armed:     bool,
}

impl ThresholdMonitor {
    /// An edge-triggered monitor.
    pub fn new(threshold: f64) -> Self {
        Self::with_mode(threshold, AlertMode::Edge)
    }

    pub fn with_mode(threshold: f64, mode: AlertMode) -> Self {
        Self { threshold, mode, armed: false }
    }

    /// Feed the latest sample; returns `true` if the alert fires on it.
    pub fn evaluate(&mut self, value: f64) -> bool {
        let above = value >= self.threshold;
        let was_armed = std::mem::replace(&mut self.armed, above);

        match self.mode {
            AlertMode::Edge => above && !was_armed,
            AlertMode::Level => above,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn mode(&self) -> AlertMode {
        self.mode
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

impl Default for ThresholdMonitor {
    fn default() -> Self {
        Self::new(45.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fired(monitor: &mut ThresholdMonitor, values: &[f64]) -> Vec<bool> {
        values.iter().map(|v| monitor.evaluate(*v)).collect()
    }

    #[test]
    fn fires_once_per_continuous_breach() {
        let mut monitor = ThresholdMonitor::new(45.0);
        assert_eq!(
            fired(&mut monitor, &[10.0, 50.0, 60.0, 50.0, 70.0]),
            [false, true, false, false, false]
        );
    }

    #[test]
    fn rearms_after_dropping_below() {
        let mut monitor = ThresholdMonitor::new(45.0);
        assert_eq!(
            fired(&mut monitor, &[10.0, 50.0, 60.0, 40.0, 70.0]),
            [false, true, false, false, true]
        );
    }

    #[test]
    fn exactly_at_threshold_counts_as_breach() {
        let mut monitor = ThresholdMonitor::new(45.0);
        assert!(monitor.evaluate(45.0));
        assert!(monitor.is_armed());
        assert!(!monitor.evaluate(44.99));
        assert!(!monitor.is_armed());
    }

    #[test]
    fn first_sample_above_threshold_fires() {
        let mut monitor = ThresholdMonitor::default();
        assert!(monitor.evaluate(99.0));
    }

    #[test]
    fn level_mode_fires_on_every_tick_above() {
        let mut monitor = ThresholdMonitor::with_mode(45.0, AlertMode::Level);
        assert_eq!(
            fired(&mut monitor, &[10.0, 50.0, 60.0, 40.0, 70.0]),
            [false, true, true, false, true]
        );
        assert_eq!(monitor.mode(), AlertMode::Level);
    }
}
