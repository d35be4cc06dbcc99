use crate::{
    history::RollingHistory,
    memory::format_label,
    source::MetricSource,
    threshold::ThresholdMonitor,
};
use memtrack_config::SamplerConfig;
use memtrack_core::{LoopState, Reading, RenderSnapshot};
use tracing::{debug, info, warn};

/// The body of the periodic sampling loop.
///
/// Owns the metric source, the rolling history and the threshold monitor.
/// Nothing else mutates them; renderers only ever see the [`RenderSnapshot`]s
/// returned from [`Sampler::tick`].
pub struct Sampler<S> {
    source:  S,
    history: RollingHistory,
    monitor: ThresholdMonitor,
    state:   LoopState,
    ticks:   u64,
}

impl<S: MetricSource> Sampler<S> {
    pub fn new(source: S, config: &SamplerConfig) -> Self {
        Self {
            source,
            history: RollingHistory::new(config.history_capacity),
            monitor: ThresholdMonitor::with_mode(
                config.alert_threshold_percent,
                config.alert_mode,
            ),
            state: LoopState::Running,
            ticks: 0,
        }
    }

    /// Flip between running and paused; returns the new state.
    pub fn toggle_pause(&mut self) -> LoopState {
        self.state = self.state.toggled();
        info!("Sampling {}", if self.state.is_paused() { "paused" } else { "resumed" });
        self.state
    }

    /// Run one tick. Returns `None`, touching nothing, while paused.
    ///
    /// A failed read never stops the loop: it is logged and recorded as
    /// [`Reading::FALLBACK`], whatever the source.
    pub fn tick(&mut self) -> Option<RenderSnapshot> {
        if self.state.is_paused() {
            return None;
        }

        let reading = match self.source.read() {
            Ok(reading) => reading,
            Err(e) => {
                warn!("Metric read failed ({e}); showing fallback reading");
                Reading::FALLBACK
            }
        };
        self.history.push(reading.percent);
        let alert_fired = self.monitor.evaluate(reading.percent);
        self.ticks += 1;

        debug!(
            tick = self.ticks,
            percent = reading.percent,
            alert_fired,
            "sampled"
        );

        Some(RenderSnapshot {
            tick: self.ticks,
            label_text: format_label(&reading),
            bar_value: reading.percent,
            series: self.history.snapshot(),
            alert_fired,
            reading,
            threshold: self.monitor.threshold(),
            capacity: self.history.capacity(),
        })
    }

    pub fn history(&self) -> &RollingHistory {
        &self.history
    }

    pub fn monitor(&self) -> &ThresholdMonitor {
        &self.monitor
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MetricSource, ProcFileSource, ScriptedSource};
    use memtrack_core::{AlertMode, MetricReadError};

    fn config(capacity: usize, threshold: f64) -> SamplerConfig {
        SamplerConfig {
            history_capacity: capacity,
            alert_threshold_percent: threshold,
            ..SamplerConfig::default()
        }
    }

    #[test]
    fn end_to_end_scenario() {
        let source = ScriptedSource::from_percents([10.0, 60.0, 40.0, 70.0]);
        let mut sampler = Sampler::new(source, &config(3, 50.0));

        let snapshots: Vec<RenderSnapshot> = (0..4).filter_map(|_| sampler.tick()).collect();

        let series: Vec<Vec<f64>> = snapshots.iter().map(|s| s.series.clone()).collect();
        assert_eq!(
            series,
            vec![
                vec![10.0],
                vec![10.0, 60.0],
                vec![10.0, 60.0, 40.0],
                vec![60.0, 40.0, 70.0],
            ]
        );

        let alerts: Vec<bool> = snapshots.iter().map(|s| s.alert_fired).collect();
        assert_eq!(alerts, [false, true, false, true]);

        let ticks: Vec<u64> = snapshots.iter().map(|s| s.tick).collect();
        assert_eq!(ticks, [1, 2, 3, 4]);
        assert!(snapshots.iter().all(|s| s.capacity == 3 && s.threshold == 50.0));
    }

    #[test]
    fn snapshot_carries_label_and_bar_value() {
        let source = ScriptedSource::new([Some(Reading::new(450, 1000))]);
        let mut sampler = Sampler::new(source, &SamplerConfig::default());

        let snapshot = sampler.tick().unwrap();
        assert_eq!(snapshot.label_text, "Used: 450 KB / Total: 1,000 KB (45.00%)");
        assert_eq!(snapshot.bar_value, 45.0);
        assert!(snapshot.alert_fired);
        assert!(snapshot.above_threshold());
    }

    #[test]
    fn read_failure_yields_fallback_snapshot() {
        let mut sampler = Sampler::new(ScriptedSource::default(), &SamplerConfig::default());

        let snapshot = sampler.tick().unwrap();
        assert_eq!(snapshot.reading, Reading::FALLBACK);
        assert_eq!(snapshot.series, vec![0.0]);
        assert_eq!(snapshot.label_text, "Used: 0 KB / Total: 1 KB (0.00%)");
        assert!(!snapshot.alert_fired);
    }

    #[test]
    fn repeated_failures_keep_yielding_fallback() {
        let mut sampler = Sampler::new(ScriptedSource::default(), &config(3, 50.0));

        for _ in 0..5 {
            let snapshot = sampler.tick().unwrap();
            assert_eq!(snapshot.reading, Reading { used: 0, total: 1, percent: 0.0 });
        }
        assert_eq!(sampler.history().snapshot(), vec![0.0, 0.0, 0.0]);
        assert_eq!(sampler.source().reads(), 5);
    }

    struct OfflineSource;

    impl MetricSource for OfflineSource {
        fn read(&mut self) -> Result<Reading, MetricReadError> {
            Err(MetricReadError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn fallback_is_the_same_for_boxed_and_direct_sources() {
        let mut direct = Sampler::new(OfflineSource, &SamplerConfig::default());
        let boxed: Box<dyn MetricSource + Send> = Box::new(OfflineSource);
        let mut boxed = Sampler::new(boxed, &SamplerConfig::default());

        let direct = direct.tick().unwrap();
        let boxed = boxed.tick().unwrap();
        assert_eq!(direct.reading, Reading::FALLBACK);
        assert_eq!(boxed.reading, direct.reading);
        assert_eq!(boxed.bar_value, 0.0);
    }

    #[test]
    fn missing_proc_file_falls_back() {
        let source = ProcFileSource::new("/nonexistent/memtrack/mem_tracker");
        let mut sampler = Sampler::new(source, &SamplerConfig::default());
        assert_eq!(sampler.tick().unwrap().reading, Reading::FALLBACK);
    }

    #[test]
    fn pause_suppresses_all_mutation() {
        let source = ScriptedSource::from_percents([10.0, 60.0, 70.0]);
        let mut sampler = Sampler::new(source, &config(30, 50.0));

        sampler.tick().unwrap();
        assert_eq!(sampler.toggle_pause(), LoopState::Paused);

        for _ in 0..10 {
            assert!(sampler.tick().is_none());
        }
        assert_eq!(sampler.history().snapshot(), vec![10.0]);
        assert!(!sampler.monitor().is_armed());
        assert_eq!(sampler.source().reads(), 1);

        assert_eq!(sampler.toggle_pause(), LoopState::Running);
        let snapshot = sampler.tick().unwrap();
        assert_eq!(snapshot.series, vec![10.0, 60.0]);
        assert_eq!(snapshot.tick, 2);
        assert_eq!(sampler.source().reads(), 2);
    }

    #[test]
    fn level_mode_refires_while_above() {
        let source = ScriptedSource::from_percents([60.0, 70.0, 20.0, 80.0]);
        let cfg = SamplerConfig {
            alert_mode: AlertMode::Level,
            ..config(30, 50.0)
        };
        let mut sampler = Sampler::new(source, &cfg);

        let alerts: Vec<bool> = (0..4).filter_map(|_| sampler.tick()).map(|s| s.alert_fired).collect();
        assert_eq!(alerts, [true, true, false, true]);
    }
}
