pub mod history;
pub mod memory;
pub mod sampler;
pub mod source;
pub mod threshold;

pub use history::RollingHistory;
pub use sampler::Sampler;
pub use source::{MetricSource, ProcFileSource, ScriptedSource, SimulatedSource, SystemSource};
pub use threshold::ThresholdMonitor;

use memtrack_config::SamplerConfig;
use memtrack_core::RenderSnapshot;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::info;

/// Commands accepted by a running sampler task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    TogglePause,
    Shutdown,
}

/// Handle for steering the task started by [`spawn_sampler`].
#[derive(Debug, Clone)]
pub struct SamplerHandle {
    control: mpsc::Sender<Control>,
}

impl SamplerHandle {
    /// Pause a running sampler or resume a paused one.
    pub async fn toggle_pause(&self) {
        let _ = self.control.send(Control::TogglePause).await;
    }

    /// Stop the sampler task. The snapshot channel closes afterwards.
    pub async fn shutdown(&self) {
        let _ = self.control.send(Control::Shutdown).await;
    }
}

/// Spawn a background Tokio task that ticks a [`Sampler`] every
/// `config.tick_period_ms` milliseconds and forwards each [`RenderSnapshot`]
/// through the returned channel.
///
/// The ticker keeps running while paused; paused ticks just produce nothing.
/// Control messages are handled between ticks, never during one.
/// The task stops when the receiver is dropped or on [`SamplerHandle::shutdown`].
pub fn spawn_sampler<S>(
    source: S,
    config: &SamplerConfig,
) -> (SamplerHandle, mpsc::Receiver<RenderSnapshot>)
where
    S: MetricSource + Send + 'static,
{
    let (tx, rx) = mpsc::channel(4);
    let (control_tx, mut control_rx) = mpsc::channel(8);
    let period = config.tick_period();
    let mut sampler = Sampler::new(source, config);

    tokio::spawn(async move {
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut control_open = true;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Some(snapshot) = sampler.tick() {
                        if tx.send(snapshot).await.is_err() {
                            break; // all receivers dropped
                        }
                    }
                }
                control = control_rx.recv(), if control_open => match control {
                    Some(Control::TogglePause) => {
                        sampler.toggle_pause();
                    }
                    Some(Control::Shutdown) => break,
                    // Every handle dropped; keep sampling uncontrolled.
                    None => control_open = false,
                },
            }
        }

        info!("Sampler stopped after {} samples", sampler.history().len());
    });

    (SamplerHandle { control: control_tx }, rx)
}
