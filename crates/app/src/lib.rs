//! Event loop for `memtrack`.
//!
//! Owns the renderer and wires together all background tasks:
//! - Sampler task (one render snapshot per tick)
//! - Keyboard reader thread (pause, theme, export, quit)
//! - Config file watcher (live theme reload on change)
//! - Ctrl-C handler

pub mod input;

use memtrack_config::{
    load as load_config, ConfigWatcher, SamplerConfig, SourceConfig, SourceKind, TrackerConfig,
};
use memtrack_core::{Message, Result};
use memtrack_render::{JsonRenderer, Renderer, TerminalGuard, TerminalRenderer};
use memtrack_system::{
    spawn_sampler, MetricSource, ProcFileSource, SamplerHandle, SimulatedSource, SystemSource,
};
use memtrack_theme::Theme;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// How the binary wants the app to run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Config file to watch for live reloads.
    pub config_path: PathBuf,
    /// Print JSON lines instead of drawing the terminal UI.
    pub headless: bool,
    /// The `[sampler]` section as read from the config file, before any
    /// command-line overrides. Reloads are compared against this.
    pub file_sampler: SamplerConfig,
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Start sampling and rendering. Returns when the user quits.
pub fn run(config: TrackerConfig, options: RunOptions) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(config, options))
}

async fn run_async(config: TrackerConfig, options: RunOptions) -> Result<()> {
    let theme = Theme::from_config(&config.theme);
    let (bus_tx, mut bus_rx) = mpsc::channel::<Message>(16);

    // The guard must outlive the renderer's last draw.
    let _guard = if options.headless {
        None
    } else {
        Some(TerminalGuard::enter()?)
    };

    let renderer: Box<dyn Renderer> = if options.headless {
        Box::new(JsonRenderer::new(std::io::stdout(), theme.clone()))
    } else {
        input::spawn_key_reader(bus_tx.clone());
        Box::new(TerminalRenderer::new(std::io::stdout(), theme.clone()))
    };

    spawn_ctrl_c(bus_tx.clone());
    spawn_config_stream(options.config_path.clone(), bus_tx);

    let (sampler, mut snapshots) = spawn_sampler(open_source(&config.source), &config.sampler);
    let mut app = App::new(renderer, sampler, theme, options.config_path, &config)
        .with_file_sampler(options.file_sampler);
    app.start()?;

    loop {
        let msg = tokio::select! {
            snapshot = snapshots.recv() => match snapshot {
                Some(snapshot) => Message::Snapshot(snapshot),
                None => break,
            },
            Some(msg) = bus_rx.recv() => msg,
        };

        if !app.update(msg).await? {
            break;
        }
    }

    info!("memtrack exiting");
    Ok(())
}

/// Build the metric source named by the config.
pub fn open_source(cfg: &SourceConfig) -> Box<dyn MetricSource + Send> {
    match cfg.kind {
        SourceKind::ProcFile => {
            info!("Reading memory usage from {}", cfg.path.display());
            Box::new(ProcFileSource::new(&cfg.path))
        }
        SourceKind::Simulated => {
            info!("Using the simulated memory signal");
            Box::new(SimulatedSource::new())
        }
        SourceKind::System => {
            info!("Reading live system memory");
            Box::new(SystemSource::new())
        }
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

/// Everything the event loop mutates in response to a [`Message`].
pub struct App<R: Renderer + ?Sized> {
    renderer:    Box<R>,
    sampler:     SamplerHandle,
    theme:       Theme,
    paused:      bool,
    config_path: PathBuf,
    export_dir:  PathBuf,
    /// Sampler section of the config file; changes to it need a restart.
    file_sampler: SamplerConfig,
    restart_pending: bool,
}

impl<R: Renderer + ?Sized> App<R> {
    pub fn new(
        renderer: Box<R>,
        sampler: SamplerHandle,
        theme: Theme,
        config_path: PathBuf,
        config: &TrackerConfig,
    ) -> Self {
        Self {
            renderer,
            sampler,
            theme,
            paused: false,
            config_path,
            export_dir: config.export.directory.clone(),
            file_sampler: config.sampler.clone(),
            restart_pending: false,
        }
    }

    /// Compare reloads against `file_sampler` rather than the running
    /// settings, which may carry command-line overrides.
    #[must_use]
    pub fn with_file_sampler(mut self, file_sampler: SamplerConfig) -> Self {
        self.file_sampler = file_sampler;
        self
    }

    /// Initial draw, before the first snapshot arrives.
    pub fn start(&mut self) -> Result<()> {
        self.renderer.apply_theme(&self.theme)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the config file's sampler section has changed since startup.
    pub fn restart_pending(&self) -> bool {
        self.restart_pending
    }

    // ── Update ────────────────────────────────────────────────────────────────

    /// Handle one message. Returns `false` once the app should exit.
    pub async fn update(&mut self, msg: Message) -> Result<bool> {
        match msg {
            Message::Snapshot(snapshot) => {
                if snapshot.alert_fired {
                    warn!(
                        "Memory usage crossed threshold of {}%: current {:.2}%",
                        snapshot.threshold, snapshot.bar_value
                    );
                }
                self.renderer.render(&snapshot)?;
            }
            Message::TogglePause => {
                self.sampler.toggle_pause().await;
                self.paused = !self.paused;
                self.renderer.set_paused(self.paused)?;
            }
            Message::ToggleTheme => {
                let mode = self.theme.toggle();
                info!("Theme switched to {mode:?}");
                self.renderer.apply_theme(&self.theme)?;
            }
            Message::ExportGraph => match self.renderer.export_graph(&self.export_dir) {
                Ok(path) => {
                    self.renderer.notify(&format!("Graph saved as: {}", path.display()))?;
                }
                Err(e) => {
                    error!("Graph export failed: {e}");
                    self.renderer.notify(&format!("Save failed: {e}"))?;
                }
            },
            Message::ConfigReloaded => self.reload_config()?,
            Message::Shutdown => {
                self.sampler.shutdown().await;
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn reload_config(&mut self) -> Result<()> {
        let cfg = match load_config(&self.config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Config reload failed: {e}");
                return Ok(());
            }
        };

        info!("Config reloaded");
        self.restart_pending = cfg.sampler != self.file_sampler;
        if self.restart_pending {
            info!("Sampler settings changed; they take effect after a restart");
        }

        self.export_dir = cfg.export.directory;
        self.theme.reload(&cfg.theme);
        self.renderer.apply_theme(&self.theme)
    }
}

// ── Background streams ────────────────────────────────────────────────────────

fn spawn_ctrl_c(tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(Message::Shutdown).await;
        }
    });
}

/// Watches the config file for writes and sends `ConfigReloaded`.
fn spawn_config_stream(path: PathBuf, tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        let (_watcher, mut rx) = ConfigWatcher::spawn(path);

        while rx.recv().await.is_some() {
            if tx.send(Message::ConfigReloaded).await.is_err() {
                break;
            }
        }
    });
}
