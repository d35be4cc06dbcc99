use crate::state::RenderSnapshot;

/// All messages (events) that can flow through the application event bus.
///
/// Sources:
/// - Sampler task        → `Snapshot`
/// - Keyboard thread     → `TogglePause`, `ToggleTheme`, `ExportGraph`, `Shutdown`
/// - Config watcher task → `ConfigReloaded`
#[derive(Debug, Clone)]
pub enum Message {
    // ── Sampler ───────────────────────────────────────────────────────────────
    /// Fresh render snapshot produced by one tick of the sampling loop.
    Snapshot(RenderSnapshot),

    // ── User actions ──────────────────────────────────────────────────────────
    /// Pause or resume sampling.
    TogglePause,
    /// Switch between the dark and light palettes.
    ToggleTheme,
    /// Save the current chart to an image file.
    ExportGraph,

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk — triggers a live reload.
    ConfigReloaded,

    // ── Internal ──────────────────────────────────────────────────────────────
    /// Graceful shutdown requested.
    Shutdown,
}
