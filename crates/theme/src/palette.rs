use crate::colors::Color;
use memtrack_config::PaletteConfig;

/// Resolved colours for one theme mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background:      Color,
    pub foreground:      Color,
    pub title:           Color,
    pub accent:          Color,
    pub trough:          Color,
    pub plot_background: Color,
    pub axis:            Color,
    pub grid:            Color,
}

impl Palette {
    pub const DARK: Self = Self {
        background:      Color::rgb(0x12, 0x12, 0x12),
        foreground:      Color::rgb(0xE0, 0xE0, 0xE0),
        title:           Color::rgb(0x00, 0xBF, 0xA6),
        accent:          Color::rgb(0xFF, 0x6F, 0x61),
        trough:          Color::rgb(0x2A, 0x2A, 0x2A),
        plot_background: Color::rgb(0x1E, 0x1E, 0x1E),
        axis:            Color::rgb(0xE0, 0xE0, 0xE0),
        grid:            Color::rgb(0x44, 0x44, 0x44),
    };

    pub const LIGHT: Self = Self {
        background:      Color::rgb(0xF0, 0xF0, 0xF0),
        foreground:      Color::rgb(0x12, 0x12, 0x12),
        title:           Color::rgb(0x00, 0x7A, 0x63),
        accent:          Color::rgb(0xFF, 0x6F, 0x61),
        trough:          Color::rgb(0xD0, 0xD0, 0xD0),
        plot_background: Color::WHITE,
        axis:            Color::rgb(0x33, 0x33, 0x33),
        grid:            Color::rgb(0xCC, 0xCC, 0xCC),
    };

    /// Resolve a config palette; unset or invalid entries take `base`'s colour.
    pub fn from_config(cfg: &PaletteConfig, base: &Palette) -> Self {
        let pick = |name: &str, hex: &Option<String>, fallback: Color| match hex {
            None => fallback,
            Some(hex) => Color::from_hex(hex).unwrap_or_else(|| {
                tracing::warn!("Invalid colour '{hex}' for theme key '{name}'; using default.");
                fallback
            }),
        };

        Self {
            background:      pick("background", &cfg.background, base.background),
            foreground:      pick("foreground", &cfg.foreground, base.foreground),
            title:           pick("title", &cfg.title, base.title),
            accent:          pick("accent", &cfg.accent, base.accent),
            trough:          pick("trough", &cfg.trough, base.trough),
            plot_background: pick("plot_background", &cfg.plot_background, base.plot_background),
            axis:            pick("axis", &cfg.axis, base.axis),
            grid:            pick("grid", &cfg.grid, base.grid),
        }
    }
}
