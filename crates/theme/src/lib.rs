pub mod colors;
pub mod palette;

pub use colors::Color;
pub use memtrack_config::ThemeMode;
pub use palette::Palette;

use memtrack_config::ThemeConfig;

/// Compiled theme derived from [`ThemeConfig`].
///
/// Holds both palettes so toggling never has to go back to the config.
/// Calling [`Theme::from_config`] is infallible — invalid color strings fall
/// back to the built-in palette for that mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub mode:  ThemeMode,
    pub dark:  Palette,
    pub light: Palette,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            mode:  cfg.mode,
            dark:  Palette::from_config(&cfg.dark, &Palette::DARK),
            light: Palette::from_config(&cfg.light, &Palette::LIGHT),
        }
    }

    /// The palette for the active mode.
    pub fn palette(&self) -> &Palette {
        match self.mode {
            ThemeMode::Dark => &self.dark,
            ThemeMode::Light => &self.light,
        }
    }

    /// Switch between dark and light; returns the new mode.
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Take the palettes from a reloaded config but keep the current mode,
    /// which the user may have toggled since startup.
    pub fn reload(&mut self, cfg: &ThemeConfig) {
        let mode = self.mode;
        *self = Self::from_config(cfg);
        self.mode = mode;
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}
