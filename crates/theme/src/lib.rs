pub mod colors;
pub mod style;

pub use colors::Color;
pub use style::{CardStyle, ChartStyle};

use dash_config::{PaletteConfig, ThemeConfig};
use dash_core::SensorField;

/// Dark or light appearance. Startup mode comes from the config file; the
/// header button flips it at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    /// Parse the config `mode` key. Anything that isn't `"light"` is dark.
    pub fn from_config(mode: &str) -> Self {
        if mode.eq_ignore_ascii_case("light") {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        }
    }

    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

/// Compiled theme derived from [`ThemeConfig`] plus the active [`ThemeMode`].
///
/// All colors are pre-parsed from hex strings into normalised `[0, 1]` RGBA.
/// Calling [`Theme::from_config`] is infallible — invalid color strings fall
/// back to safe defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode:        ThemeMode,
    pub background:  Color,
    pub surface:     Color,
    pub text:        Color,
    pub text_dim:    Color,
    /// Per-channel accents (trace, card wash, value highlight).
    pub rpm:         Color,
    pub temperature: Color,
    pub current:     Color,
    pub font_size:   f32,
    /// `strftime` format for x-axis labels and hover readouts.
    pub time_format: String,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section and the
    /// currently active mode.
    pub fn from_config(cfg: &ThemeConfig, mode: ThemeMode) -> Self {
        let palette = match mode {
            ThemeMode::Dark => &cfg.dark,
            ThemeMode::Light => &cfg.light,
        };
        let fallback = match mode {
            ThemeMode::Dark => PaletteConfig::dark(),
            ThemeMode::Light => PaletteConfig::light(),
        };
        let base = |hex: &str, def: &str| {
            Color::from_hex(hex)
                .or_else(|| Color::from_hex(def))
                .unwrap_or(Color::NAVY)
        };

        Self {
            mode,
            background:  base(&palette.background, &fallback.background),
            surface:     base(&palette.surface, &fallback.surface),
            text:        base(&palette.text, &fallback.text),
            text_dim:    base(&palette.text_dim, &fallback.text_dim),
            rpm:         Color::from_hex(&cfg.rpm_color).unwrap_or(Color::BLUE),
            temperature: Color::from_hex(&cfg.temperature_color).unwrap_or(Color::PINK),
            current:     Color::from_hex(&cfg.current_color).unwrap_or(Color::AMBER),
            font_size:   cfg.font_size,
            time_format: cfg.time_format.clone(),
        }
    }

    /// The accent color of one sensor channel.
    #[must_use]
    pub fn series_color(&self, field: SensorField) -> Color {
        match field {
            SensorField::Rpm => self.rpm,
            SensorField::Temperature => self.temperature,
            SensorField::Current => self.current,
        }
    }

    /// Card styling for one channel: accent washes over the surface.
    #[must_use]
    pub fn card_style(&self, field: SensorField) -> CardStyle {
        let accent = self.series_color(field);
        CardStyle {
            background: accent.with_alpha(0.10),
            border:     accent.with_alpha(0.25),
            accent,
        }
    }

    /// Chart styling for one channel.
    #[must_use]
    pub fn chart_style(&self, field: SensorField) -> ChartStyle {
        let accent = self.series_color(field);
        let grid_alpha = match self.mode {
            ThemeMode::Dark => 0.08,
            ThemeMode::Light => 0.12,
        };
        ChartStyle {
            background: self.surface,
            accent,
            fill:   accent.with_alpha(0.18),
            grid:   self.text.with_alpha(grid_alpha),
            labels: self.text_dim,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default(), ThemeMode::Dark)
    }
}
