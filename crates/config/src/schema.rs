use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Window title and geometry.
    pub global: GlobalConfig,
    /// The polled sensor endpoint.
    pub source: SourceConfig,
    /// Chart history depth.
    pub window: WindowConfig,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
}

/// Application window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Window title.
    pub title: String,
    /// Initial window width in logical pixels.
    pub width: f32,
    /// Initial window height in logical pixels.
    pub height: f32,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            title: "Sensor Dashboard".to_string(),
            width: 1080.0,
            height: 860.0,
        }
    }
}

/// Where and how often to fetch samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// HTTP endpoint returning the latest sample as JSON.
    pub url: String,
    /// Poll cadence in milliseconds. Constant regardless of failures.
    pub interval_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8000/sensor_data.json".to_string(),
            interval_ms: 1_000,
        }
    }
}

/// Sliding-window settings for the charts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// How many samples each chart keeps (drop-oldest beyond this).
    pub capacity: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { capacity: 30 }
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Startup appearance: `"dark"` or `"light"`. The header toggle flips
    /// it at runtime without touching this file.
    pub mode: String,
    /// Trace + card accent for the RPM channel (hex).
    pub rpm_color: String,
    /// Trace + card accent for the temperature channel (hex).
    pub temperature_color: String,
    /// Trace + card accent for the current channel (hex).
    pub current_color: String,
    /// Base font size in points.
    pub font_size: f32,
    /// `strftime` format for chart x-axis labels and hover readouts.
    pub time_format: String,
    /// Dark palette.
    pub dark: PaletteConfig,
    /// Light palette.
    pub light: PaletteConfig,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            mode:              "dark".to_string(),
            rpm_color:         "#2196f3".to_string(),
            temperature_color: "#f50057".to_string(),
            current_color:     "#ffb74d".to_string(),
            font_size:         14.0,
            time_format:       "%H:%M:%S".to_string(),
            dark:  PaletteConfig::dark(),
            light: PaletteConfig::light(),
        }
    }
}

/// One appearance's base colors (hex strings).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Window background.
    pub background: String,
    /// Card / chart panel background.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Secondary text color (units, axis labels).
    pub text_dim: String,
}

impl PaletteConfig {
    pub fn dark() -> Self {
        Self {
            background: "#0a1929".to_string(),
            surface:    "#1a2027".to_string(),
            text:       "#e7ebf0".to_string(),
            text_dim:   "#8b98a5".to_string(),
        }
    }

    pub fn light() -> Self {
        Self {
            background: "#f5f5f7".to_string(),
            surface:    "#ffffff".to_string(),
            text:       "#1a2027".to_string(),
            text_dim:   "#5a6672".to_string(),
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_polling_contract() {
        let cfg = DashConfig::default();
        assert_eq!(cfg.source.interval_ms, 1_000);
        assert_eq!(cfg.window.capacity, 30);
        assert_eq!(cfg.theme.mode, "dark");
    }

    #[test]
    fn partial_toml_falls_back_per_section() {
        let cfg: DashConfig = toml::from_str(
            r#"
            [source]
            url = "http://10.0.0.5:9000/latest.json"

            [theme]
            mode = "light"
            "#,
        )
        .expect("valid config");

        assert_eq!(cfg.source.url, "http://10.0.0.5:9000/latest.json");
        // Unset keys inside a present section still default.
        assert_eq!(cfg.source.interval_ms, 1_000);
        assert_eq!(cfg.theme.mode, "light");
        assert_eq!(cfg.window.capacity, 30);
    }

    #[test]
    fn palette_blocks_override_individually() {
        let cfg: DashConfig = toml::from_str(
            r##"
            [theme.dark]
            background = "#000000"
            "##,
        )
        .expect("valid config");

        assert_eq!(cfg.theme.dark.background, "#000000");
        assert_eq!(cfg.theme.light.background, PaletteConfig::light().background);
    }
}
