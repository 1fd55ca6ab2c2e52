//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged on top of it, so
//! a config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [header]
//! scroll_threshold = 20.0     # px scrolled before the header switches style
//! height = "5rem"             # header height on wide screens
//! height_mobile = "4rem"      # header height below the desktop breakpoint
//!
//! [parallax]
//! scroll_range = [0.0, 500.0] # scroll offsets mapped onto...
//! offset_range = [0.0, 150.0] # ...this background offset (clamped)
//!
//! [reveal]
//! duration = 0.6              # seconds per entrance transition
//! stagger = 0.1               # seconds between siblings of a group
//! distance = 40.0             # px travelled by entering elements
//! root_margin_bottom = -100.0 # px added to the bottom of the trigger region
//!
//! [colors]
//! primary = "#0033A0"
//! accent = "#DA291C"
//! text = "#0F172A"
//! text_muted = "#475569"
//! surface = "#F8FAFC"
//! background = "#ffffff"
//!
//! [backend]
//! # url = "https://api.example.com"   # or GARAGE_SITE_BACKEND_URL
//! ```
//!
//! Unknown keys are rejected to catch typos early.
//!
//! ## Environment
//!
//! `GARAGE_SITE_BACKEND_URL` overrides `[backend] url`. The API root derived
//! from it is embedded in the page for future use; nothing calls it today.

use crate::engine::{EngineSettings, ParallaxController};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding `[backend] url`.
pub const BACKEND_URL_ENV: &str = "GARAGE_SITE_BACKEND_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Fixed header behaviour and size.
    pub header: HeaderConfig,
    /// Hero background parallax.
    pub parallax: ParallaxConfig,
    /// Entrance animations.
    pub reveal: RevealConfig,
    /// Brand colors.
    pub colors: ColorConfig,
    /// Backend location (reserved).
    pub backend: BackendConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite_non_negative = |v: f64| v.is_finite() && v >= 0.0;

        if !finite_non_negative(self.header.scroll_threshold) {
            return Err(ConfigError::Validation(
                "header.scroll_threshold must be a non-negative number".into(),
            ));
        }
        for (name, [start, end]) in [
            ("parallax.scroll_range", self.parallax.scroll_range),
            ("parallax.offset_range", self.parallax.offset_range),
        ] {
            if !start.is_finite() || !end.is_finite() || end < start {
                return Err(ConfigError::Validation(format!(
                    "{name} must be [start, end] with end >= start"
                )));
            }
        }
        if !(self.reveal.duration.is_finite() && self.reveal.duration > 0.0) {
            return Err(ConfigError::Validation(
                "reveal.duration must be greater than 0".into(),
            ));
        }
        if !finite_non_negative(self.reveal.stagger) {
            return Err(ConfigError::Validation(
                "reveal.stagger must be a non-negative number".into(),
            ));
        }
        if !self.reveal.distance.is_finite() || !self.reveal.root_margin_bottom.is_finite() {
            return Err(ConfigError::Validation(
                "reveal.distance and reveal.root_margin_bottom must be numbers".into(),
            ));
        }
        Ok(())
    }

    /// Apply environment overrides. `lookup` is `std::env::var(..).ok()` in
    /// the binary and a map in tests.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(BACKEND_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.backend.url = Some(url);
        }
        self
    }

    /// The numbers the presentation engine runs on.
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            header_threshold: self.header.scroll_threshold,
            parallax: ParallaxController::new(self.parallax.scroll_range, self.parallax.offset_range),
            bottom_margin: self.reveal.root_margin_bottom,
        }
    }

    /// `{backend.url}/api`, if a backend is configured.
    pub fn api_root(&self) -> Option<String> {
        self.backend
            .url
            .as_deref()
            .map(|url| format!("{}/api", url.trim().trim_end_matches('/')))
    }
}

/// Fixed header settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    /// Scroll offset (px) beyond which the header uses its scrolled style.
    pub scroll_threshold: f64,
    /// Header height on wide screens (CSS value).
    pub height: String,
    /// Header height on narrow screens (CSS value).
    pub height_mobile: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: crate::engine::nav::DEFAULT_HEADER_THRESHOLD,
            height: "5rem".to_string(),
            height_mobile: "4rem".to_string(),
        }
    }
}

/// Hero parallax ranges, `[start, end]` in px.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallaxConfig {
    pub scroll_range: [f64; 2],
    pub offset_range: [f64; 2],
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            scroll_range: [0.0, 500.0],
            offset_range: [0.0, 150.0],
        }
    }
}

/// Entrance animation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Seconds per entrance transition.
    pub duration: f64,
    /// Seconds between consecutive siblings of a staggered group.
    pub stagger: f64,
    /// Distance (px) entering elements travel back to rest.
    pub distance: f64,
    /// Added to the bottom edge of the trigger region; negative values make
    /// elements wait until they are that far inside the viewport.
    pub root_margin_bottom: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            duration: 0.6,
            stagger: 0.1,
            distance: 40.0,
            root_margin_bottom: crate::engine::observer::DEFAULT_BOTTOM_MARGIN,
        }
    }
}

impl RevealConfig {
    pub fn duration(&self) -> Duration {
        millis(self.duration)
    }

    pub fn stagger(&self) -> Duration {
        millis(self.stagger)
    }
}

/// Seconds from the config file, at millisecond precision.
fn millis(seconds: f64) -> Duration {
    Duration::from_millis((seconds * 1000.0).round().max(0.0) as u64)
}

/// Brand colors, emitted as CSS custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Logo, headings, primary buttons, footer background.
    pub primary: String,
    /// Icons in the hero and footer, phone links.
    pub accent: String,
    pub text: String,
    pub text_muted: String,
    /// Background of alternating sections.
    pub surface: String,
    pub background: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            primary: "#0033A0".to_string(),
            accent: "#DA291C".to_string(),
            text: "#0F172A".to_string(),
            text_muted: "#475569".to_string(),
            surface: "#F8FAFC".to_string(),
            background: "#ffffff".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from the content directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A missing file yields the defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join("config.toml");
    let merged = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        let overlay: toml::Value = toml::from_str(&content)?;
        merge_toml(stock_defaults_value(), overlay)
    } else {
        stock_defaults_value()
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# garage-site configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Fixed header
# ---------------------------------------------------------------------------
[header]
# Pixels the page must scroll before the header switches to its
# "scrolled" style (opaque background and shadow).
scroll_threshold = 20.0

# Header height. Every section reserves this much space at the top so
# the fixed header never covers content.
height = "5rem"
height_mobile = "4rem"

# ---------------------------------------------------------------------------
# Hero parallax
# ---------------------------------------------------------------------------
[parallax]
# Scrolling from scroll_range[0] to scroll_range[1] moves the hero
# background from offset_range[0] to offset_range[1]. Outside the range
# the offset stays at the nearest end.
scroll_range = [0.0, 500.0]
offset_range = [0.0, 150.0]

# ---------------------------------------------------------------------------
# Entrance animations
# ---------------------------------------------------------------------------
[reveal]
# Seconds per entrance (fade in while sliding back into place).
duration = 0.6

# Seconds between consecutive cards of the services grid.
stagger = 0.1

# Pixels entering elements travel.
distance = 40.0

# Added to the bottom edge of the viewport when deciding whether an
# element has been reached. -100 waits until it is 100px on screen.
root_margin_bottom = -100.0

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
primary = "#0033A0"
accent = "#DA291C"
text = "#0F172A"
text_muted = "#475569"
surface = "#F8FAFC"
background = "#ffffff"

# ---------------------------------------------------------------------------
# Backend
# ---------------------------------------------------------------------------
[backend]
# Base URL of the backend. The page exposes "{url}/api" as its API root.
# The GARAGE_SITE_BACKEND_URL environment variable takes precedence.
# url = "https://example.com"
"##
}

/// Generate CSS custom properties from the config.
pub fn generate_theme_css(config: &SiteConfig) -> String {
    let colors = &config.colors;
    format!(
        r#":root {{
    --color-primary: {primary};
    --color-accent: {accent};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-surface: {surface};
    --color-bg: {background};
    --header-height: {height_mobile};
    --reveal-duration: {duration}s;
    --reveal-easing: {easing};
}}

@media (min-width: 1024px) {{
    :root {{
        --header-height: {height};
    }}
}}"#,
        primary = colors.primary,
        accent = colors.accent,
        text = colors.text,
        text_muted = colors.text_muted,
        surface = colors.surface,
        background = colors.background,
        height = config.header.height,
        height_mobile = config.header.height_mobile,
        duration = config.reveal.duration,
        easing = crate::engine::reveal::EASING,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{HeaderMode, ScrollState};
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_site_behaviour() {
        let config = SiteConfig::default();
        assert_eq!(config.header.scroll_threshold, 20.0);
        assert_eq!(config.parallax.scroll_range, [0.0, 500.0]);
        assert_eq!(config.parallax.offset_range, [0.0, 150.0]);
        assert_eq!(config.reveal.duration(), Duration::from_millis(600));
        assert_eq!(config.reveal.stagger(), Duration::from_millis(100));
        assert_eq!(config.reveal.root_margin_bottom, -100.0);
        assert!(config.backend.url.is_none());
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.colors.primary, "#0033A0");
        assert_eq!(config.header.height, "5rem");
    }

    #[test]
    fn parse_partial_config() {
        let config: SiteConfig = toml::from_str(
            r##"
[colors]
primary = "#112233"
"##,
        )
        .unwrap();
        assert_eq!(config.colors.primary, "#112233");
        assert_eq!(config.colors.accent, "#DA291C");
        assert_eq!(config.reveal.distance, 40.0);
    }

    #[test]
    fn merge_toml_overrides_nested_keys_only() {
        let overlay: toml::Value = toml::from_str("[reveal]\nstagger = 0.25\n").unwrap();
        let merged = merge_toml(stock_defaults_value(), overlay);
        let config: SiteConfig = merged.try_into().unwrap();
        assert_eq!(config.reveal.stagger, 0.25);
        assert_eq!(config.reveal.duration, 0.6);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.header.scroll_threshold, 20.0);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[header]\nscroll_threshold = 64.0\n\n[parallax]\noffset_range = [0.0, 80.0]\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.header.scroll_threshold, 64.0);
        assert_eq!(config.parallax.offset_range, [0.0, 80.0]);
        assert_eq!(config.parallax.scroll_range, [0.0, 500.0]);
    }

    #[test]
    fn load_config_rejects_unknown_keys() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[header]\nthreshhold = 10\n").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_rejects_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[header\n").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn validation_rejects_reversed_range() {
        let mut config = SiteConfig::default();
        config.parallax.scroll_range = [500.0, 0.0];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("parallax.scroll_range"));
    }

    #[test]
    fn validation_rejects_zero_duration() {
        let mut config = SiteConfig::default();
        config.reveal.duration = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validation_rejects_negative_threshold() {
        let mut config = SiteConfig::default();
        config.header.scroll_threshold = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_overrides_backend_url() {
        let env: HashMap<&str, &str> = [(BACKEND_URL_ENV, "https://api.garage.test/")].into();
        let config = SiteConfig::default().with_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_root().as_deref(), Some("https://api.garage.test/api"));
    }

    #[test]
    fn blank_env_value_is_ignored() {
        let mut config = SiteConfig::default();
        config.backend.url = Some("https://from-file.test".into());
        let config = config.with_env(|_| Some("  ".into()));
        assert_eq!(config.api_root().as_deref(), Some("https://from-file.test/api"));
    }

    #[test]
    fn no_backend_means_no_api_root() {
        assert_eq!(SiteConfig::default().with_env(|_| None).api_root(), None);
    }

    #[test]
    fn engine_settings_follow_config() {
        let mut config = SiteConfig::default();
        config.header.scroll_threshold = 100.0;
        let settings = config.engine_settings();
        assert_eq!(
            HeaderMode::for_scroll(ScrollState::new(60.0), settings.header_threshold),
            HeaderMode::Default
        );
        assert_eq!(settings.parallax.offset(ScrollState::new(250.0)).px(), 75.0);
    }

    #[test]
    fn theme_css_carries_colors_and_header_height() {
        let css = generate_theme_css(&SiteConfig::default());
        assert!(css.contains("--color-primary: #0033A0"));
        assert!(css.contains("--header-height: 4rem"));
        assert!(css.contains("--header-height: 5rem"));
        assert!(css.contains("--reveal-duration: 0.6s"));
    }
}
