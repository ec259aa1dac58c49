//! Configuration for kitchen-timer
//!
//! Configuration is stored as YAML in the user's config directory.
//! Default location: ~/.config/kitchen-timer/config.yaml

use anyhow::{Context, Result};
use kitchen_core::{DialLayout, TimerColors, TimerMode, DEFAULT_DRAG_SENSITIVITY};
use kitchen_widgets::{FruitSkin, DIAL_SIZE};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Countdown behaviour
    pub timer: TimerConfig,
    /// Dial appearance
    pub display: DisplayConfig,
}

/// Timer configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// `minute` (one turn = 60 s) or `hour` (one turn = 60 min)
    pub mode: TimerMode,
    /// Multiplier applied to horizontal drag deltas
    pub drag_sensitivity: f32,
    /// Countdown step period in milliseconds
    pub tick_period_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            mode: TimerMode::Minute,
            drag_sensitivity: DEFAULT_DRAG_SENSITIVITY,
            tick_period_ms: 16,
        }
    }
}

impl TimerConfig {
    /// Step period, never shorter than one millisecond
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms.max(1))
    }
}

/// Display configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Fruit skin shown at startup
    pub fruit: FruitSkin,
    /// Edge length of the square dial in pixels
    pub dial_size: f32,
    /// Draw layout guide lines over the dial
    pub debug_guides: bool,
    /// Seam, pointer, fade and stroke offsets
    pub layout: DialLayout,
    /// Hex color overrides replacing the skin colors (`#RRGGBB` / `#RRGGBBAA`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<TimerColors>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fruit: FruitSkin::Tomato,
            dial_size: DIAL_SIZE,
            debug_guides: false,
            layout: DialLayout::default(),
            colors: None,
        }
    }
}

impl DisplayConfig {
    /// Colors for `skin`, unless overridden in the config
    pub fn colors_for(&self, skin: FruitSkin) -> TimerColors {
        self.colors.unwrap_or_else(|| skin.colors())
    }
}

/// Preferences file location: `<config dir>/kitchen-timer/config.yaml`
pub fn default_config_path() -> PathBuf {
    let base = dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("kitchen-timer").join("config.yaml")
}

/// Read and parse the preferences file
///
/// `Ok(None)` means there is no file yet.
fn read_config(path: &Path) -> Result<Option<AppConfig>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };
    let config = serde_yaml::from_str(&contents)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(config))
}

/// Load preferences, falling back to defaults
///
/// A missing file is normal on first start. An unreadable or malformed
/// file is logged and ignored; it is overwritten on the next save.
pub fn load_config(path: &Path) -> AppConfig {
    match read_config(path) {
        Ok(Some(config)) => {
            log::info!(
                "Preferences loaded from {}: {} mode, {} skin",
                path.display(),
                config.timer.mode,
                config.display.fruit
            );
            config
        }
        Ok(None) => {
            log::info!("No preferences at {}, using defaults", path.display());
            AppConfig::default()
        }
        Err(e) => {
            log::warn!("Ignoring preferences: {:#}", e);
            AppConfig::default()
        }
    }
}

/// Write preferences, creating the directory on first save
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(config).context("serializing preferences")?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }
    std::fs::write(path, yaml).with_context(|| format!("writing {}", path.display()))?;
    log::debug!("Preferences saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchen_core::Rgba;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.timer.mode, TimerMode::Minute);
        assert_eq!(config.timer.drag_sensitivity, 1.4);
        assert_eq!(config.timer.tick_period(), Duration::from_millis(16));
        assert_eq!(config.display.fruit, FruitSkin::Tomato);
        assert!(!config.display.debug_guides);
        assert!(config.display.colors.is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.yaml");
        assert!(read_config(&path).unwrap().is_none());
        assert_eq!(load_config(&path), AppConfig::default());
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "timer: [this is: not valid").unwrap();
        assert_eq!(load_config(&path), AppConfig::default());
        assert!(read_config(&path).is_err());

        // A bad color is a parse error too
        std::fs::write(&path, "display:\n  colors:\n    background: \"#12\"\n").unwrap();
        assert_eq!(load_config(&path), AppConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "timer:\n  mode: hour\ndisplay:\n  fruit: lemon\n  layout:\n    seam_gap: 9.0\n",
        )
        .unwrap();

        let config = load_config(&path);
        assert_eq!(config.timer.mode, TimerMode::Hour);
        assert_eq!(config.timer.drag_sensitivity, 1.4);
        assert_eq!(config.display.fruit, FruitSkin::Lemon);
        assert_eq!(config.display.layout.seam_gap, 9.0);
        assert_eq!(config.display.layout.seam_height, 170.0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = AppConfig::default();
        config.timer.mode = TimerMode::Hour;
        config.display.fruit = FruitSkin::Orange;
        config.display.colors = Some(TimerColors::with_detail(
            Rgba::from_argb(0xFF336699),
            Rgba::WHITE,
        ));

        save_config(&config, &path).unwrap();
        let yaml = std::fs::read_to_string(&path).unwrap();
        assert!(yaml.contains("'#336699'") || yaml.contains("\"#336699\""));

        let loaded = load_config(&path);
        assert_eq!(loaded.timer.mode, TimerMode::Hour);
        assert_eq!(loaded.display.fruit, FruitSkin::Orange);
        assert_eq!(
            loaded.display.colors.map(|c| c.background.to_hex()),
            Some("#336699".to_string())
        );
    }

    #[test]
    fn test_colors_for_prefers_override() {
        let mut display = DisplayConfig::default();
        assert_eq!(display.colors_for(FruitSkin::Lemon), FruitSkin::Lemon.colors());
        display.colors = Some(TimerColors::default());
        assert_eq!(display.colors_for(FruitSkin::Lemon), TimerColors::default());
    }
}
