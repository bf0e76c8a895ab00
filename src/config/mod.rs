// SPDX-License-Identifier: MPL-2.0
//! Queue configuration, loaded from and saved to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[queue]` - Active notification cap, default lifetime, display position
//! - `[diagnostics]` - Lifecycle event buffer sizing
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `TOAST_QUEUE_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use toast_queue::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.queue.max_visible = Some(5);
//!
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::domain::diagnostics::BufferCapacity;
use crate::domain::notification::{Lifetime, MaxVisible};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Position
// =============================================================================

/// Where the rendering layer should place the toast stack.
///
/// The queue stores this hint and hands it back; it never interprets it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

// =============================================================================
// Section Structs
// =============================================================================

/// Notification queue settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueSection {
    /// Maximum simultaneously active notifications (clamped to 1–100).
    #[serde(
        default = "default_max_visible",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_visible: Option<usize>,

    /// Lifetime for notifications that omit one, in milliseconds. `0` is persistent.
    #[serde(
        default = "default_lifetime_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_lifetime_ms: Option<u64>,

    /// Presentation hint for the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Default for QueueSection {
    fn default() -> Self {
        Self {
            max_visible: default_max_visible(),
            default_lifetime_ms: default_lifetime_ms(),
            position: Some(Position::default()),
        }
    }
}

/// Diagnostics collector settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticsSection {
    /// Lifecycle events kept in memory (clamped to 10–10000).
    #[serde(
        default = "default_diagnostics_capacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub buffer_capacity: Option<usize>,
}

impl Default for DiagnosticsSection {
    fn default() -> Self {
        Self {
            buffer_capacity: default_diagnostics_capacity(),
        }
    }
}

/// On-disk configuration file layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub queue: QueueSection,
    #[serde(default)]
    pub diagnostics: DiagnosticsSection,
}

impl Config {
    /// Resolves the `[queue]` section into validated runtime settings.
    #[must_use]
    pub fn queue_config(&self) -> QueueConfig {
        QueueConfig {
            max_visible: MaxVisible::new(self.queue.max_visible.unwrap_or(DEFAULT_MAX_VISIBLE)),
            default_lifetime: Lifetime::from_millis(
                self.queue.default_lifetime_ms.unwrap_or(DEFAULT_LIFETIME_MS),
            ),
            position: self.queue.position.unwrap_or_default(),
        }
    }

    /// Resolves the `[diagnostics]` buffer capacity.
    #[must_use]
    pub fn diagnostics_capacity(&self) -> BufferCapacity {
        BufferCapacity::new(
            self.diagnostics
                .buffer_capacity
                .unwrap_or(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
        )
    }
}

// =============================================================================
// Runtime Settings
// =============================================================================

/// Validated settings consumed by [`Manager`](crate::notifications::Manager).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    pub max_visible: MaxVisible,
    pub default_lifetime: Lifetime,
    pub position: Position,
}

impl QueueConfig {
    /// Creates settings with the stock defaults (3 visible, 5 s lifetime, bottom-right).
    #[must_use]
    pub fn new() -> Self {
        Config::default().queue_config()
    }

    /// Sets the active notification cap.
    #[must_use]
    pub fn with_max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = MaxVisible::new(max_visible);
        self
    }

    /// Sets the lifetime applied to notifications that omit one.
    #[must_use]
    pub fn with_default_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.default_lifetime = lifetime;
        self
    }

    /// Sets the presentation hint.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Config> for QueueConfig {
    fn from(config: &Config) -> Self {
        config.queue_config()
    }
}

// =============================================================================
// Serde Defaults
// =============================================================================

#[allow(clippy::unnecessary_wraps)] // serde default functions must match field type
fn default_max_visible() -> Option<usize> {
    Some(DEFAULT_MAX_VISIBLE)
}

#[allow(clippy::unnecessary_wraps)]
fn default_lifetime_ms() -> Option<u64> {
    Some(DEFAULT_LIFETIME_MS)
}

#[allow(clippy::unnecessary_wraps)]
fn default_diagnostics_capacity() -> Option<usize> {
    Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            queue: QueueSection {
                max_visible: Some(5),
                default_lifetime_ms: Some(2500),
                position: Some(Position::TopCenter),
            },
            diagnostics: DiagnosticsSection {
                buffer_capacity: Some(50),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_falls_back_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[queue]\nmax_visible = \"lots\"")
            .expect("failed to write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn load_with_override_missing_file_returns_defaults_silently() {
        let temp_dir = tempdir().expect("failed to create temp dir");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn save_with_override_writes_settings_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config = Config::default();

        save_with_override(&config, Some(temp_dir.path().to_path_buf()))
            .expect("save should succeed");

        assert!(temp_dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn partial_section_fills_in_defaults() {
        let config: Config = toml::from_str("[queue]\nposition = \"top-left\"").unwrap();

        assert_eq!(config.queue.position, Some(Position::TopLeft));
        assert_eq!(config.queue.max_visible, Some(DEFAULT_MAX_VISIBLE));
        assert_eq!(config.queue.default_lifetime_ms, Some(DEFAULT_LIFETIME_MS));
        assert_eq!(
            config.diagnostics.buffer_capacity,
            Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
        );
    }

    #[test]
    fn queue_config_clamps_and_normalizes() {
        let config: Config =
            toml::from_str("[queue]\nmax_visible = 0\ndefault_lifetime_ms = 0").unwrap();
        let queue = config.queue_config();

        assert_eq!(queue.max_visible.value(), 1);
        assert_eq!(queue.default_lifetime, Lifetime::Persistent);
    }

    #[test]
    fn default_queue_config_matches_stock_values() {
        let queue = QueueConfig::new();
        assert_eq!(queue.max_visible.value(), 3);
        assert_eq!(
            queue.default_lifetime,
            Lifetime::After(Duration::from_millis(5000))
        );
        assert_eq!(queue.position, Position::BottomRight);
    }

    #[test]
    fn builder_overrides_fields() {
        let queue = QueueConfig::new()
            .with_max_visible(2)
            .with_default_lifetime(Lifetime::Persistent)
            .with_position(Position::TopRight);

        assert_eq!(queue.max_visible.value(), 2);
        assert!(queue.default_lifetime.is_persistent());
        assert_eq!(queue.position, Position::TopRight);
    }

    #[test]
    fn diagnostics_capacity_is_clamped() {
        let config = Config {
            diagnostics: DiagnosticsSection {
                buffer_capacity: Some(1),
            },
            ..Config::default()
        };
        assert_eq!(config.diagnostics_capacity().value(), MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    }

    #[test]
    fn position_serializes_kebab_case() {
        let config = Config {
            queue: QueueSection {
                position: Some(Position::BottomCenter),
                ..QueueSection::default()
            },
            ..Config::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("position = \"bottom-center\""));
    }
}
