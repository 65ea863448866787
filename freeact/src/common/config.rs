/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::path::Path;
use std::time::Duration;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Configuration for the FreeAct runtime.
///
/// Every section falls back to its defaults when missing, so a configuration
/// file only needs to name the values it overrides:
///
/// ```toml
/// [timing]
/// tick_period_ms = 1
///
/// [limits]
/// max_time_events = 32
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeActConfig {
    /// Capacities and registry bounds
    pub limits: LimitsConfig,
    /// Values used when an active object is configured without explicit settings
    pub defaults: DefaultsConfig,
    /// Tick source configuration
    pub timing: TimingConfig,
    /// Behavioral switches
    pub behavior: BehaviorConfig,
}

/// Limits and capacity configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Mailbox capacity used by [`ActiveConfig::default`](crate::ActiveConfig)
    pub default_mailbox_capacity: usize,
    /// Maximum number of time events a runtime's registry accepts
    pub max_time_events: usize,
}

/// Default values for active objects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Name prefix for active objects created without an explicit name
    pub active_name: String,
    /// Priority used by [`ActiveConfig::default`](crate::ActiveConfig) (1 = lowest)
    pub priority: u8,
    /// Stack size in bytes for each active object's thread
    pub stack_size: usize,
}

/// Tick source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Tick period in milliseconds; the granularity of every time event
    pub tick_period_ms: u64,
}

/// Behavioral configuration switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Yield the tick context after a tick that made a waiting active object ready
    pub yield_on_reschedule: bool,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            default_mailbox_capacity: 10,
            max_time_events: 10,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            active_name: "active".to_string(),
            priority: 1,
            stack_size: 256 * 1024,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { tick_period_ms: 10 }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            yield_on_reschedule: true,
        }
    }
}

impl TimingConfig {
    /// The tick period as a `Duration`; a zero period is raised to one millisecond.
    #[must_use]
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms.max(1))
    }
}

impl FreeActConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is not valid TOML or a value has the
    /// wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads configuration from an explicit file, falling back to defaults if the
    /// file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(config_str) => match Self::from_toml_str(&config_str) {
                Ok(config) => {
                    info!("Loaded configuration from: {}", path.display());
                    config
                }
                Err(e) => {
                    error!("Failed to parse configuration file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                error!("Failed to read configuration file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Loads configuration from XDG-compliant locations.
    ///
    /// Looks for `freeact/config.toml` under `$XDG_CONFIG_HOME` (then the XDG
    /// fallbacks). A missing file yields the defaults; a malformed one is logged
    /// and also yields the defaults.
    pub fn load() -> Self {
        let xdg_dirs = match xdg::BaseDirectories::with_prefix("freeact") {
            Ok(dirs) => dirs,
            Err(e) => {
                error!("Failed to initialize XDG directories: {}", e);
                return Self::default();
            }
        };

        match xdg_dirs.find_config_file("config.toml") {
            Some(path) => Self::load_from(&path),
            None => {
                info!("No configuration file found, using defaults");
                Self::default()
            }
        }
    }
}

lazy_static! {
    /// Global configuration instance loaded from XDG-compliant locations.
    pub static ref CONFIG: FreeActConfig = FreeActConfig::load();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_defaults() {
        let config = FreeActConfig::from_toml_str("").unwrap();
        assert_eq!(config, FreeActConfig::default());
        assert_eq!(config.timing.tick_period(), Duration::from_millis(10));
        assert_eq!(config.limits.max_time_events, 10);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = FreeActConfig::from_toml_str(
            r"
            [timing]
            tick_period_ms = 1

            [defaults]
            priority = 3
            ",
        )
        .unwrap();
        assert_eq!(config.timing.tick_period(), Duration::from_millis(1));
        assert_eq!(config.defaults.priority, 3);
        assert_eq!(config.defaults.stack_size, 256 * 1024);
        assert_eq!(config.limits, LimitsConfig::default());
    }

    #[test]
    fn zero_tick_period_is_raised_to_one_millisecond() {
        let timing = TimingConfig { tick_period_ms: 0 };
        assert_eq!(timing.tick_period(), Duration::from_millis(1));
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(FreeActConfig::from_toml_str("[limits]\nmax_time_events = \"many\"").is_err());
    }
}
