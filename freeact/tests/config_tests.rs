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
use std::fs;
use std::time::Duration;

use freeact::prelude::*;
use tempfile::TempDir;

use crate::setup::initialize_tracing;

mod setup;

/// An explicit configuration file overrides only the values it names.
#[test]
fn test_load_from_file_overrides_named_values() -> anyhow::Result<()> {
    initialize_tracing();
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
        [limits]
        max_time_events = 32

        [defaults]
        active_name = "worker"
        priority = 4

        [timing]
        tick_period_ms = 1

        [behavior]
        yield_on_reschedule = false
        "#,
    )?;

    let config = FreeActConfig::load_from(&path);
    assert_eq!(config.limits.max_time_events, 32);
    assert_eq!(config.limits.default_mailbox_capacity, 10);
    assert_eq!(config.defaults.active_name, "worker");
    assert_eq!(config.defaults.priority, 4);
    assert_eq!(config.defaults.stack_size, 256 * 1024);
    assert_eq!(config.timing.tick_period(), Duration::from_millis(1));
    assert!(!config.behavior.yield_on_reschedule);

    let runtime = FreeAct::launch_with_config(config);
    assert_eq!(runtime.tick_period(), Duration::from_millis(1));
    assert_eq!(runtime.registry().capacity(), 32);
    let active = runtime.new_active::<crate::setup::Probe>()?;
    assert_eq!(active.name(), "worker-1");

    temp_dir.close()?;
    Ok(())
}

/// A malformed or missing file falls back to the defaults.
#[test]
fn test_unusable_files_fall_back_to_defaults() -> anyhow::Result<()> {
    initialize_tracing();
    let temp_dir = TempDir::new()?;

    let malformed = temp_dir.path().join("malformed.toml");
    fs::write(&malformed, "[timing]\ntick_period_ms = \"fast\"\n")?;
    assert_eq!(FreeActConfig::load_from(&malformed), FreeActConfig::default());

    let missing = temp_dir.path().join("missing.toml");
    assert_eq!(FreeActConfig::load_from(&missing), FreeActConfig::default());

    temp_dir.close()?;
    Ok(())
}

/// `load` finds `freeact/config.toml` under `XDG_CONFIG_HOME`.
#[test]
fn test_xdg_directory_resolution() -> anyhow::Result<()> {
    initialize_tracing();
    let temp_dir = TempDir::new()?;
    let config_dir = temp_dir.path().join("freeact");
    fs::create_dir_all(&config_dir)?;
    fs::write(
        config_dir.join("config.toml"),
        "[limits]\ndefault_mailbox_capacity = 64\n",
    )?;

    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    let config = FreeActConfig::load();
    assert_eq!(config.limits.default_mailbox_capacity, 64);
    assert_eq!(config.timing, FreeActConfig::default().timing);

    temp_dir.close()?;
    Ok(())
}
