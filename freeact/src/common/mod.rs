//! Runtime entry point, configuration, and shared types.
//!
//! *   [`FreeAct`]: The entry point that builds an [`ActiveRuntime`].
//! *   [`ActiveRuntime`]: Owns configuration, the time event registry and the tick
//!     source, and constructs active objects and time events.
//! *   [`ActiveHandle`]: The producer side of an active object's mailbox.
//! *   [`config`]: The TOML/XDG configuration layer.

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

// --- Public Re-exports ---
pub use active_handle::{ActiveHandle, WeakActiveHandle};
pub use active_runtime::ActiveRuntime;
pub use launch::FreeAct;

// --- Crate-Internal Re-exports ---
pub use types::*;

// --- Submodules ---

/// Defines common type aliases.
mod types;

/// Defines the `FreeAct` entry point.
mod launch;
/// Defines the `ActiveHandle` used to post events.
mod active_handle;
/// Defines the `ActiveRuntime`.
mod active_runtime;
/// Defines the configuration system.
pub mod config;
