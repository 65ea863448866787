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

use tracing::trace;

use crate::common::config::FreeActConfig;
use crate::common::ActiveRuntime;

/// The entry point for initializing a FreeAct runtime.
///
/// A marker type: use [`FreeAct::launch`] or [`FreeAct::launch_with_config`].
///
/// ```rust,ignore
/// use freeact::prelude::*;
///
/// fn main() -> freeact::Result<()> {
///     let runtime = FreeAct::launch();
///     // construct active objects and time events, start the active objects...
///     runtime.start_ticker()
/// }
/// ```
#[derive(Default, Debug, Clone)]
pub struct FreeAct;

impl FreeAct {
    /// Initializes a runtime with configuration loaded from XDG-compliant locations.
    #[must_use]
    pub fn launch() -> ActiveRuntime {
        Self::launch_with_config(FreeActConfig::load())
    }

    /// Initializes a runtime with an explicit configuration.
    #[must_use]
    pub fn launch_with_config(config: FreeActConfig) -> ActiveRuntime {
        trace!("Starting FreeAct runtime: {:?}", config);
        ActiveRuntime::new(config)
    }
}
