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

pub use active_config::ActiveConfig;
pub use active_context::ActiveContext;
pub use active_object::started::Started;
pub use active_object::{ActiveObject, Idle};

/// Defines the start configuration of an active object.
mod active_config;
/// Defines the context handed to every dispatch call.
mod active_context;
/// Defines the type-state active object and its event loop.
mod active_object;
