//! Core traits of the runtime.
//!
//! *   [`Event`]: The capability every message exchanged between active objects has:
//!     it reports its [`Signal`](crate::Signal) and can be downcast to its payload type.
//! *   [`Dispatch`]: The capability every active object's state has: it reacts to
//!     one event at a time without blocking.

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

pub use dispatch::Dispatch;
pub use event::Event;

/// Defines the [`Dispatch`] trait.
mod dispatch;
/// Defines the [`Event`] trait.
mod event;
