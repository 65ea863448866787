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
use crate::active::ActiveContext;
use crate::common::EventRef;

/// The dispatch capability of an active object's state.
///
/// The event loop calls [`dispatch`](Dispatch::dispatch) once with the reserved
/// [`Signal::INIT`](crate::Signal::INIT) event before it starts receiving, and
/// then once per event taken from the mailbox, always from the active object's
/// own thread. Implementations run to completion: they may post events and
/// arm or disarm time events, but must never block on I/O or on a mailbox.
pub trait Dispatch {
    /// Reacts to a single event.
    ///
    /// `me` gives access to the active object's own handle, identity and
    /// priority, e.g. for posting events to itself.
    fn dispatch(&mut self, me: &ActiveContext, event: &EventRef);
}
