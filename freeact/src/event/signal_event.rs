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
use std::sync::Arc;

use lazy_static::lazy_static;
use static_assertions::assert_impl_all;

use crate::common::EventRef;
use crate::event::Signal;
use crate::traits::Event;

/// An event that carries nothing but its signal.
///
/// Time events post one of these on expiry, and the event loop uses one for
/// [`Signal::INIT`]. Applications use it for any notification without payload:
///
/// ```rust,ignore
/// lazy_static! {
///     static ref BUTTON_PRESSED_EVT: EventRef = SignalEvent::new(BUTTON_PRESSED).into_ref();
/// }
/// handle.post(BUTTON_PRESSED_EVT.clone())?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignalEvent {
    signal: Signal,
}

impl SignalEvent {
    /// Creates an event tagged with `signal`.
    #[inline]
    #[must_use]
    pub const fn new(signal: Signal) -> Self {
        Self { signal }
    }

    /// Wraps the event into a shareable [`EventRef`].
    #[must_use]
    pub fn into_ref(self) -> EventRef {
        Arc::new(self)
    }
}

impl Event for SignalEvent {
    #[inline]
    fn signal(&self) -> Signal {
        self.signal
    }
}

lazy_static! {
    /// The process-wide `INIT` event dispatched before every event loop starts.
    pub static ref INIT_EVENT: EventRef = SignalEvent::new(Signal::INIT).into_ref();
}

assert_impl_all!(SignalEvent: Event, Send, Sync);
