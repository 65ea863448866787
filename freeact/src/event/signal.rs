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
use std::fmt;

/// The discriminant that tags every [`Event`](crate::Event).
///
/// `Signal::INIT` is reserved: the event loop dispatches it exactly once, before
/// the first mailbox event. Application signals start at [`Signal::USER`]; use
/// [`Signal::user`] to number them relative to that offset.
///
/// Signals are plain constants and can be used directly as `match` patterns:
///
/// ```rust,ignore
/// const TIMEOUT: Signal = Signal::user(0);
///
/// match event.signal() {
///     Signal::INIT | TIMEOUT => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Signal(u16);

impl Signal {
    /// Dispatched to every active object before its event loop starts receiving.
    pub const INIT: Self = Self(0);

    /// The first signal available to applications.
    pub const USER: Self = Self(1);

    /// Creates a signal from its raw value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the application signal `offset` positions after [`Signal::USER`].
    ///
    /// # Panics
    ///
    /// Panics (or fails to compile, in a `const` context) if the result does not
    /// fit in a `u16`.
    #[inline]
    #[must_use]
    pub const fn user(offset: u16) -> Self {
        Self(Self::USER.0 + offset)
    }

    /// Returns the raw value of the signal.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Returns `true` for signals below [`Signal::USER`], which belong to the runtime.
    #[inline]
    #[must_use]
    pub const fn is_reserved(self) -> bool {
        self.0 < Self::USER.0
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INIT {
            f.write_str("INIT")
        } else {
            write!(f, "SIG{}", self.0)
        }
    }
}

impl From<u16> for Signal {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}
