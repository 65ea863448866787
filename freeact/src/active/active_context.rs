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

use acton_ern::Ern;

use crate::common::{ActiveHandle, EventRef};
use crate::event::Result;

/// What a dispatch handler knows about the active object it runs in.
///
/// Handed to every [`Dispatch::dispatch`](crate::Dispatch::dispatch) call.
#[derive(Debug, Clone)]
pub struct ActiveContext {
    handle: ActiveHandle,
    priority: u8,
}

impl ActiveContext {
    pub(crate) fn new(handle: ActiveHandle, priority: u8) -> Self {
        Self { handle, priority }
    }

    /// The active object's own handle.
    #[inline]
    pub fn handle(&self) -> &ActiveHandle {
        &self.handle
    }

    /// The active object's identifier.
    #[inline]
    pub fn id(&self) -> &Ern {
        self.handle.id()
    }

    /// The active object's name.
    #[inline]
    pub fn name(&self) -> &str {
        self.handle.name()
    }

    /// The priority the active object was started with.
    #[inline]
    pub fn priority(&self) -> u8 {
        self.priority
    }

    /// Posts an event to the active object's own mailbox.
    ///
    /// The event is dispatched after everything already queued.
    ///
    /// # Errors
    ///
    /// Returns [`ActiveError::MailboxFull`](crate::ActiveError::MailboxFull) if the
    /// mailbox is saturated.
    pub fn post_self(&self, event: EventRef) -> Result<()> {
        self.handle.post(event)
    }
}
