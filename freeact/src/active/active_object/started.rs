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

use std::fmt::Debug;
use std::marker::PhantomData;

use tracing::{instrument, trace};

use crate::active::{ActiveContext, ActiveObject, Idle};
use crate::common::MailboxReceiver;
use crate::event::INIT_EVENT;
use crate::traits::Dispatch;

/// Type-state marker for an [`ActiveObject`] whose event loop is running.
///
/// A started active object lives on its own thread and is never reachable from
/// outside; interaction happens through its [`ActiveHandle`](crate::ActiveHandle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Started;

impl<State: Dispatch + Default + Send + Debug + 'static> From<ActiveObject<Idle, State>>
    for ActiveObject<Started, State>
{
    fn from(idle: ActiveObject<Idle, State>) -> Self {
        Self {
            handle: idle.handle,
            runtime: idle.runtime,
            model: idle.model,
            _active_state: PhantomData,
        }
    }
}

impl<State: Dispatch + Default + Send + Debug + 'static> ActiveObject<Started, State> {
    /// The event loop.
    ///
    /// Initializing: dispatch the `INIT` event exactly once. Running: block until
    /// the mailbox yields an event, dispatch it, repeat. The receive is the only
    /// place this thread ever suspends.
    #[instrument(skip(self, inbox), fields(active = %self.handle.name()))]
    pub(crate) fn run(mut self, mut inbox: MailboxReceiver, priority: u8) {
        let me = ActiveContext::new(self.handle.clone(), priority);

        trace!("Dispatching INIT");
        self.model.dispatch(&me, &INIT_EVENT);

        while let Some(event) = inbox.blocking_recv() {
            trace!(signal = %event.signal(), "Dispatching event");
            self.model.dispatch(&me, &event);
        }

        trace!("Mailbox closed; event loop of {} finished", self.id());
    }
}
