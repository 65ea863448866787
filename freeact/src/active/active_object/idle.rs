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
use std::thread;

use tokio::sync::mpsc::channel;
use tracing::{error, instrument, trace};

use crate::active::{ActiveConfig, ActiveObject};
use crate::common::{ActiveHandle, ActiveRuntime};
use crate::event::{ActiveError, Result, Signal};
use crate::time::TimeEvent;
use crate::traits::Dispatch;

/// Type-state marker for an [`ActiveObject`] that has been constructed but not started.
///
/// While `Idle`, the active object's `model` can be configured and time events
/// owned by it can be constructed. Its handle already exists, but posting to it
/// fails with [`ActiveError::InvalidState`] until [`ActiveObject::start`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Idle;

impl<State: Dispatch + Default + Send + Debug + 'static> ActiveObject<Idle, State> {
    pub(crate) fn new(runtime: ActiveRuntime, handle: ActiveHandle) -> Self {
        Self {
            handle,
            runtime,
            model: State::default(),
            _active_state: PhantomData,
        }
    }

    /// Constructs a time event owned by this active object.
    ///
    /// Shorthand for [`ActiveRuntime::new_time_event`] with this object's handle.
    ///
    /// # Errors
    ///
    /// See [`ActiveRuntime::new_time_event`].
    pub fn new_time_event(&self, signal: Signal) -> Result<TimeEvent> {
        self.runtime.new_time_event(signal, &self.handle)
    }

    /// Starts the active object.
    ///
    /// Allocates the bounded mailbox and spawns the dedicated execution context,
    /// a thread named after the active object and its priority with the
    /// configured stack size. The thread immediately dispatches
    /// [`Signal::INIT`] and then blocks on the mailbox.
    ///
    /// Operating-system thread priorities are not applied; the priority is
    /// recorded on the handle and in the thread name.
    ///
    /// # Errors
    ///
    /// * [`ActiveError::InvalidState`] for priority 0.
    /// * [`ActiveError::ResourceExhausted`] for a zero mailbox capacity or when
    ///   the thread cannot be spawned. Both leave the application half wired and
    ///   should abort initialization.
    #[instrument(skip(self, config), fields(active = %self.handle.name()))]
    pub fn start(self, config: &ActiveConfig) -> Result<ActiveHandle> {
        config.validate()?;
        let priority = config.priority();
        let (outbox, inbox) = channel(config.mailbox_capacity());
        self.handle
            .attach_mailbox(outbox, config.mailbox_capacity(), priority)?;

        let handle = self.handle.clone();
        trace!("Model state before start: {:?}", self.model);
        let active: ActiveObject<super::started::Started, State> = self.into();

        thread::Builder::new()
            .name(format!("{}:p{}", handle.name(), priority))
            .stack_size(config.stack_size())
            .spawn(move || active.run(inbox, priority))
            .map_err(|e| {
                error!("Failed to spawn execution context for {}: {}", handle.id(), e);
                ActiveError::ResourceExhausted(format!(
                    "cannot create the execution context of {}: {e}",
                    handle.id()
                ))
            })?;

        trace!(
            "Active object {} started (priority {}, mailbox capacity {})",
            handle.id(),
            priority,
            config.mailbox_capacity()
        );
        Ok(handle)
    }
}
