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
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

use acton_ern::Ern;

pub use idle::Idle;

use crate::common::{ActiveHandle, ActiveRuntime};
use crate::traits::Dispatch;

mod idle;
/// Contains the `Started` type-state marker and the event loop.
pub mod started;

/// An active object: private state, a private mailbox and a dedicated execution
/// context, reacting to one event at a time.
///
/// `ActiveObject` composes the runtime parts (handle, runtime reference) with the
/// user-defined `State`, which supplies the dispatch capability by implementing
/// [`Dispatch`]. A type-state parameter enforces the two-phase protocol:
///
/// * [`Idle`]: constructed by
///   [`ActiveRuntime::new_active_with_name`](crate::ActiveRuntime::new_active_with_name).
///   The `model` can be configured and time events created, but nothing runs.
/// * [`Started`](started::Started): [`start`](ActiveObject::start) moved the object
///   onto its own thread, which dispatches `INIT` and then drains the mailbox.
///   Only that thread ever touches the `model` from then on.
///
/// # Type Parameters
///
/// *   `ActiveState`: [`Idle`] or [`Started`](started::Started).
/// *   `State`: The user-defined state. Must implement [`Dispatch`], `Default`
///     (construction zeroes the state), `Send`, `Debug`, and be `'static`.
pub struct ActiveObject<ActiveState, State: Dispatch + Default + Send + Debug + 'static> {
    /// Handle for posting to this active object.
    pub(crate) handle: ActiveHandle,

    /// Reference to the runtime that constructed this active object.
    pub(crate) runtime: ActiveRuntime,

    /// The user-defined state and dispatch logic.
    ///
    /// Configure it while the active object is [`Idle`]; after `start` it is
    /// owned by the active object's thread.
    pub model: State,

    _active_state: PhantomData<ActiveState>,
}

impl<ActiveState, State: Dispatch + Default + Send + Debug + 'static>
    ActiveObject<ActiveState, State>
{
    /// The active object's unique identifier.
    #[inline]
    pub fn id(&self) -> &Ern {
        self.handle.id()
    }

    /// The name the active object was constructed with.
    #[inline]
    pub fn name(&self) -> &str {
        self.handle.name()
    }

    /// The active object's handle.
    #[inline]
    pub const fn handle(&self) -> &ActiveHandle {
        &self.handle
    }

    /// The runtime this active object belongs to.
    #[inline]
    pub const fn runtime(&self) -> &ActiveRuntime {
        &self.runtime
    }
}

impl<ActiveState, State: Dispatch + Default + Send + Debug + 'static> Debug
    for ActiveObject<ActiveState, State>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveObject")
            .field("id", self.id())
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}
