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
use std::sync::{Arc, OnceLock, Weak};

use acton_ern::Ern;
use static_assertions::assert_impl_all;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{error, trace};

use crate::common::{EventRef, MailboxSender};
use crate::event::{ActiveError, Result};

/// The producer side of an active object's mailbox.
///
/// An `ActiveHandle` exists from the moment an active object is constructed, so
/// time events and peers can refer to it before anything runs. Its mailbox is
/// attached when the active object starts; posting earlier fails with
/// [`ActiveError::InvalidState`].
///
/// Handles are cheap to clone and can be used concurrently from any number of
/// producer threads. Events posted by one producer are dispatched in the order
/// that producer posted them.
#[derive(Clone)]
pub struct ActiveHandle {
    inner: Arc<HandleInner>,
}

/// A non-owning reference to an active object's handle.
///
/// Time events hold their owner this way: the reference is only used to route
/// expiry events and never keeps the owner alive.
#[derive(Clone, Default)]
pub struct WeakActiveHandle {
    inner: Weak<HandleInner>,
}

struct HandleInner {
    id: Ern,
    name: String,
    mailbox: OnceLock<Mailbox>,
}

/// The part of a handle that only exists once the active object has started.
struct Mailbox {
    outbox: MailboxSender,
    capacity: usize,
    priority: u8,
}

impl ActiveHandle {
    pub(crate) fn new(id: Ern, name: String) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                id,
                name,
                mailbox: OnceLock::new(),
            }),
        }
    }

    /// Crate-internal: attaches the mailbox created by `start`.
    pub(crate) fn attach_mailbox(
        &self,
        outbox: MailboxSender,
        capacity: usize,
        priority: u8,
    ) -> Result<()> {
        self.inner
            .mailbox
            .set(Mailbox {
                outbox,
                capacity,
                priority,
            })
            .map_err(|_| ActiveError::InvalidState(format!("{} is already started", self.id())))
    }

    /// The active object's unique identifier.
    #[inline]
    pub fn id(&self) -> &Ern {
        &self.inner.id
    }

    /// The name the active object was constructed with.
    #[inline]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns `true` once the active object has been started.
    #[inline]
    pub fn is_started(&self) -> bool {
        self.inner.mailbox.get().is_some()
    }

    /// The priority the active object was started with (1 = lowest).
    pub fn priority(&self) -> Option<u8> {
        self.inner.mailbox.get().map(|mailbox| mailbox.priority)
    }

    /// The mailbox capacity the active object was started with.
    pub fn mailbox_capacity(&self) -> Option<usize> {
        self.inner.mailbox.get().map(|mailbox| mailbox.capacity)
    }

    /// The number of events currently waiting in the mailbox.
    ///
    /// The value is a snapshot; the consumer may drain the mailbox concurrently.
    pub fn pending(&self) -> usize {
        self.inner
            .mailbox
            .get()
            .map_or(0, |mailbox| mailbox.capacity - mailbox.outbox.capacity())
    }

    /// Creates a non-owning reference to this handle.
    #[must_use]
    pub fn downgrade(&self) -> WeakActiveHandle {
        WeakActiveHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn mailbox(&self) -> Result<&Mailbox> {
        self.inner.mailbox.get().ok_or_else(|| {
            ActiveError::InvalidState(format!("{} has not been started", self.id()))
        })
    }

    /// Posts an event from a normal (non-interrupt) context.
    ///
    /// The enqueue never waits for space: a saturated mailbox is a sizing defect
    /// and is reported immediately.
    ///
    /// # Errors
    ///
    /// * [`ActiveError::MailboxFull`] if the mailbox has no free slot.
    /// * [`ActiveError::InvalidState`] if the active object has not been started
    ///   or its event loop is no longer running.
    pub fn post(&self, event: EventRef) -> Result<()> {
        let mailbox = self.mailbox()?;
        match mailbox.outbox.try_send(event) {
            Ok(()) => {
                trace!(active = %self.id(), "event posted");
                Ok(())
            }
            Err(TrySendError::Full(event)) => {
                error!(
                    active = %self.id(),
                    signal = %event.signal(),
                    capacity = mailbox.capacity,
                    "Mailbox full; event not posted"
                );
                Err(self.mailbox_full(mailbox))
            }
            Err(TrySendError::Closed(_)) => Err(self.loop_gone()),
        }
    }

    /// Posts an event from an interrupt-like context.
    ///
    /// Never blocks and never logs. Sets `*needs_reschedule` to `true` when the
    /// post made a waiting consumer ready, i.e. the mailbox was empty before the
    /// event arrived; the caller should then yield before returning. The flag is
    /// never cleared here, so one flag can collect the outcome of several posts.
    ///
    /// # Errors
    ///
    /// The same as [`post`](Self::post).
    pub fn post_from_isr(&self, event: EventRef, needs_reschedule: &mut bool) -> Result<()> {
        let mailbox = self.mailbox()?;
        let was_empty = mailbox.outbox.capacity() == mailbox.capacity;
        match mailbox.outbox.try_send(event) {
            Ok(()) => {
                if was_empty {
                    *needs_reschedule = true;
                }
                Ok(())
            }
            Err(TrySendError::Full(_)) => Err(self.mailbox_full(mailbox)),
            Err(TrySendError::Closed(_)) => Err(self.loop_gone()),
        }
    }

    fn mailbox_full(&self, mailbox: &Mailbox) -> ActiveError {
        ActiveError::MailboxFull {
            id: self.id().to_string(),
            capacity: mailbox.capacity,
        }
    }

    fn loop_gone(&self) -> ActiveError {
        ActiveError::InvalidState(format!("event loop of {} is no longer running", self.id()))
    }
}

impl Debug for ActiveHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveHandle")
            .field("id", self.id())
            .field("priority", &self.priority())
            .field("mailbox_capacity", &self.mailbox_capacity())
            .finish()
    }
}

impl PartialEq for ActiveHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for ActiveHandle {}

impl WeakActiveHandle {
    /// Returns the handle if the active object still exists.
    pub fn upgrade(&self) -> Option<ActiveHandle> {
        self.inner.upgrade().map(|inner| ActiveHandle { inner })
    }
}

impl Debug for WeakActiveHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(handle) => f.debug_tuple("WeakActiveHandle").field(handle.id()).finish(),
            None => f.write_str("WeakActiveHandle(<gone>)"),
        }
    }
}

assert_impl_all!(ActiveHandle: Send, Sync, Clone);
assert_impl_all!(WeakActiveHandle: Send, Sync, Clone);
