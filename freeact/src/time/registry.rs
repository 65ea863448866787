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
use std::mem;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use parking_lot::Mutex;
use static_assertions::assert_impl_all;
use tracing::trace;

use crate::common::WeakActiveHandle;
use crate::event::{ActiveError, Result, Signal};
use crate::time::{TimeEvent, TimeEventSlot};

/// Converts `duration` into whole ticks of `tick_period`, rounding up.
///
/// Saturates at `u32::MAX` ticks.
pub(crate) fn ticks_for(duration: Duration, tick_period: Duration) -> u32 {
    let period = tick_period.as_nanos().max(1);
    u32::try_from(duration.as_nanos().div_ceil(period)).unwrap_or(u32::MAX)
}

/// The stable index of a time event within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeEventId(usize);

impl TimeEventId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The registration order of the time event, starting at zero.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TimeEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "te#{}", self.0)
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Time events that expired and whose event was handed to the owner.
    pub expired: usize,
    /// Time events that expired but whose owner no longer exists.
    pub orphaned: usize,
}

/// The bounded set of time events scanned on every tick.
///
/// Membership is append-only until the registry is sealed, which happens at
/// the first tick (or when a [`Ticker`](crate::Ticker) is spawned for it).
/// After that the set of slots is immutable and the scan never takes a lock;
/// only the state of each time event changes.
#[derive(Debug)]
pub struct TimeEventRegistry {
    tick_period: Duration,
    capacity: usize,
    pending: Mutex<Vec<Arc<TimeEventSlot>>>,
    sealed: OnceLock<Box<[Arc<TimeEventSlot>]>>,
}

impl TimeEventRegistry {
    /// Creates an empty registry holding at most `capacity` time events, ticked
    /// every `tick_period`.
    pub fn new(tick_period: Duration, capacity: usize) -> Self {
        Self {
            tick_period,
            capacity,
            pending: Mutex::new(Vec::with_capacity(capacity)),
            sealed: OnceLock::new(),
        }
    }

    /// Registers a disarmed time event for `signal`, owned by `owner`.
    ///
    /// # Errors
    ///
    /// * [`ActiveError::InvalidState`] once the registry is sealed.
    /// * [`ActiveError::ResourceExhausted`] when `capacity` time events exist.
    pub fn register(&self, signal: Signal, owner: WeakActiveHandle) -> Result<TimeEvent> {
        let mut pending = self.pending.lock();
        if self.sealed.get().is_some() {
            return Err(ActiveError::InvalidState(format!(
                "cannot register a time event for {signal}: the tick source has started"
            )));
        }
        if pending.len() >= self.capacity {
            return Err(ActiveError::ResourceExhausted(format!(
                "time event registry is full ({} time events)",
                self.capacity
            )));
        }
        let id = TimeEventId::new(pending.len());
        let slot = Arc::new(TimeEventSlot::new(id, signal, owner));
        pending.push(Arc::clone(&slot));
        trace!("Registered time event {} for signal {}", id, signal);
        Ok(TimeEvent::new(slot, self.tick_period))
    }

    /// Freezes membership. Idempotent.
    pub fn seal(&self) {
        let sealed = self.slots();
        trace!("Time event registry sealed with {} time event(s)", sealed.len());
    }

    fn slots(&self) -> &[Arc<TimeEventSlot>] {
        if let Some(slots) = self.sealed.get() {
            return slots;
        }
        let mut pending = self.pending.lock();
        self.sealed
            .get_or_init(|| mem::take(&mut *pending).into_boxed_slice())
    }

    /// Returns `true` once membership is frozen.
    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.sealed.get().is_some()
    }

    /// The number of registered time events.
    pub fn len(&self) -> usize {
        match self.sealed.get() {
            Some(slots) => slots.len(),
            None => self.pending.lock().len(),
        }
    }

    /// Returns `true` if no time event has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The maximum number of time events.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The period of one tick.
    #[inline]
    pub const fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Converts `duration` into ticks of this registry, rounding up.
    pub fn ticks_for(&self, duration: Duration) -> u32 {
        ticks_for(duration, self.tick_period)
    }

    /// Advances every armed time event by one tick.
    ///
    /// Meant to be called from the periodic tick context. The first call seals
    /// the registry, which briefly takes the registration lock; later calls never
    /// block and none of them log. Every expired time event posts its event to its owner through
    /// [`ActiveHandle::post_from_isr`](crate::ActiveHandle::post_from_isr), which
    /// sets `*needs_reschedule` when a consumer became ready. Expiries whose
    /// owner no longer exists are counted as orphaned.
    ///
    /// # Errors
    ///
    /// A failed post does not stop the scan; the first failure (typically
    /// [`ActiveError::MailboxFull`]) is returned once every slot has been visited.
    pub fn tick_from_isr(&self, needs_reschedule: &mut bool) -> Result<TickReport> {
        let mut report = TickReport::default();
        let mut first_fault = None;
        for slot in self.slots() {
            if !slot.tick() {
                continue;
            }
            let Some(owner) = slot.owner().upgrade() else {
                report.orphaned += 1;
                continue;
            };
            match owner.post_from_isr(Arc::clone(slot.event()), needs_reschedule) {
                Ok(()) => report.expired += 1,
                Err(fault) => {
                    first_fault.get_or_insert(fault);
                }
            }
        }
        match first_fault {
            Some(fault) => Err(fault),
            None => Ok(report),
        }
    }
}

assert_impl_all!(TimeEventRegistry: Send, Sync);
