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
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use static_assertions::assert_impl_all;
use tracing::debug;

use crate::common::{ActiveHandle, EventRef, WeakActiveHandle};
use crate::event::{Signal, SignalEvent};
use crate::time::registry::ticks_for;
use crate::time::TimeEventId;

const REMAINING_MASK: u64 = 0xFFFF_FFFF;

#[inline]
const fn pack(remaining: u32, interval: u32) -> u64 {
    ((interval as u64) << 32) | remaining as u64
}

#[inline]
const fn remaining_of(state: u64) -> u32 {
    (state & REMAINING_MASK) as u32
}

#[inline]
const fn interval_of(state: u64) -> u32 {
    (state >> 32) as u32
}

/// Crate-internal: the shared state behind a [`TimeEvent`].
///
/// Remaining ticks and the reload interval live in one atomic word so that
/// arming, disarming and the tick scan never observe a torn pair.
pub(crate) struct TimeEventSlot {
    id: TimeEventId,
    event: EventRef,
    signal: Signal,
    owner: WeakActiveHandle,
    state: AtomicU64,
}

impl TimeEventSlot {
    pub(crate) fn new(id: TimeEventId, signal: Signal, owner: WeakActiveHandle) -> Self {
        Self {
            id,
            event: SignalEvent::new(signal).into_ref(),
            signal,
            owner,
            state: AtomicU64::new(0),
        }
    }

    #[inline]
    pub(crate) const fn id(&self) -> TimeEventId {
        self.id
    }

    #[inline]
    pub(crate) const fn event(&self) -> &EventRef {
        &self.event
    }

    #[inline]
    pub(crate) const fn owner(&self) -> &WeakActiveHandle {
        &self.owner
    }

    /// Replaces remaining time and interval in one store.
    pub(crate) fn arm(&self, remaining: u32, interval: u32) {
        self.state
            .store(pack(remaining.max(1), interval), Ordering::Release);
    }

    /// Clears remaining time and interval. Returns whether the slot was armed.
    pub(crate) fn disarm(&self) -> bool {
        remaining_of(self.state.swap(0, Ordering::AcqRel)) != 0
    }

    /// Counts one tick down. Returns `true` if the slot expired on this tick.
    ///
    /// On expiry the slot reloads with its interval; an interval of zero leaves
    /// it disarmed.
    pub(crate) fn tick(&self) -> bool {
        self.state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |state| {
                match remaining_of(state) {
                    0 => None,
                    1 => {
                        let interval = interval_of(state);
                        Some(pack(interval, interval))
                    }
                    _ => Some(state - 1),
                }
            })
            .is_ok_and(|previous| remaining_of(previous) == 1)
    }

    #[inline]
    pub(crate) fn remaining(&self) -> u32 {
        remaining_of(self.state.load(Ordering::Acquire))
    }

    #[inline]
    pub(crate) fn interval(&self) -> u32 {
        let state = self.state.load(Ordering::Acquire);
        if remaining_of(state) == 0 {
            0
        } else {
            interval_of(state)
        }
    }
}

impl Debug for TimeEventSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeEventSlot")
            .field("id", &self.id)
            .field("signal", &self.signal)
            .field("remaining", &self.remaining())
            .field("interval", &self.interval())
            .finish()
    }
}

/// A one-shot or periodic event source bound to a signal and an owning active object.
///
/// Constructed through [`ActiveRuntime::new_time_event`](crate::ActiveRuntime::new_time_event)
/// before the tick source starts. A time event starts disarmed. Once armed, every
/// tick counts its remaining time down; when it reaches zero the time event posts
/// its event (a [`SignalEvent`] carrying [`signal`](Self::signal)) into the
/// owner's mailbox and reloads with its interval. An interval of zero makes it
/// one-shot.
///
/// Durations are rounded up to whole ticks. A timeout always lasts at least one
/// tick, so arming with a zero timeout expires on the next tick.
///
/// `TimeEvent` is a cheap handle; clones refer to the same registry slot, and
/// can be armed and disarmed from any thread, including the owner's own
/// dispatch handler.
#[derive(Clone)]
pub struct TimeEvent {
    slot: Arc<TimeEventSlot>,
    tick_period: Duration,
}

impl TimeEvent {
    pub(crate) fn new(slot: Arc<TimeEventSlot>, tick_period: Duration) -> Self {
        Self { slot, tick_period }
    }

    /// The time event's index in its registry.
    #[inline]
    pub fn id(&self) -> TimeEventId {
        self.slot.id()
    }

    /// The signal carried by every event this time event posts.
    #[inline]
    pub fn signal(&self) -> Signal {
        self.slot.signal
    }

    /// The owning active object, if it still exists.
    pub fn owner(&self) -> Option<ActiveHandle> {
        self.slot.owner().upgrade()
    }

    /// Arms the time event from a normal context.
    ///
    /// Expires `timeout` from now and then every `interval`, or only once when
    /// `interval` is zero. Re-arming an armed time event replaces both values.
    pub fn arm(&self, timeout: Duration, interval: Duration) {
        let (remaining, reload) = self.to_ticks(timeout, interval);
        self.slot.arm(remaining, reload);
        debug!(
            time_event = %self.id(),
            signal = %self.signal(),
            remaining,
            interval = reload,
            "time event armed"
        );
    }

    /// Arms the time event from an interrupt-like context. Never blocks or logs.
    pub fn arm_from_isr(&self, timeout: Duration, interval: Duration) {
        let (remaining, reload) = self.to_ticks(timeout, interval);
        self.slot.arm(remaining, reload);
    }

    /// Arms the time event with tick counts instead of durations.
    ///
    /// A `timeout` of zero is treated as one tick.
    pub fn arm_ticks(&self, timeout: u32, interval: u32) {
        self.slot.arm(timeout, interval);
    }

    /// Disarms the time event from a normal context.
    ///
    /// Returns `true` if it was armed. Disarming a disarmed time event is a no-op.
    pub fn disarm(&self) -> bool {
        let was_armed = self.slot.disarm();
        debug!(time_event = %self.id(), was_armed, "time event disarmed");
        was_armed
    }

    /// Disarms the time event from an interrupt-like context. Never blocks or logs.
    pub fn disarm_from_isr(&self) -> bool {
        self.slot.disarm()
    }

    /// Returns `true` while the time event is counting down.
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.slot.remaining() != 0
    }

    /// Ticks left until the next expiry; zero when disarmed.
    #[inline]
    pub fn remaining_ticks(&self) -> u32 {
        self.slot.remaining()
    }

    /// The reload interval in ticks; zero for a one-shot or disarmed time event.
    #[inline]
    pub fn interval_ticks(&self) -> u32 {
        self.slot.interval()
    }

    fn to_ticks(&self, timeout: Duration, interval: Duration) -> (u32, u32) {
        let remaining = ticks_for(timeout, self.tick_period).max(1);
        let reload = if interval.is_zero() {
            0
        } else {
            ticks_for(interval, self.tick_period).max(1)
        };
        (remaining, reload)
    }
}

impl Debug for TimeEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeEvent")
            .field("id", &self.id())
            .field("signal", &self.signal())
            .field("remaining_ticks", &self.remaining_ticks())
            .field("interval_ticks", &self.interval_ticks())
            .finish()
    }
}

assert_impl_all!(TimeEvent: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;

    fn slot() -> TimeEventSlot {
        TimeEventSlot::new(TimeEventId::new(0), Signal::user(0), WeakActiveHandle::default())
    }

    fn time_event(period_ms: u64) -> TimeEvent {
        TimeEvent::new(Arc::new(slot()), Duration::from_millis(period_ms))
    }

    #[test]
    fn one_shot_expires_once() {
        let slot = slot();
        slot.arm(3, 0);
        assert!(!slot.tick());
        assert!(!slot.tick());
        assert!(slot.tick());
        assert_eq!(slot.remaining(), 0);
        assert!((0..10).all(|_| !slot.tick()));
    }

    #[test]
    fn periodic_reloads_with_interval() {
        let slot = slot();
        slot.arm(2, 3);
        let expiries: Vec<usize> = (1..=11).filter(|_| slot.tick()).collect();
        assert_eq!(expiries, vec![2, 5, 8, 11]);
        assert_eq!(slot.interval(), 3);
    }

    #[test]
    fn disarm_reports_previous_state() {
        let slot = slot();
        assert!(!slot.disarm());
        slot.arm(5, 5);
        assert!(slot.disarm());
        assert!(!slot.disarm());
        assert_eq!(slot.interval(), 0);
        assert!(!slot.tick());
    }

    #[test]
    fn rearm_replaces_remaining_and_interval() {
        let slot = slot();
        slot.arm(10, 10);
        slot.tick();
        slot.arm(1, 0);
        assert!(slot.tick());
        assert_eq!(slot.remaining(), 0);
    }

    #[test]
    fn durations_round_up_to_whole_ticks() {
        let te = time_event(10);
        te.arm(Duration::from_millis(200), Duration::ZERO);
        assert_eq!(te.remaining_ticks(), 20);
        assert_eq!(te.interval_ticks(), 0);

        te.arm(Duration::from_millis(201), Duration::from_millis(1));
        assert_eq!(te.remaining_ticks(), 21);
        assert_eq!(te.interval_ticks(), 1);
    }

    #[test]
    fn zero_timeout_lasts_one_tick() {
        let te = time_event(10);
        te.arm_from_isr(Duration::ZERO, Duration::ZERO);
        assert!(te.is_armed());
        assert_eq!(te.remaining_ticks(), 1);

        te.arm_ticks(0, 4);
        assert_eq!(te.remaining_ticks(), 1);
        assert_eq!(te.interval_ticks(), 4);
        assert!(te.disarm_from_isr());
        assert!(!te.is_armed());
    }

    #[test]
    fn orphaned_time_event_has_no_owner() {
        let te = time_event(10);
        assert!(te.owner().is_none());
        assert_eq!(te.signal(), Signal::user(0));
    }
}
