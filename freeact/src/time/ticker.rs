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
use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, instrument, trace, warn};

use crate::event::{ActiveError, Result};
use crate::time::TimeEventRegistry;

/// The periodic tick source that drives a [`TimeEventRegistry`].
///
/// A `Ticker` owns a dedicated `freeact-tick` thread running a current-thread
/// tokio runtime. Every `period` it calls
/// [`TimeEventRegistry::tick_from_isr`]; missed ticks are delivered in a burst so
/// time events never lose ticks to scheduling jitter. When a tick readied a
/// consumer and `yield_on_reschedule` is set, the tick thread yields its time
/// slice before waiting for the next tick.
///
/// A failed expiry post halts the ticker: the fault is logged and reported by
/// [`stop`](Self::stop). Dropping a `Ticker` cancels it without waiting.
pub struct Ticker {
    cancel: CancellationToken,
    period: Duration,
    thread: Option<JoinHandle<Result<()>>>,
}

impl Ticker {
    /// Seals `registry` and starts ticking it every `period`.
    ///
    /// # Errors
    ///
    /// * [`ActiveError::InvalidState`] for a zero `period`.
    /// * [`ActiveError::ResourceExhausted`] if the tick runtime or the tick
    ///   thread cannot be created.
    #[instrument(skip(registry), fields(time_events = registry.len()))]
    pub fn spawn(
        registry: Arc<TimeEventRegistry>,
        period: Duration,
        yield_on_reschedule: bool,
    ) -> Result<Self> {
        if period.is_zero() {
            return Err(ActiveError::InvalidState(
                "tick period must be nonzero".to_string(),
            ));
        }
        registry.seal();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|e| {
                ActiveError::ResourceExhausted(format!("cannot build the tick runtime: {e}"))
            })?;

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let thread = thread::Builder::new()
            .name("freeact-tick".to_string())
            .spawn(move || {
                runtime.block_on(tick_loop(registry, period, yield_on_reschedule, token))
            })
            .map_err(|e| {
                error!("Failed to spawn the tick thread: {}", e);
                ActiveError::ResourceExhausted(format!("cannot create the tick thread: {e}"))
            })?;

        Ok(Self {
            cancel,
            period,
            thread: Some(thread),
        })
    }

    /// The tick period.
    #[inline]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Returns `true` until the ticker has been stopped or has halted on a fault.
    pub fn is_running(&self) -> bool {
        self.thread
            .as_ref()
            .is_some_and(|thread| !thread.is_finished())
    }

    /// Stops ticking and waits for the tick thread to finish.
    ///
    /// # Errors
    ///
    /// Returns the fault that halted the ticker, if it halted on its own, or
    /// [`ActiveError::InvalidState`] if the tick thread panicked.
    pub fn stop(mut self) -> Result<()> {
        self.cancel.cancel();
        match self.thread.take() {
            Some(thread) => thread.join().unwrap_or_else(|_| {
                Err(ActiveError::InvalidState(
                    "the tick thread panicked".to_string(),
                ))
            }),
            None => Ok(()),
        }
    }
}

async fn tick_loop(
    registry: Arc<TimeEventRegistry>,
    period: Duration,
    yield_on_reschedule: bool,
    token: CancellationToken,
) -> Result<()> {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
    let mut cancel = Box::pin(token.cancelled());
    trace!("Tick loop started with period {:?}", period);

    loop {
        tokio::select! {
            () = &mut cancel => {
                trace!("Tick loop cancelled");
                return Ok(());
            }
            _ = interval.tick() => {
                let mut needs_reschedule = false;
                match registry.tick_from_isr(&mut needs_reschedule) {
                    Ok(report) if report.orphaned > 0 => {
                        warn!(
                            "{} time event(s) expired after their owner was gone",
                            report.orphaned
                        );
                    }
                    Ok(_) => {}
                    Err(fault) => {
                        error!("Tick halted: {}", fault);
                        return Err(fault);
                    }
                }
                if needs_reschedule && yield_on_reschedule {
                    thread::yield_now();
                }
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl Debug for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ticker")
            .field("period", &self.period)
            .field("running", &self.is_running())
            .finish()
    }
}
