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
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use acton_ern::Ern;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{error, trace};

use crate::active::{ActiveObject, Idle};
use crate::common::config::FreeActConfig;
use crate::common::ActiveHandle;
use crate::event::{ActiveError, Result, Signal};
use crate::time::{Ticker, TimeEvent, TimeEventRegistry};
use crate::traits::Dispatch;

/// An initialized FreeAct runtime.
///
/// Obtained from [`FreeAct::launch`](crate::FreeAct::launch). The runtime
/// constructs active objects and time events, owns the time event registry, and
/// starts and stops the tick source. It is cheap to clone; all clones share the
/// same state.
///
/// Wiring follows a fixed order: construct every active object and time event,
/// start the active objects, then call [`start_ticker`](Self::start_ticker).
/// Once the tick source runs, the registry is sealed and no further time events
/// can be constructed.
#[derive(Debug, Clone)]
pub struct ActiveRuntime(pub(crate) Arc<RuntimeInner>);

#[derive(Debug)]
pub(crate) struct RuntimeInner {
    config: FreeActConfig,
    registry: Arc<TimeEventRegistry>,
    actives: DashMap<String, ActiveHandle>,
    unnamed: AtomicUsize,
    ticker: Mutex<Option<Ticker>>,
}

impl ActiveRuntime {
    pub(crate) fn new(config: FreeActConfig) -> Self {
        let registry = Arc::new(TimeEventRegistry::new(
            config.timing.tick_period(),
            config.limits.max_time_events,
        ));
        Self(Arc::new(RuntimeInner {
            config,
            registry,
            actives: DashMap::new(),
            unnamed: AtomicUsize::new(0),
            ticker: Mutex::new(None),
        }))
    }

    /// Constructs an active object named after the configured default name.
    ///
    /// Names are made unique by appending a sequence number
    /// (`active-1`, `active-2`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`ActiveError::InvalidState`] if the configured name is not a valid
    /// identifier.
    pub fn new_active<State>(&self) -> Result<ActiveObject<Idle, State>>
    where
        State: Dispatch + Default + Send + Debug + 'static,
    {
        let sequence = self.0.unnamed.fetch_add(1, Ordering::Relaxed) + 1;
        let name = format!("{}-{sequence}", self.0.config.defaults.active_name);
        self.new_active_with_name(name)
    }

    /// Constructs an active object with the given name.
    ///
    /// This is the first phase of the two-phase protocol: the dispatch capability
    /// (`State: Dispatch`) is bound and the state is zeroed with `State::default()`.
    /// The returned object has a handle but no mailbox or execution context yet;
    /// configure its `model` and time events, then call
    /// [`start`](ActiveObject::start).
    ///
    /// # Errors
    ///
    /// Returns [`ActiveError::InvalidState`] if the name is not a valid identifier
    /// or another active object of this runtime already uses it.
    pub fn new_active_with_name<State>(
        &self,
        name: impl Into<String>,
    ) -> Result<ActiveObject<Idle, State>>
    where
        State: Dispatch + Default + Send + Debug + 'static,
    {
        let name = name.into();
        let id = Ern::with_root(name.as_str()).map_err(|e| {
            ActiveError::InvalidState(format!("invalid active object name {name:?}: {e:?}"))
        })?;
        let handle = ActiveHandle::new(id, name.clone());
        match self.0.actives.entry(name.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                return Err(ActiveError::InvalidState(format!(
                    "an active object named {name:?} already exists"
                )));
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(handle.clone());
            }
        }
        trace!("Constructed active object: {}", handle.id());
        Ok(ActiveObject::new(self.clone(), handle))
    }

    /// Constructs a time event that posts `signal` to `owner` when it expires.
    ///
    /// The time event starts disarmed. The owner is referenced weakly.
    ///
    /// # Errors
    ///
    /// * [`ActiveError::InvalidState`] if the tick source has already started.
    /// * [`ActiveError::ResourceExhausted`] if the registry is full.
    pub fn new_time_event(&self, signal: Signal, owner: &ActiveHandle) -> Result<TimeEvent> {
        self.0.registry.register(signal, owner.downgrade())
    }

    /// Starts the tick source that drives every time event of this runtime.
    ///
    /// Seals the time event registry. A tick source that halted on a fault may be
    /// restarted once its fault has been collected; the fault is returned instead.
    ///
    /// # Errors
    ///
    /// * [`ActiveError::InvalidState`] if the tick source is already running.
    /// * The fault recorded by a previous tick source that halted.
    /// * [`ActiveError::ResourceExhausted`] if the tick thread cannot be created.
    pub fn start_ticker(&self) -> Result<()> {
        let mut slot = self.0.ticker.lock();
        if slot.as_ref().is_some_and(Ticker::is_running) {
            return Err(ActiveError::InvalidState(
                "tick source is already running".to_string(),
            ));
        }
        if let Some(halted) = slot.take() {
            halted.stop()?;
        }
        let ticker = Ticker::spawn(
            Arc::clone(&self.0.registry),
            self.tick_period(),
            self.0.config.behavior.yield_on_reschedule,
        )?;
        trace!(
            "Tick source started with period {:?} and {} time event(s)",
            self.tick_period(),
            self.0.registry.len()
        );
        *slot = Some(ticker);
        Ok(())
    }

    /// Stops the tick source, if one is running.
    ///
    /// Armed time events keep their remaining ticks and resume counting if the
    /// tick source is started again.
    ///
    /// # Errors
    ///
    /// Returns the fault that halted the tick source, if any.
    pub fn stop_ticker(&self) -> Result<()> {
        let ticker = self.0.ticker.lock().take();
        match ticker {
            Some(ticker) => ticker.stop().inspect_err(|fault| {
                error!("Tick source halted on a fault: {}", fault);
            }),
            None => Ok(()),
        }
    }

    /// Returns `true` while the tick source is running.
    pub fn is_ticking(&self) -> bool {
        self.0.ticker.lock().as_ref().is_some_and(Ticker::is_running)
    }

    /// The tick period: the granularity of every time event.
    #[inline]
    pub fn tick_period(&self) -> Duration {
        self.0.registry.tick_period()
    }

    /// The time event registry of this runtime.
    ///
    /// Exposed so a host that owns its own tick interrupt can drive
    /// [`TimeEventRegistry::tick_from_isr`] directly instead of using
    /// [`start_ticker`](Self::start_ticker).
    #[inline]
    pub fn registry(&self) -> &Arc<TimeEventRegistry> {
        &self.0.registry
    }

    /// The configuration this runtime was launched with.
    #[inline]
    pub fn config(&self) -> &FreeActConfig {
        &self.0.config
    }

    /// The number of active objects constructed by this runtime.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.0.actives.len()
    }

    /// Looks up an active object's handle by name.
    pub fn find(&self, name: &str) -> Option<ActiveHandle> {
        self.0.actives.get(name).map(|entry| entry.value().clone())
    }
}
