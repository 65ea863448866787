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

#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # FreeAct
//!
//! An active-object runtime. Every active object owns a private bounded mailbox
//! and a dedicated execution context (its own thread), and reacts to immutable
//! events one at a time through a synchronous dispatch handler. Because exactly
//! one consumer ever drains a mailbox, the state behind the dispatch handler
//! needs no locks.
//!
//! ## Key Concepts
//!
//! - **Events (`Event`, `EventRef`)**: Immutable tagged messages. The reserved
//!   `Signal::INIT` is dispatched once before an active object's loop starts;
//!   application signals begin at `Signal::USER`.
//! - **Active objects (`ActiveObject`)**: Type-state wrappers (`Idle`, `Started`)
//!   around user state implementing [`Dispatch`]. Construction binds the dispatch
//!   capability; `start` allocates the mailbox and spawns the execution context.
//! - **Handles (`ActiveHandle`)**: Cloneable, thread-safe producers. `post` is for
//!   normal contexts, `post_from_isr` for interrupt-like contexts that must never
//!   block or log.
//! - **Time events (`TimeEvent`)**: One-shot or periodic event sources registered
//!   in a bounded, tick-scanned registry and driven by a `Ticker`.
//! - **Runtime (`ActiveRuntime`)**: Created by [`FreeAct::launch`]; owns
//!   configuration, the time event registry and the tick source.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use freeact::prelude::*;
//!
//! const TIMEOUT: Signal = Signal::user(0);
//!
//! #[freeact_active]
//! struct Blinky {
//!     led_on: bool,
//!     timeout: Option<TimeEvent>,
//! }
//!
//! impl Dispatch for Blinky {
//!     fn dispatch(&mut self, _me: &ActiveContext, event: &EventRef) {
//!         match event.signal() {
//!             Signal::INIT | TIMEOUT => {
//!                 self.led_on = !self.led_on;
//!                 if let Some(timeout) = &self.timeout {
//!                     timeout.arm(Duration::from_millis(500), Duration::ZERO);
//!                 }
//!             }
//!             _ => {}
//!         }
//!     }
//! }
//!
//! fn main() -> freeact::Result<()> {
//!     let runtime = FreeAct::launch();
//!     let mut blinky = runtime.new_active_with_name::<Blinky>("blinky")?;
//!     blinky.model.timeout = Some(blinky.new_time_event(TIMEOUT)?);
//!     blinky.start(&ActiveConfig::new(1, 10, 64 * 1024))?;
//!     runtime.start_ticker()
//! }
//! ```

extern crate self as freeact;

/// Runtime entry point, configuration, handles and shared type aliases.
pub(crate) mod common;

/// Active objects, their start configuration and the event loop.
pub(crate) mod active;

/// Signals, the basic event type, and the crate error type.
pub(crate) mod event;

/// Time events, their registry, and the tick source that drives them.
pub(crate) mod time;

/// Core traits: `Event` and `Dispatch`.
pub(crate) mod traits;

pub use active::{ActiveConfig, ActiveContext, ActiveObject, Idle, Started};
pub use common::config::{FreeActConfig, CONFIG};
pub use common::{ActiveHandle, ActiveRuntime, EventRef, FreeAct, WeakActiveHandle};
pub use event::{ActiveError, Result, Signal, SignalEvent, INIT_EVENT};
pub use time::{TickReport, Ticker, TimeEvent, TimeEventId, TimeEventRegistry};
pub use traits::{Dispatch, Event};

/// A prelude module for conveniently importing the most commonly used items.
///
/// # Re-exports
///
/// ## Macros (from `freeact-macro`)
/// *   [`freeact_macro::freeact_event`]: Attribute macro turning a struct into an [`Event`].
/// *   [`freeact_macro::freeact_active`]: Attribute macro preparing a struct as active-object state.
///
/// ## External Crates
/// *   [`acton_ern::Ern`]: The identifier type naming every active object.
/// *   [`std::time::Duration`] and [`std::sync::Arc`], used to arm time events and build events.
///
/// ## Core Types
/// *   [`FreeAct`], [`ActiveRuntime`], [`FreeActConfig`]
/// *   [`ActiveObject`], [`Idle`], [`Started`], [`ActiveConfig`], [`ActiveContext`]
/// *   [`ActiveHandle`], [`WeakActiveHandle`]
/// *   [`Event`], [`EventRef`], [`Signal`], [`SignalEvent`], [`Dispatch`]
/// *   [`TimeEvent`], [`TimeEventId`]
/// *   [`ActiveError`]
pub mod prelude {
    pub use freeact_macro::{freeact_active, freeact_event};

    pub use acton_ern::Ern;
    pub use std::sync::Arc;
    pub use std::time::Duration;

    pub use crate::active::{ActiveConfig, ActiveContext, ActiveObject, Idle, Started};
    pub use crate::common::config::FreeActConfig;
    pub use crate::common::{ActiveHandle, ActiveRuntime, EventRef, FreeAct, WeakActiveHandle};
    pub use crate::event::{ActiveError, Signal, SignalEvent};
    pub use crate::time::{TimeEvent, TimeEventId};
    pub use crate::traits::{Dispatch, Event};
}
