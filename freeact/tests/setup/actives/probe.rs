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
use std::sync::mpsc::Receiver;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use freeact::prelude::*;

use crate::setup::events::{signal_event, Numbered, PING, PONG};

/// One dispatch call as seen by a [`Probe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observed {
    pub signal: Signal,
    pub seq: Option<u32>,
    pub thread: Option<String>,
}

/// An active object that reports every dispatched event to the test.
///
/// * `gate`: when set, the `INIT` dispatch blocks until the gate is released,
///   holding the event loop so the test controls what sits in the mailbox.
/// * Answers `PING` by posting `PONG` to itself.
#[freeact_active]
pub struct Probe {
    pub seen: Option<UnboundedSender<Observed>>,
    pub gate: Option<Receiver<()>>,
}

impl Probe {
    /// Wires the probe to a fresh channel and returns its receiving end.
    pub fn observe(&mut self) -> UnboundedReceiver<Observed> {
        let (tx, rx) = unbounded_channel();
        self.seen = Some(tx);
        rx
    }
}

impl Dispatch for Probe {
    fn dispatch(&mut self, me: &ActiveContext, event: &EventRef) {
        if event.signal() == Signal::INIT {
            if let Some(gate) = self.gate.take() {
                let _ = gate.recv();
            }
        }
        if event.signal() == PING {
            me.post_self(signal_event(PONG)).unwrap();
        }
        if let Some(seen) = &self.seen {
            let _ = seen.send(Observed {
                signal: event.signal(),
                seq: event.downcast_ref::<Numbered>().map(|numbered| numbered.seq),
                thread: std::thread::current().name().map(str::to_string),
            });
        }
    }
}
