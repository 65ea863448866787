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
#![allow(dead_code)]

use freeact::prelude::*;

pub const PING: Signal = Signal::user(0);
pub const PONG: Signal = Signal::user(1);
pub const TIMEOUT: Signal = Signal::user(2);
pub const HEARTBEAT: Signal = Signal::user(3);
pub const NUMBERED: Signal = Signal::user(4);
pub const READING: Signal = Signal::user(5);
pub const CALIBRATED: Signal = Signal::user(6);

/// An event carrying a sequence number, used to check ordering.
#[freeact_event(signal = NUMBERED)]
pub struct Numbered {
    pub seq: u32,
}

impl Numbered {
    pub fn event(seq: u32) -> EventRef {
        Arc::new(Self { seq })
    }
}

/// An event whose signal is chosen per instance.
#[freeact_event]
pub struct Reading {
    pub signal: Signal,
    pub value: i32,
}

pub fn signal_event(signal: Signal) -> EventRef {
    SignalEvent::new(signal).into_ref()
}
