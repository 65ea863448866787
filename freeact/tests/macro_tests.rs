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
#![allow(dead_code, unused_doc_comments)]

use freeact::prelude::*;

use crate::setup::events::{signal_event, Numbered, Reading, CALIBRATED, NUMBERED, READING};
use crate::setup::{initialize_tracing, next_observed, runtime, small_config, Probe};

mod setup;

const GENERIC: Signal = Signal::user(20);

/// The macro also accepts generic events and keeps user-supplied derives.
#[freeact_event(signal = GENERIC)]
#[derive(Clone)]
struct Tagged<T: Clone + std::fmt::Debug + Send + Sync + 'static> {
    tag: T,
}

#[freeact_active(no_default)]
struct Preset {
    threshold: i32,
}

impl Default for Preset {
    fn default() -> Self {
        Self { threshold: 10 }
    }
}

impl Dispatch for Preset {
    fn dispatch(&mut self, _me: &ActiveContext, _event: &EventRef) {}
}

#[test]
fn test_fixed_signal_event() {
    let event: EventRef = Numbered::event(3);
    assert_eq!(event.signal(), NUMBERED);
    assert!(event.is::<Numbered>());
    assert_eq!(event.downcast_ref::<Numbered>().map(|n| n.seq), Some(3));
    assert!(event.downcast_ref::<Reading>().is_none());
}

#[test]
fn test_per_instance_signal_event() {
    let raw = Reading {
        signal: READING,
        value: -4,
    };
    let calibrated = Reading {
        signal: CALIBRATED,
        ..raw.clone()
    };
    assert_eq!(raw.signal(), READING);
    assert_eq!(calibrated.signal(), CALIBRATED);
    assert_eq!(calibrated.value, -4);
    assert!(format!("{calibrated:?}").contains("value: -4"));
}

#[test]
fn test_generic_event() {
    let event: EventRef = Arc::new(Tagged { tag: "left" });
    assert_eq!(event.signal(), GENERIC);
    assert_eq!(
        event.downcast_ref::<Tagged<&'static str>>().map(|t| t.tag),
        Some("left")
    );
}

#[test]
fn test_signal_event_and_reserved_signals() {
    let init = SignalEvent::new(Signal::INIT);
    assert!(init.signal().is_reserved());
    assert!(!signal_event(READING).signal().is_reserved());
    assert_eq!(Signal::INIT.to_string(), "INIT");
}

#[test]
fn test_active_macro_respects_no_default() {
    let runtime = runtime();
    let preset = runtime.new_active_with_name::<Preset>("preset").unwrap();
    assert_eq!(preset.model.threshold, 10);
    assert!(format!("{preset:?}").contains("threshold: 10"));
}

/// Payload events reach the dispatch handler intact.
#[tokio::test(flavor = "multi_thread")]
async fn test_payload_survives_the_mailbox() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = runtime();
    let mut probe = runtime.new_active_with_name::<Probe>("payload")?;
    let mut seen = probe.model.observe();
    let handle = probe.start(&small_config(1, 2))?;

    handle.post(Numbered::event(41))?;
    assert_eq!(next_observed(&mut seen).await?.signal, Signal::INIT);
    let observed = next_observed(&mut seen).await?;
    assert_eq!(observed.signal, NUMBERED);
    assert_eq!(observed.seq, Some(41));
    Ok(())
}
