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

//! Blinky with a button.
//!
//! A single active object blinks a simulated LED with a one-shot time event
//! (200 ms on, 800 ms off) and mirrors a simulated button on a second LED.
//! The button is "pressed" by a thread standing in for an interrupt handler,
//! which posts through `post_from_isr` and yields when asked to.
//!
//! Run with `cargo run --example blinky_button`.

use std::thread;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use freeact::prelude::*;

const TIMEOUT: Signal = Signal::user(0);
const BUTTON_PRESSED: Signal = Signal::user(1);
const BUTTON_RELEASED: Signal = Signal::user(2);

const ON_TIME: Duration = Duration::from_millis(200);
const OFF_TIME: Duration = Duration::from_millis(800);

#[freeact_active]
struct BlinkyButton {
    timeout: Option<TimeEvent>,
    led_on: bool,
    blinks: usize,
}

impl BlinkyButton {
    fn schedule(&self, after: Duration) {
        if let Some(timeout) = &self.timeout {
            timeout.arm(after, Duration::ZERO);
        }
    }
}

impl Dispatch for BlinkyButton {
    fn dispatch(&mut self, me: &ActiveContext, event: &EventRef) {
        match event.signal() {
            Signal::INIT => {
                info!("{}: LED0 on", me.name());
                self.led_on = true;
                self.schedule(ON_TIME);
            }
            TIMEOUT if self.led_on => {
                info!("{}: LED0 off", me.name());
                self.led_on = false;
                self.blinks += 1;
                self.schedule(OFF_TIME);
            }
            TIMEOUT => {
                info!("{}: LED0 on", me.name());
                self.led_on = true;
                self.schedule(ON_TIME);
            }
            BUTTON_PRESSED => info!("{}: LED1 on (blinks so far: {})", me.name(), self.blinks),
            BUTTON_RELEASED => info!("{}: LED1 off", me.name()),
            _ => {}
        }
    }
}

fn initialize_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let filter = EnvFilter::new("info")
        .add_directive("blinky_button=info".parse().unwrap())
        .add_directive("freeact::time=warn".parse().unwrap());
    let subscriber = FmtSubscriber::builder()
        .compact()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(writer)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
    guard
}

fn main() -> anyhow::Result<()> {
    let _guard = initialize_tracing();

    let runtime = FreeAct::launch();
    let mut blinky = runtime.new_active_with_name::<BlinkyButton>("blinky")?;
    blinky.model.timeout = Some(blinky.new_time_event(TIMEOUT)?);
    let handle = blinky.start(&ActiveConfig::default().with_mailbox_capacity(10))?;

    runtime.start_ticker()?;

    let pressed = SignalEvent::new(BUTTON_PRESSED).into_ref();
    let released = SignalEvent::new(BUTTON_RELEASED).into_ref();
    let button = thread::Builder::new()
        .name("button-isr".to_string())
        .spawn(move || {
            for _ in 0..3 {
                thread::sleep(Duration::from_millis(700));
                for event in [&pressed, &released] {
                    let mut needs_reschedule = false;
                    if let Err(e) = handle.post_from_isr(event.clone(), &mut needs_reschedule) {
                        error!("button event lost: {}", e);
                    }
                    if needs_reschedule {
                        thread::yield_now();
                    }
                    thread::sleep(Duration::from_millis(150));
                }
            }
        })?;

    button
        .join()
        .map_err(|_| anyhow::anyhow!("button thread panicked"))?;
    thread::sleep(Duration::from_secs(1));
    runtime.stop_ticker()?;
    info!("done");
    Ok(())
}
