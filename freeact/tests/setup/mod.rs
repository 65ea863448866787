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

use std::sync::Once;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use freeact::prelude::*;

pub mod actives;
pub mod events;

pub use actives::probe::{Observed, Probe};

// Ensures tracing initialization happens only once across all tests.
static INIT: Once = Once::new();

/// Installs the global tracing subscriber for tests, writing to `logs/freeact_tests.txt`.
pub fn initialize_tracing() {
    INIT.call_once(|| {
        std::fs::create_dir_all("logs").expect("could not create logs dir");

        let file_appender = RollingFileAppender::new(Rotation::NEVER, "logs", "freeact_tests.txt");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        // Leak the guard so the non-blocking writer lives until process exit
        Box::leak(Box::new(guard));

        let filter = EnvFilter::new("info")
            .add_directive("freeact=trace".parse().unwrap())
            .add_directive("freeact::active::active_object::started=trace".parse().unwrap())
            .add_directive("freeact::time::ticker=trace".parse().unwrap());

        let subscriber = FmtSubscriber::builder()
            .with_span_events(FmtSpan::NONE)
            .with_max_level(Level::TRACE)
            .compact()
            .with_line_number(true)
            .without_time()
            .with_target(true)
            .with_env_filter(filter)
            .with_writer(non_blocking)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .expect("setting default subscriber failed");
    });
}

/// A runtime built from the default configuration, independent of any config file.
pub fn runtime() -> ActiveRuntime {
    FreeAct::launch_with_config(FreeActConfig::default())
}

/// Start parameters small enough for tests.
pub fn small_config(priority: u8, capacity: usize) -> ActiveConfig {
    ActiveConfig::new(priority, capacity, 256 * 1024)
}

/// Waits up to two seconds for the next dispatched event.
pub async fn next_observed(rx: &mut UnboundedReceiver<Observed>) -> anyhow::Result<Observed> {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await?
        .ok_or_else(|| anyhow::anyhow!("probe channel closed"))
}

/// Asserts that nothing is dispatched within `window`.
pub async fn assert_quiet(rx: &mut UnboundedReceiver<Observed>, window: Duration) {
    if let Ok(Some(observed)) = tokio::time::timeout(window, rx.recv()).await {
        panic!("unexpected dispatch: {observed:?}");
    }
}
