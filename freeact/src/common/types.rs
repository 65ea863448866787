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

//! Type aliases shared across the crate.

use std::sync::Arc;

use tokio::sync::mpsc::{Receiver, Sender};

use crate::traits::Event;

/// A shared, immutable reference to an event.
///
/// Posting an `EventRef` hands one reference to the receiving mailbox. Constant
/// events are created once and cloned; dynamic events are dropped after the
/// last holder (usually the dispatch call) is done with them.
pub type EventRef = Arc<dyn Event>;

/// Crate-internal: the producer side of a mailbox.
pub(crate) type MailboxSender = Sender<EventRef>;

/// Crate-internal: the single consumer side of a mailbox.
pub(crate) type MailboxReceiver = Receiver<EventRef>;
