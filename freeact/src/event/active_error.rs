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
/// Errors raised by the runtime.
///
/// None of these are meant to be recovered from in steady state: they report
/// contract violations that should be caught while an application is wired up
/// and tested.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActiveError {
    /// An operation was attempted in the wrong lifecycle phase, e.g. posting to an
    /// active object that has not been started, or registering a time event after
    /// the tick source has started.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// A mailbox, execution context or registry slot could not be allocated.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),
    /// The target mailbox was saturated; the event was not enqueued.
    #[error("mailbox of {id} is full (capacity {capacity})")]
    MailboxFull {
        /// Identifier of the active object whose mailbox is full.
        id: String,
        /// Capacity of that mailbox.
        capacity: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ActiveError>;
