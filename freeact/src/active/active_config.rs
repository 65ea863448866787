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

use crate::common::config::CONFIG;
use crate::event::{ActiveError, Result};

/// Parameters for [`ActiveObject::start`](crate::ActiveObject::start).
///
/// ```rust,ignore
/// // priority 2, room for 16 events, 64 KiB of stack
/// let config = ActiveConfig::new(2, 16, 64 * 1024);
/// ```
///
/// `ActiveConfig::default()` takes all three values from the global
/// [`CONFIG`](crate::CONFIG).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveConfig {
    priority: u8,
    mailbox_capacity: usize,
    stack_size: usize,
}

impl ActiveConfig {
    /// Creates a start configuration.
    ///
    /// * `priority` - 1-based; 1 is the lowest application priority.
    /// * `mailbox_capacity` - the number of events the mailbox holds before
    ///   posts fail with [`ActiveError::MailboxFull`].
    /// * `stack_size` - stack size in bytes of the active object's thread.
    #[must_use]
    pub const fn new(priority: u8, mailbox_capacity: usize, stack_size: usize) -> Self {
        Self {
            priority,
            mailbox_capacity,
            stack_size,
        }
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the mailbox capacity.
    #[must_use]
    pub const fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity;
        self
    }

    /// Sets the stack size in bytes.
    #[must_use]
    pub const fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = stack_size;
        self
    }

    /// The priority (1 = lowest).
    #[inline]
    pub const fn priority(&self) -> u8 {
        self.priority
    }

    /// The mailbox capacity.
    #[inline]
    pub const fn mailbox_capacity(&self) -> usize {
        self.mailbox_capacity
    }

    /// The stack size in bytes.
    #[inline]
    pub const fn stack_size(&self) -> usize {
        self.stack_size
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.priority == 0 {
            return Err(ActiveError::InvalidState(
                "priority 0 is reserved; application priorities start at 1".to_string(),
            ));
        }
        if self.mailbox_capacity == 0 {
            return Err(ActiveError::ResourceExhausted(
                "a mailbox needs a capacity of at least one event".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ActiveConfig {
    fn default() -> Self {
        Self::new(
            CONFIG.defaults.priority,
            CONFIG.limits.default_mailbox_capacity,
            CONFIG.defaults.stack_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_priority_is_invalid_state() {
        let config = ActiveConfig::new(0, 4, 64 * 1024);
        assert!(matches!(config.validate(), Err(ActiveError::InvalidState(_))));
    }

    #[test]
    fn zero_capacity_cannot_be_allocated() {
        let config = ActiveConfig::new(1, 4, 64 * 1024).with_mailbox_capacity(0);
        assert!(matches!(
            config.validate(),
            Err(ActiveError::ResourceExhausted(_))
        ));
    }

    #[test]
    fn builder_methods_replace_single_fields() {
        let config = ActiveConfig::new(1, 4, 1024)
            .with_priority(3)
            .with_stack_size(2048);
        assert_eq!(config.priority(), 3);
        assert_eq!(config.mailbox_capacity(), 4);
        assert_eq!(config.stack_size(), 2048);
        assert!(config.validate().is_ok());
    }
}
