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
use std::any::Any;
use std::fmt::Debug;

use crate::event::Signal;

/// Provides type-erased access to an event's concrete type.
///
/// Implemented for every `'static` type, so event types never implement it by
/// hand. Use [`dyn Event::downcast_ref`](trait.Event.html#method.downcast_ref)
/// rather than calling `as_any` directly: on an `Arc<dyn Event>` the blanket
/// implementation would apply to the `Arc` itself.
#[doc(hidden)]
pub trait AsAnyEvent: Any {
    /// Returns `self` as [`Any`].
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAnyEvent for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An immutable tagged message exchanged between active objects.
///
/// Every event reports a [`Signal`]; richer event types add payload fields and
/// are recovered on the receiving side with [`downcast_ref`](#method.downcast_ref).
/// Events are shared behind an [`EventRef`](crate::EventRef) (`Arc<dyn Event>`) and
/// are never mutated after they have been posted.
///
/// The [`freeact_event`](crate::prelude::freeact_event) attribute implements this
/// trait for plain structs.
///
/// ```rust,ignore
/// #[freeact_event(signal = BUTTON_PRESSED)]
/// struct ButtonPressed {
///     pin: u8,
/// }
/// ```
pub trait Event: AsAnyEvent + Debug + Send + Sync {
    /// The signal that tags this event.
    fn signal(&self) -> Signal;
}

impl dyn Event {
    /// Returns `true` if the event's concrete type is `T`.
    #[inline]
    pub fn is<T: Event>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Returns the event as its concrete type `T`, or `None` if it is some other type.
    #[inline]
    pub fn downcast_ref<T: Event>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}
