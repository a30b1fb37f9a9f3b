// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The normalized event published to a control's owner after an activation.
//!
//! The event carries the post-transition checked value, the opaque raw
//! activation event, and two pass-through control flags. The core never
//! interprets the flags; it records them so the embedder can honor
//! propagation and default-action decisions after dispatch, in the same way
//! a responder-chain dispatcher reads a `default_prevented` flag off the
//! event it threaded through its handlers.

/// The `target` portion of a [`ToggleEvent`]: the value the control holds
/// after the transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EventTarget {
    /// The checked value after the transition.
    pub checked: bool,
}

/// A normalized change event handed to the owner callback.
///
/// `E` is the embedder's raw activation event type; the core treats it as an
/// opaque payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleEvent<E> {
    target: EventTarget,
    raw: E,
    propagation_stopped: bool,
    default_prevented: bool,
}

impl<E> ToggleEvent<E> {
    pub(crate) fn new(next_checked: bool, raw: E) -> Self {
        Self {
            target: EventTarget {
                checked: next_checked,
            },
            raw,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// Returns the event target.
    #[must_use]
    pub fn target(&self) -> EventTarget {
        self.target
    }

    /// Returns the checked value after the transition.
    #[must_use]
    pub fn next_checked(&self) -> bool {
        self.target.checked
    }

    /// Returns a reference to the raw activation event.
    #[must_use]
    pub fn raw(&self) -> &E {
        &self.raw
    }

    /// Consumes the event, returning the raw activation event.
    #[must_use]
    pub fn into_raw(self) -> E {
        self.raw
    }

    /// Requests that the embedder stop propagating the raw event.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Returns `true` if a handler requested propagation to stop.
    #[must_use]
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Requests that the embedder suppress the raw event's default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Returns `true` if a handler requested default-action suppression.
    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_start_clear_and_latch_when_set() {
        let mut event = ToggleEvent::new(true, ());
        assert!(event.next_checked());
        assert!(!event.propagation_stopped());
        assert!(!event.default_prevented());

        event.stop_propagation();
        event.prevent_default();
        assert!(event.propagation_stopped());
        assert!(event.default_prevented());
    }

    #[test]
    fn raw_event_passes_through_untouched() {
        let event = ToggleEvent::new(false, "pointer-up");
        assert_eq!(event.target(), EventTarget { checked: false });
        assert_eq!(*event.raw(), "pointer-up");
        assert_eq!(event.into_raw(), "pointer-up");
    }
}
