// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared plumbing for the toggle demos: a console-backed native node and a
//! one-line renderer for presentation snapshots.

use understory_toggle::{Focusable, PresentationSnapshot};

/// A stand-in native node that records focus calls.
#[derive(Debug, Default)]
pub struct ConsoleNode {
    /// How many times focus landed on this node.
    pub focus_count: u32,
}

impl Focusable for ConsoleNode {
    fn focus(&mut self) {
        self.focus_count += 1;
    }
}

/// Formats a control's snapshot the way a renderer would bind it.
pub fn describe(label: &str, snapshot: &PresentationSnapshot) -> String {
    format!(
        "[{label}] state={} checked={} disabled={} aria-checked={}",
        snapshot.state,
        snapshot.checked,
        snapshot.disabled,
        snapshot.aria_checked()
    )
}
