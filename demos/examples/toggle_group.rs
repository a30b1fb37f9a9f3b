// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouped toggle basics.
//!
//! Drive three grouped toggle controls through owner-driven selection
//! changes, a user activation, and a rejected request against a
//! max-selected limit.
//!
//! Run:
//! - `cargo run -p understory_toggle_demos --example toggle_group`

use understory_toggle::{Appearance, NativeHandle, ToggleControl, ToggleProps, Tone};
use understory_toggle_demos::{ConsoleNode, describe};
use understory_toggle_group::{ToggleGroup, ToggleRequest};

fn main() {
    // A group that allows at most two selected members, tinted primary.
    let mut group: ToggleGroup<&str, Appearance> = ToggleGroup::with_appearance(Appearance {
        tone: Tone::Primary,
        ..Appearance::default()
    });
    group.set_limit(Some(2));

    let mut controls: Vec<(&str, ToggleControl<&str>)> = ["a", "b", "c"]
        .into_iter()
        .map(|value| {
            let mut control = ToggleControl::new(ToggleProps::new().with_value(value));
            control.bind_group(&mut group);
            (value, control)
        })
        .collect();

    // The owner seeds the selection; subscribers re-derive membership.
    let changes = group.set_selected(["a"]);
    for change in &changes {
        for (_, control) in &mut controls {
            control.observe_membership(change);
        }
    }
    print_all(&controls, &group);

    // Each control defers its default appearance tokens to the group.
    let resolved = Appearance::default().resolve_over(group.appearance());
    println!("resolved member tone: {:?}", resolved.tone);

    // The renderer mounts a native node for "b"; the owner focuses it
    // through the capability handle before activating.
    let mut handle: NativeHandle<ConsoleNode> = NativeHandle::new();
    handle.attach(ConsoleNode::default());
    handle.focus();
    println!(
        "b focused {} time(s)",
        handle.node().map_or(0, |n| n.focus_count)
    );

    // The user activates "b": the group accepts and confirms.
    let (_, b) = &mut controls[1];
    let event = b.activate((), Some(&mut group)).expect("b is enabled");
    println!("b activated, next_checked={}", event.next_checked());
    print_all(&controls, &group);

    // The user activates "c": the limit is reached, so the group refuses
    // and the next reconciliation pass converges "c" back to unchecked.
    let (_, c) = &mut controls[2];
    let _ = c.activate((), Some(&mut group));
    if let ToggleRequest::Rejected(reason) = group.request_toggle(&"c", true) {
        println!("c request refused: {reason:?}");
    }
    let (_, c) = &mut controls[2];
    c.reconcile(ToggleProps::new().with_value("c"), Some(&group));
    print_all(&controls, &group);
}

fn print_all<'a>(controls: &[(&str, ToggleControl<&'a str>)], group: &ToggleGroup<&'a str, Appearance>) {
    for (label, control) in controls {
        println!("{}", describe(label, &control.presentation(Some(group))));
    }
    println!("group selection: {:?}\n", group.selected());
}
