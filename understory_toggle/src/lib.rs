// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_toggle --heading-base-level=0

//! Understory Toggle: tri-state toggle control state with group coordination.
//!
//! This crate provides the _state side_ of a tri-state checkbox-style
//! control: deciding, on every reconciliation pass and every user
//! interaction, whether the control's checked value is driven by a parent
//! group's shared selection, an external controlled value, or a local
//! default — and keeping those three sources from producing contradictory or
//! stale states. Rendering is someone else's job: the crate hands a small
//! read-only snapshot to whatever draws the control.
//!
//! ## Design Philosophy
//!
//! The types here follow the same rules as the other Understory state
//! kernels:
//!
//! - **Minimal and focused**: each module handles one concern — the value
//!   machine, the owner props, group membership, dispatch, presentation.
//! - **Stateful but simple**: just enough state to compute transitions.
//! - **Integration-friendly**: no framework assumptions; the embedder calls
//!   reconciliation before input dispatch and routes group notifications
//!   itself.
//! - **Generic**: application-specific identity and raw-event types.
//!
//! ## Sources of truth
//!
//! The checked value resolves through one entry point,
//! [`ToggleControl::reconcile`], with a strict precedence: **group
//! membership > external controlled value > local default**. Supplying both
//! a group binding and a controlled value is a usage-contract violation,
//! reported once per control lifetime via [`DiagnosticSink`] and otherwise
//! ignored — the group keeps winning.
//!
//! ## Standalone usage
//!
//! ```rust
//! use understory_toggle::{PresentationState, ToggleControl, ToggleProps};
//!
//! let mut control: ToggleControl<&str> =
//!     ToggleControl::new(ToggleProps::new().with_indeterminate(true));
//!
//! // Indeterminate presents as unchecked until checked is also set...
//! assert_eq!(control.presentation::<()>(None).state, PresentationState::Unchecked);
//!
//! // ...and one interaction resolves it forward to fully checked.
//! let event = control.activate::<()>((), None).unwrap();
//! assert!(event.next_checked());
//! assert_eq!(control.presentation::<()>(None).state, PresentationState::Checked);
//! ```
//!
//! ## Grouped usage
//!
//! ```rust
//! use understory_toggle::{ToggleControl, ToggleProps};
//! use understory_toggle_group::ToggleGroup;
//!
//! let mut group: ToggleGroup<&str> = ToggleGroup::new();
//! let _ = group.set_selected(["a"]);
//!
//! let mut control: ToggleControl<&str> =
//!     ToggleControl::new(ToggleProps::new().with_value("b"));
//! control.bind_group(&mut group);
//! assert!(!control.checked());
//!
//! // The group replaces its sequence; the control re-derives membership.
//! let _ = group.set_selected(["a", "b"]);
//! control.on_selection_changed(group.selected());
//! assert!(control.checked());
//!
//! // Activation forwards a request; the group stays authoritative.
//! let event = control.activate((), Some(&mut group)).unwrap();
//! assert!(!event.next_checked());
//! assert!(!group.contains(&"b"));
//! ```
//!
//! ## Presentation boundary
//!
//! Renderers consume [`PresentationSnapshot`]: the three-way
//! [`PresentationState`] tag (mixed wins over checked), the raw checked
//! boolean for the native control, the resolved disabled flag, and the
//! [`AriaChecked`] token (`"mixed"` when mixed, else the boolean).
//! Presentation-only `color`/`size` passthrough resolves through
//! [`Appearance`], carried as the group's opaque payload.
//!
//! ## Integration with Understory
//!
//! - `understory_toggle_group` owns the shared selection sequence and the
//!   accept/reject policy for grouped controls.
//! - An embedder's responder/router layer decides *which* control an
//!   activation targets; this crate only consumes the resulting raw event.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod appearance;
mod control;
mod diagnostics;
mod event;
mod handle;
mod presentation;
mod props;
mod state;

pub use appearance::{Appearance, ControlSize, Tone};
pub use control::{ChangeHandler, ToggleControl};
pub use diagnostics::{CollectDiagnostics, DiagnosticSink, IgnoreDiagnostics, UsageWarning};
pub use event::{EventTarget, ToggleEvent};
pub use handle::{Focusable, NativeHandle};
pub use presentation::{AriaChecked, PresentationSnapshot, PresentationState};
pub use props::ToggleProps;
pub use state::ToggleState;
