// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The assembled toggle control: props resolution, group membership, and
//! interaction dispatch.
//!
//! ## Sources of truth
//!
//! A control's checked value can be driven by three sources. They are
//! resolved in one place — [`ToggleControl::reconcile`] — with a strict
//! precedence:
//!
//! 1. **Group membership** while the control is bound to a group.
//! 2. **External controlled value** (`props.checked`) otherwise.
//! 3. **Local state**, seeded once from `props.initial_checked`.
//!
//! Combining sources 1 and 2 is a usage-contract violation; it is reported
//! through the diagnostic sink at most once per control lifetime, and the
//! group keeps winning.
//!
//! ## Ordering
//!
//! Reconciliation is observation-driven and runs before user input can be
//! dispatched: the embedder calls [`ToggleControl::reconcile`] from its
//! property-change pass, then routes activation events into
//! [`ToggleControl::activate`]. An activation commits exactly one state
//! transition, forwards at most one request to the group, and invokes the
//! owner callback synchronously after the state is committed.
//!
//! ## Minimal example
//!
//! ```
//! use understory_toggle::{PresentationState, ToggleControl, ToggleProps};
//!
//! let props: ToggleProps<&str> = ToggleProps::new();
//! let mut control: ToggleControl<&str> = ToggleControl::new(props);
//! assert_eq!(
//!     control.presentation::<()>(None).state,
//!     PresentationState::Unchecked
//! );
//!
//! // One activation toggles on and publishes the post-transition value.
//! let event = control.activate::<()>((), None);
//! assert_eq!(event.map(|e| e.next_checked()), Some(true));
//! ```

use alloc::boxed::Box;
use bitflags::bitflags;
use core::fmt;

use understory_toggle_group::{MembershipChange, ToggleGroup, ToggleRequest};

use crate::diagnostics::{DiagnosticSink, IgnoreDiagnostics, UsageWarning};
use crate::event::ToggleEvent;
use crate::presentation::PresentationSnapshot;
use crate::props::ToggleProps;
use crate::state::ToggleState;

/// The owner change callback, invoked synchronously after each committed
/// activation.
pub type ChangeHandler<E> = Box<dyn FnMut(&mut ToggleEvent<E>)>;

bitflags! {
    /// Warnings already surfaced for this control.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    struct Reported: u8 {
        const GROUPED_CONTROLLED = 1 << 0;
        const MODE_SWITCH = 1 << 1;
    }
}

/// A tri-state toggle control.
///
/// `K` is the membership identity type (typically a small string type); `E`
/// is the embedder's raw activation event type, carried through opaquely.
///
/// The control holds only state; it never owns the group. The embedder
/// passes the group handle explicitly to the operations that need it, which
/// keeps the subscription relation visible at every call site.
pub struct ToggleControl<K, E = ()> {
    state: ToggleState,
    props: ToggleProps<K>,
    grouped: bool,
    member: bool,
    controlled_mode: bool,
    last_indeterminate_prop: bool,
    reported: Reported,
    on_change: Option<ChangeHandler<E>>,
}

impl<K: fmt::Debug, E> fmt::Debug for ToggleControl<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleControl")
            .field("state", &self.state)
            .field("props", &self.props)
            .field("grouped", &self.grouped)
            .field("member", &self.member)
            .field("controlled_mode", &self.controlled_mode)
            .finish_non_exhaustive()
    }
}

impl<K, E> ToggleControl<K, E> {
    /// Creates a control from its initial props.
    ///
    /// In controlled mode the external value seeds the state; otherwise
    /// `initial_checked` does. The controlled/uncontrolled mode is latched
    /// here for the control's lifetime.
    #[must_use]
    pub fn new(props: ToggleProps<K>) -> Self {
        let seed = props.checked.unwrap_or(props.initial_checked);
        Self {
            state: ToggleState::seed(seed, props.indeterminate),
            controlled_mode: props.checked.is_some(),
            last_indeterminate_prop: props.indeterminate,
            grouped: false,
            member: false,
            reported: Reported::empty(),
            on_change: None,
            props,
        }
    }

    /// Registers the owner change callback.
    pub fn set_on_change(&mut self, handler: ChangeHandler<E>) {
        self.on_change = Some(handler);
    }

    /// Removes the owner change callback.
    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    /// Returns the committed tri-state value machine.
    #[must_use]
    pub fn state(&self) -> &ToggleState {
        &self.state
    }

    /// Returns the committed checked value.
    #[must_use]
    pub fn checked(&self) -> bool {
        self.state.checked()
    }

    /// Returns the committed indeterminate flag.
    #[must_use]
    pub fn indeterminate(&self) -> bool {
        self.state.indeterminate()
    }

    /// Returns the current props.
    #[must_use]
    pub fn props(&self) -> &ToggleProps<K> {
        &self.props
    }

    /// Returns the membership identity, if one was configured.
    #[must_use]
    pub fn identity(&self) -> Option<&K> {
        self.props.value.as_ref()
    }

    /// Returns `true` while the control is bound to a group.
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        self.grouped
    }

    /// Returns the last derived group membership.
    ///
    /// Meaningful only while grouped; `false` otherwise.
    #[must_use]
    pub fn is_member(&self) -> bool {
        self.member
    }

    /// Returns `true` if the control was created in controlled mode.
    #[must_use]
    pub fn is_controlled(&self) -> bool {
        self.controlled_mode
    }

    /// Resolves the effective disabled flag.
    ///
    /// The control's own flag is folded with the group's all-disabled flag
    /// while grouped.
    #[must_use]
    pub fn is_disabled<A>(&self, group: Option<&ToggleGroup<K, A>>) -> bool {
        if self.grouped {
            self.props.disabled || group.is_some_and(ToggleGroup::disabled_all)
        } else {
            self.props.disabled
        }
    }

    /// Returns the read-only snapshot the rendering boundary consumes.
    #[must_use]
    pub fn presentation<A>(&self, group: Option<&ToggleGroup<K, A>>) -> PresentationSnapshot {
        PresentationSnapshot {
            state: self.state.presentation(),
            checked: self.state.checked(),
            disabled: self.is_disabled(group),
        }
    }
}

impl<K, E> ToggleControl<K, E>
where
    K: Clone + PartialEq,
{
    /// Binds the control to a group, subscribing its identity and deriving
    /// membership immediately.
    ///
    /// Without an identity (`props.value` absent) the control stays in
    /// standalone mode and this is an inert no-op; `false` is returned.
    pub fn bind_group<A>(&mut self, group: &mut ToggleGroup<K, A>) -> bool {
        let Some(identity) = self.props.value.clone() else {
            return false;
        };
        group.subscribe(identity);
        self.grouped = true;
        let _ = self.sync_membership(group.selected());
        true
    }

    /// Unbinds the control from a group, unsubscribing its identity.
    ///
    /// Called when the control is destroyed or leaves the group. The
    /// committed state is left as-is; the control returns to standalone
    /// mode.
    pub fn unbind_group<A>(&mut self, group: &mut ToggleGroup<K, A>) {
        if let Some(identity) = &self.props.value {
            group.unsubscribe(identity);
        }
        self.grouped = false;
        self.member = false;
    }

    /// Re-derives group membership from the shared selection sequence.
    ///
    /// Keyed on actual membership content: a reordered or re-created
    /// sequence with the same membership produces no state change. Returns
    /// `true` if the committed checked value changed.
    pub fn on_selection_changed(&mut self, selected: &[K]) -> bool {
        if !self.grouped {
            return false;
        }
        self.sync_membership(selected)
    }

    /// Applies a routed membership notification from the group.
    ///
    /// Notifications for other identities are ignored. Returns `true` if
    /// the committed checked value changed.
    pub fn observe_membership(&mut self, change: &MembershipChange<K>) -> bool {
        if !self.grouped
            || !self
                .props
                .value
                .as_ref()
                .is_some_and(|identity| *identity == change.key)
        {
            return false;
        }
        self.member = change.is_member;
        self.commit_membership()
    }

    /// The single state-resolution entry point, with warnings discarded.
    ///
    /// See [`ToggleControl::reconcile_with_diagnostics`].
    pub fn reconcile<A>(&mut self, props: ToggleProps<K>, group: Option<&ToggleGroup<K, A>>) {
        self.reconcile_with_diagnostics(props, group, &mut IgnoreDiagnostics);
    }

    /// The single state-resolution entry point.
    ///
    /// The embedder calls this on every property-change pass, before any
    /// user input is dispatched. In order:
    ///
    /// 1. Usage-contract guards run and report through `diag`, each at most
    ///    once per control lifetime. They never alter behavior.
    /// 2. The indeterminate prop is mirrored into the committed state when
    ///    the prop itself changed.
    /// 3. The checked value is resolved by precedence: group membership
    ///    while grouped, else the external controlled value, else the local
    ///    state is left alone.
    ///
    /// The controlled value is re-asserted on every pass, so a local toggle
    /// that diverged from a present `props.checked` never survives past the
    /// pass that observes it.
    pub fn reconcile_with_diagnostics<A>(
        &mut self,
        props: ToggleProps<K>,
        group: Option<&ToggleGroup<K, A>>,
        diag: &mut impl DiagnosticSink,
    ) {
        if self.grouped
            && props.checked.is_some()
            && !self.reported.contains(Reported::GROUPED_CONTROLLED)
        {
            self.reported.insert(Reported::GROUPED_CONTROLLED);
            diag.usage_warning(UsageWarning::ControlledInsideGroup);
        }
        if props.checked.is_some() != self.controlled_mode
            && !self.reported.contains(Reported::MODE_SWITCH)
        {
            self.reported.insert(Reported::MODE_SWITCH);
            diag.usage_warning(UsageWarning::ControlledModeSwitch);
        }

        if props.indeterminate != self.last_indeterminate_prop {
            self.last_indeterminate_prop = props.indeterminate;
            let _ = self.state.observe_indeterminate(props.indeterminate);
        }

        if self.grouped {
            if let Some(group) = group {
                let _ = self.sync_membership(group.selected());
            }
        } else if let Some(checked) = props.checked {
            let _ = self.state.observe_checked(checked);
        }

        self.props = props;
    }

    /// Dispatches a raw activation event.
    ///
    /// Disabled controls (own flag, or the group's all-disabled flag while
    /// grouped) ignore the event entirely: no state change, no group
    /// request, no callback, and `None` is returned.
    ///
    /// Otherwise, in order: the state transitions; while grouped the
    /// post-transition value is forwarded to the group as a request (whose
    /// verdict is *not* assumed — a rejection is simply reconciled away on
    /// the next pass); the normalized event is built and handed to the
    /// owner callback, after the state is already committed.
    pub fn activate<A>(
        &mut self,
        raw: E,
        group: Option<&mut ToggleGroup<K, A>>,
    ) -> Option<ToggleEvent<E>> {
        if self.is_disabled(group.as_deref()) {
            return None;
        }

        let next = self.state.transition();

        if self.grouped
            && let Some(group) = group
            && let Some(identity) = self.props.value.clone()
        {
            match group.request_toggle(&identity, next) {
                ToggleRequest::Accepted { .. } => {
                    self.member = group.contains(&identity);
                }
                // The sequence is untouched; the next reconciliation pass
                // restores the group-confirmed state.
                ToggleRequest::Rejected(_) => {}
            }
        }

        let mut event = ToggleEvent::new(next, raw);
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&mut event);
        }
        Some(event)
    }

    fn sync_membership(&mut self, selected: &[K]) -> bool {
        let member = match &self.props.value {
            Some(identity) => selected.iter().any(|k| k == identity),
            None => return false,
        };
        self.member = member;
        self.commit_membership()
    }

    fn commit_membership(&mut self) -> bool {
        if self.member == self.state.checked() {
            return false;
        }
        self.state.observe_checked(self.member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectDiagnostics;
    use crate::presentation::PresentationState;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::Cell;

    type Control = ToggleControl<&'static str, u32>;
    type Group = ToggleGroup<&'static str>;

    fn standalone(props: ToggleProps<&'static str>) -> Control {
        ToggleControl::new(props)
    }

    #[test]
    fn uncontrolled_default_toggles_on_first_activation() {
        let mut control = standalone(ToggleProps::new());
        assert_eq!(
            control.presentation(None::<&Group>).state,
            PresentationState::Unchecked
        );

        let event = control.activate(1, None::<&mut Group>).unwrap();
        assert!(event.next_checked());
        assert_eq!(
            control.presentation(None::<&Group>).state,
            PresentationState::Checked
        );
    }

    #[test]
    fn controlled_value_seeds_over_initial_checked() {
        let control =
            standalone(ToggleProps::new().with_initial_checked(true).with_checked(false));
        assert!(!control.checked());
        assert!(control.is_controlled());
    }

    #[test]
    fn controlled_value_rewins_on_every_pass() {
        let props = ToggleProps::new().with_checked(true);
        let mut control = standalone(props.clone());
        assert!(control.checked());

        // A local toggle diverges...
        let event = control.activate(1, None::<&mut Group>).unwrap();
        assert!(!event.next_checked());
        assert!(!control.checked());

        // ...but never survives the next reconciliation pass, even though
        // the owner re-supplied an unchanged prop value.
        control.reconcile(props, None::<&Group>);
        assert!(control.checked());
    }

    #[test]
    fn indeterminate_prop_mirrors_on_prop_change_only() {
        let props = ToggleProps::new().with_indeterminate(true);
        let mut control = standalone(props.clone());
        assert!(control.indeterminate());

        // Interaction clears the flag.
        let _ = control.activate(1, None::<&mut Group>);
        assert!(!control.indeterminate());

        // Re-supplying the same prop value must not resurrect it.
        control.reconcile(props, None::<&Group>);
        assert!(!control.indeterminate());

        // An actual prop change mirrors in.
        control.reconcile(ToggleProps::new().with_indeterminate(false), None::<&Group>);
        control.reconcile(ToggleProps::new().with_indeterminate(true), None::<&Group>);
        assert!(control.indeterminate());
    }

    #[test]
    fn disabled_control_ignores_activation_entirely() {
        let mut control = standalone(ToggleProps::new().with_disabled(true));
        let calls = Rc::new(Cell::new(0_u32));
        let seen = Rc::clone(&calls);
        control.set_on_change(Box::new(move |_| seen.set(seen.get() + 1)));

        let revision = control.state().revision();
        assert!(control.activate(1, None::<&mut Group>).is_none());
        assert_eq!(control.state().revision(), revision);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn group_disabled_all_short_circuits_activation() {
        let mut group = Group::new();
        group.set_disabled_all(true);

        let mut control = standalone(ToggleProps::new().with_value("a"));
        assert!(control.bind_group(&mut group));

        let revision = control.state().revision();
        assert!(control.activate(1, Some(&mut group)).is_none());
        assert_eq!(control.state().revision(), revision);
        assert!(group.is_empty());
    }

    #[test]
    fn callback_runs_after_state_is_committed() {
        let mut control = standalone(ToggleProps::new());
        let observed = Rc::new(Cell::new(false));
        let seen = Rc::clone(&observed);
        control.set_on_change(Box::new(move |event| {
            // The event publishes the post-transition value.
            seen.set(event.next_checked());
            event.prevent_default();
        }));

        let event = control.activate(1, None::<&mut Group>).unwrap();
        assert!(observed.get());
        assert!(control.checked());
        assert!(event.default_prevented());
    }

    #[test]
    fn bind_group_without_identity_is_inert() {
        let mut group = Group::new();
        let mut control = standalone(ToggleProps::new());
        assert!(!control.bind_group(&mut group));
        assert!(!control.is_grouped());
        assert!(group.subscribers().is_empty());
    }

    #[test]
    fn bind_group_derives_membership_immediately() {
        let mut group = Group::new();
        let _ = group.set_selected(["a"]);

        let mut control = standalone(ToggleProps::new().with_value("a"));
        assert!(control.bind_group(&mut group));
        assert!(control.is_member());
        assert!(control.checked());
        assert!(group.is_subscribed(&"a"));
    }

    #[test]
    fn unbind_group_unsubscribes_and_returns_to_standalone() {
        let mut group = Group::new();
        let mut control = standalone(ToggleProps::new().with_value("a"));
        control.bind_group(&mut group);

        control.unbind_group(&mut group);
        assert!(!control.is_grouped());
        assert!(!control.is_member());
        assert!(group.subscribers().is_empty());
    }

    #[test]
    fn selection_reorder_causes_no_state_change() {
        let mut group = Group::new();
        let _ = group.set_selected(["a", "b"]);

        let mut control = standalone(ToggleProps::new().with_value("a"));
        control.bind_group(&mut group);
        let revision = control.state().revision();

        let changes = group.set_selected(["b", "a"]);
        assert!(changes.is_empty());
        assert!(!control.on_selection_changed(group.selected()));
        assert_eq!(control.state().revision(), revision);
    }

    #[test]
    fn observe_membership_ignores_other_identities() {
        let mut group = Group::new();
        let mut control = standalone(ToggleProps::new().with_value("a"));
        control.bind_group(&mut group);

        let change = MembershipChange {
            key: "b",
            is_member: true,
        };
        assert!(!control.observe_membership(&change));
        assert!(!control.checked());

        let change = MembershipChange {
            key: "a",
            is_member: true,
        };
        assert!(control.observe_membership(&change));
        assert!(control.checked());
    }

    #[test]
    fn grouped_controlled_override_warns_once_and_group_wins() {
        let mut group = Group::new();
        let _ = group.set_selected(["a"]);

        let mut control = standalone(ToggleProps::new().with_value("a"));
        control.bind_group(&mut group);

        let mut diag = CollectDiagnostics::new();
        let conflicting = ToggleProps::new().with_value("a").with_checked(false);
        control.reconcile_with_diagnostics(conflicting.clone(), Some(&group), &mut diag);
        control.reconcile_with_diagnostics(conflicting, Some(&group), &mut diag);

        // Mode-switch also fires once: the control was created uncontrolled.
        assert_eq!(
            diag.warnings,
            Vec::from([
                UsageWarning::ControlledInsideGroup,
                UsageWarning::ControlledModeSwitch,
            ])
        );
        // The override is ignored; membership owns the state.
        assert!(control.checked());
    }

    #[test]
    fn activation_forwards_post_transition_value_to_group() {
        let mut group = Group::new();
        let _ = group.set_selected(["a"]);

        let mut control = standalone(ToggleProps::new().with_value("a"));
        control.bind_group(&mut group);
        assert!(control.checked());

        let event = control.activate(1, Some(&mut group)).unwrap();
        assert!(!event.next_checked());
        assert!(!group.contains(&"a"));
        assert!(!control.is_member());
    }

    #[test]
    fn rejected_request_is_reconciled_away() {
        let mut group = Group::new();
        group.set_limit(Some(1));
        let _ = group.set_selected(["a"]);

        let mut control = standalone(ToggleProps::new().with_value("b"));
        control.bind_group(&mut group);
        assert!(!control.checked());

        // The local transition lands, but the group refuses the request.
        let event = control.activate(1, Some(&mut group)).unwrap();
        assert!(event.next_checked());
        assert!(control.checked());
        assert!(!group.contains(&"b"));

        // The next pass restores the group-confirmed state.
        control.reconcile(ToggleProps::new().with_value("b"), Some(&group));
        assert!(!control.checked());
    }

    #[test]
    fn indeterminate_resolves_forward_and_publishes_true() {
        let mut control = standalone(ToggleProps::new().with_indeterminate(true));
        let event = control.activate(1, None::<&mut Group>).unwrap();
        assert!(event.next_checked());
        assert!(control.checked());
        assert!(!control.indeterminate());
    }

    #[test]
    fn mixed_presentation_takes_precedence_for_aria() {
        let control =
            standalone(ToggleProps::new().with_checked(true).with_indeterminate(true));
        let snapshot = control.presentation(None::<&Group>);
        assert_eq!(snapshot.state, PresentationState::Mixed);
        assert_eq!(snapshot.aria_checked().as_str(), "mixed");
        assert!(snapshot.checked);
    }
}
