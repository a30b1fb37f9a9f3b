// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owner-supplied configuration for a toggle control.

/// The owner→core configuration of a toggle control.
///
/// The owner builds one of these per reconciliation pass (or keeps one
/// around and mutates it); the control reads it through its single
/// state-resolution entry point.
///
/// `checked` absent means the control is **uncontrolled**: the checked value
/// is owned internally and seeded once from `initial_checked`. `checked`
/// present means **controlled**: the owner owns the value and the control
/// mirrors it on every pass. The mode is latched at creation; switching
/// mid-lifetime is a usage-contract violation (see
/// [`UsageWarning::ControlledModeSwitch`]).
///
/// `value` is the control's identity inside a group. It is read when the
/// control binds to a group; changing it while grouped takes effect only
/// after an unbind/re-bind.
///
/// [`UsageWarning::ControlledModeSwitch`]: crate::UsageWarning::ControlledModeSwitch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleProps<K> {
    /// External controlled checked value; absent for uncontrolled mode.
    pub checked: Option<bool>,
    /// Owner-driven indeterminate flag, mirrored into the control on change.
    pub indeterminate: bool,
    /// Creation-time seed for uncontrolled mode.
    pub initial_checked: bool,
    /// The control's own disabled flag.
    pub disabled: bool,
    /// Membership identity inside a group.
    pub value: Option<K>,
}

impl<K> Default for ToggleProps<K> {
    fn default() -> Self {
        Self {
            checked: None,
            indeterminate: false,
            initial_checked: false,
            disabled: false,
            value: None,
        }
    }
}

impl<K> ToggleProps<K> {
    /// Creates props with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the external controlled checked value.
    #[must_use]
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    /// Sets the indeterminate flag.
    #[must_use]
    pub fn with_indeterminate(mut self, indeterminate: bool) -> Self {
        self.indeterminate = indeterminate;
        self
    }

    /// Sets the uncontrolled creation-time seed.
    #[must_use]
    pub fn with_initial_checked(mut self, initial_checked: bool) -> Self {
        self.initial_checked = initial_checked;
        self
    }

    /// Sets the control's own disabled flag.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Sets the membership identity.
    #[must_use]
    pub fn with_value(mut self, value: K) -> Self {
        self.value = Some(value);
        self
    }

    /// Returns `true` if these props put the control in controlled mode.
    #[must_use]
    pub fn is_controlled(&self) -> bool {
        self.checked.is_some()
    }
}
