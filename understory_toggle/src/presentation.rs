// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation binding: the read-only snapshot the rendering boundary
//! consumes.
//!
//! The core computes state; a renderer turns it into markup, variant styling
//! and native attributes. The contract between the two is deliberately
//! small: a three-way presentation tag, the raw checked boolean for the
//! native control, the resolved disabled flag, and the ARIA checked token.

use core::fmt;

/// The three-way presentation tag of a toggle control.
///
/// Derived from the two committed booleans: `Mixed` iff both are set, else
/// `Checked` iff checked, else `Unchecked`. The mixed tag takes precedence
/// over `checked` for presentation purposes only; the underlying boolean is
/// still reported separately in [`PresentationSnapshot::checked`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PresentationState {
    /// Neither checked nor presenting as mixed.
    #[default]
    Unchecked,
    /// Checked, with no indeterminate overlay.
    Checked,
    /// Checked and indeterminate at once: "some, not all".
    Mixed,
}

impl PresentationState {
    /// Derives the tag from the committed booleans.
    #[must_use]
    pub const fn from_flags(checked: bool, indeterminate: bool) -> Self {
        if checked && indeterminate {
            Self::Mixed
        } else if checked {
            Self::Checked
        } else {
            Self::Unchecked
        }
    }

    /// Returns the tag as a state token, suitable for a `data-state`-style
    /// attribute or a variant-class suffix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unchecked => "unchecked",
            Self::Checked => "checked",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for PresentationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value a renderer should assign to `aria-checked`.
///
/// `"mixed"` when the presentation state is mixed, else the boolean.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AriaChecked {
    /// `aria-checked="false"`.
    False,
    /// `aria-checked="true"`.
    True,
    /// `aria-checked="mixed"`.
    Mixed,
}

impl AriaChecked {
    /// Returns the attribute value as a string token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::False => "false",
            Self::True => "true",
            Self::Mixed => "mixed",
        }
    }
}

impl From<PresentationState> for AriaChecked {
    fn from(state: PresentationState) -> Self {
        match state {
            PresentationState::Unchecked => Self::False,
            PresentationState::Checked => Self::True,
            PresentationState::Mixed => Self::Mixed,
        }
    }
}

impl fmt::Display for AriaChecked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A read-only snapshot of everything the rendering boundary needs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PresentationSnapshot {
    /// The three-way presentation tag.
    pub state: PresentationState,
    /// The raw committed checked boolean for the native form control.
    pub checked: bool,
    /// The resolved disabled flag (own flag folded with the group's).
    pub disabled: bool,
}

impl PresentationSnapshot {
    /// Returns the `aria-checked` token for this snapshot.
    #[must_use]
    pub fn aria_checked(&self) -> AriaChecked {
        self.state.into()
    }
}
