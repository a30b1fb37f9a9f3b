// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Usage-contract diagnostics.
//!
//! This core has no recoverable runtime errors; the only error class is a
//! usage-contract violation, surfaced as a developer-facing warning at most
//! once per control lifetime and never altering behavior.
//!
//! Warnings are delivered through the [`DiagnosticSink`] callback trait so
//! embedders can route them to whatever reporting they use; the warning type
//! implements [`core::fmt::Display`] with the suggested message text.

use alloc::vec::Vec;
use core::fmt;

/// A usage-contract violation observed during reconciliation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UsageWarning {
    /// A grouped control also received an external `checked` override.
    /// Group membership is the sole source of truth while grouped; the
    /// override is ignored.
    ControlledInsideGroup,
    /// The owner switched between controlled and uncontrolled checked state
    /// mid-lifetime. The control keeps its creation-time mode; behavior past
    /// this point is unspecified.
    ControlledModeSwitch,
}

impl UsageWarning {
    /// Returns the suggested developer-facing message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ControlledInsideGroup => {
                "Remove the `checked` override while the control is grouped; \
                 group membership owns the checked state."
            }
            Self::ControlledModeSwitch => {
                "A control should not switch between controlled and \
                 uncontrolled checked state during its lifetime."
            }
        }
    }
}

impl fmt::Display for UsageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A callback sink for usage warnings.
///
/// Reconciliation reports each warning at most once per control lifetime;
/// the sink decides what to do with it (log, panic in a test harness, or
/// nothing at all).
pub trait DiagnosticSink {
    /// Called once per control lifetime for each distinct warning.
    fn usage_warning(&mut self, warning: UsageWarning);
}

/// A sink that discards every warning.
#[derive(Copy, Clone, Debug, Default)]
pub struct IgnoreDiagnostics;

impl DiagnosticSink for IgnoreDiagnostics {
    fn usage_warning(&mut self, _warning: UsageWarning) {}
}

/// A sink that records warnings in order, mainly for tests and tooling.
#[derive(Clone, Debug, Default)]
pub struct CollectDiagnostics {
    /// The recorded warnings, oldest first.
    pub warnings: Vec<UsageWarning>,
}

impl CollectDiagnostics {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticSink for CollectDiagnostics {
    fn usage_warning(&mut self, warning: UsageWarning) {
        self.warnings.push(warning);
    }
}
