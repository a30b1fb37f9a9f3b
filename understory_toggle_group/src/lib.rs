// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_toggle_group --heading-base-level=0

//! Understory Toggle Group: shared selection state for grouped toggle controls.
//!
//! This crate provides the _group side_ of a grouped toggle (checkbox-style)
//! control: an ordered sequence of selected keys that is the sole source of
//! truth for every member control's checked state. Controls do not mutate the
//! sequence directly; they send toggle *requests*, and the group alone decides
//! whether to honor them (for example against a max-selected limit).
//!
//! The core type is [`ToggleGroup`], a small, generic container that tracks:
//! - The ordered set of selected keys (unique, equality-compared).
//! - The set of **subscribed** member identities, so mutations can report
//!   which members' derived state actually changed.
//! - A monotonically increasing **revision** counter that bumps when the
//!   group's observable state changes.
//! - An **all-disabled** flag that member controls fold into their own
//!   disabled state.
//! - An opaque **appearance** payload passed through to members untouched;
//!   this crate never interprets it.
//!
//! Mutations return [`MembershipChange`] values for subscribed keys whose
//! membership flipped. The embedder routes those to the affected controls;
//! there is no internal callback registry and no global broadcast.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_toggle_group::{ToggleGroup, ToggleRequest};
//!
//! let mut group: ToggleGroup<&str> = ToggleGroup::new();
//! group.subscribe("a");
//! group.subscribe("b");
//!
//! // The owner replaces the selection wholesale.
//! let changes = group.set_selected(["a"]);
//! assert_eq!(changes.len(), 1);
//! assert!(group.contains(&"a"));
//!
//! // A member control requests a toggle; the group decides.
//! match group.request_toggle(&"b", true) {
//!     ToggleRequest::Accepted { changes } => assert_eq!(changes.len(), 1),
//!     ToggleRequest::Rejected(_) => unreachable!(),
//! }
//! assert_eq!(group.selected(), &["a", "b"]);
//! ```
//!
//! ## Concepts
//!
//! - **Selection contents**: an ordered `Vec<K>` with no duplicates. Order is
//!   owned by the group's owner; members only ever derive a membership
//!   boolean from it, so reordering never disturbs member state.
//! - **Subscription**: members register their identity with [`subscribe`]
//!   and remove it with [`unsubscribe`] when they are destroyed. Mutations
//!   compute [`MembershipChange`] notifications for subscribers only.
//! - **Requests**: [`request_toggle`] is the only member-facing mutator. The
//!   group applies its policy (currently an optional max-selected limit) and
//!   either applies the change or returns [`ToggleRequest::Rejected`]. A
//!   member must never assume a request was honored; it re-derives its state
//!   from the sequence afterwards.
//! - **Revision**: bumped only when observable state actually changes.
//!   Replacing the selection with an equal sequence is a no-op, so observers
//!   keyed on the revision never see redundant updates.
//!
//! [`subscribe`]: ToggleGroup::subscribe
//! [`unsubscribe`]: ToggleGroup::unsubscribe
//! [`request_toggle`]: ToggleGroup::request_toggle
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use smallvec::SmallVec;

/// A membership transition for a single subscribed key.
///
/// Produced by [`ToggleGroup`] mutations for each subscriber whose derived
/// membership actually flipped. The embedder routes these to the affected
/// member controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MembershipChange<K> {
    /// The member identity whose membership changed.
    pub key: K,
    /// The membership value after the mutation.
    pub is_member: bool,
}

/// Why a toggle request was not applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Accepting the request would exceed the group's max-selected limit.
    LimitReached,
}

/// The group's verdict on a member toggle request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToggleRequest<K> {
    /// The request was applied (possibly as a no-op if the sequence already
    /// agreed with it). Contains membership transitions for subscribers.
    Accepted {
        /// Transitions for subscribed keys whose membership flipped.
        changes: Vec<MembershipChange<K>>,
    },
    /// The request was refused; the sequence is untouched.
    Rejected(RejectReason),
}

/// Shared selection state for a set of grouped toggle controls.
///
/// `ToggleGroup` does not impose hashing or ordering constraints on `K`; it
/// only requires equality for queries and cloning for notifications. Keys are
/// stored in a `Vec<K>` with uniqueness enforced by equality scans, which
/// keeps the type easy to integrate with application identity types
/// (typically small strings).
///
/// The `A` parameter is an opaque appearance payload handed through to member
/// controls for presentation resolution. This crate never reads it.
#[derive(Clone, Debug, Default)]
pub struct ToggleGroup<K, A = ()> {
    selected: Vec<K>,
    subscribers: SmallVec<[K; 4]>,
    revision: u64,
    disabled_all: bool,
    limit: Option<usize>,
    appearance: A,
}

impl<K, A> ToggleGroup<K, A> {
    /// Creates an empty group with a default appearance payload.
    #[must_use]
    pub fn new() -> Self
    where
        A: Default,
    {
        Self::with_appearance(A::default())
    }

    /// Creates an empty group carrying the given appearance payload.
    #[must_use]
    pub fn with_appearance(appearance: A) -> Self {
        Self {
            selected: Vec::new(),
            subscribers: SmallVec::new(),
            revision: 0,
            disabled_all: false,
            limit: None,
            appearance,
        }
    }

    /// Returns the ordered selection sequence.
    #[must_use]
    pub fn selected(&self) -> &[K] {
        &self.selected
    }

    /// Returns the number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Returns the current revision counter.
    ///
    /// The revision is a monotonically increasing counter local to this
    /// group. It bumps only when observable state actually changes: the
    /// selection contents, the all-disabled flag, or the limit. Replacing the
    /// selection with an equal sequence leaves it unchanged.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if every member control should render disabled.
    #[must_use]
    pub fn disabled_all(&self) -> bool {
        self.disabled_all
    }

    /// Sets the all-disabled flag.
    ///
    /// Member controls fold this into their own disabled state; the group
    /// does not notify members, because disabledness is pulled at
    /// presentation and activation time rather than pushed.
    pub fn set_disabled_all(&mut self, disabled: bool) {
        if self.disabled_all != disabled {
            self.disabled_all = disabled;
            self.bump_revision();
        }
    }

    /// Returns the max-selected limit, if one is set.
    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Sets or clears the max-selected limit.
    ///
    /// Lowering the limit below the current selection size does not evict
    /// anything; it only constrains future [`ToggleGroup::request_toggle`]
    /// calls that would grow the selection.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        if self.limit != limit {
            self.limit = limit;
            self.bump_revision();
        }
    }

    /// Returns the appearance payload.
    #[must_use]
    pub fn appearance(&self) -> &A {
        &self.appearance
    }

    /// Replaces the appearance payload.
    pub fn set_appearance(&mut self, appearance: A) {
        self.appearance = appearance;
    }

    /// Returns the currently subscribed member identities.
    #[must_use]
    pub fn subscribers(&self) -> &[K] {
        &self.subscribers
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<K, A> ToggleGroup<K, A>
where
    K: PartialEq,
{
    /// Returns `true` if the selection currently contains `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.selected.iter().any(|k| k == key)
    }

    /// Registers a member identity for change notifications.
    ///
    /// Subscribing an already-subscribed key is a no-op, so a control can
    /// subscribe unconditionally when it binds to the group.
    pub fn subscribe(&mut self, key: K) {
        if !self.subscribers.iter().any(|k| *k == key) {
            self.subscribers.push(key);
        }
    }

    /// Removes a member identity from change notifications.
    ///
    /// Controls call this when they are destroyed or leave the group.
    pub fn unsubscribe(&mut self, key: &K) {
        if let Some(idx) = self.subscribers.iter().position(|k| k == key) {
            self.subscribers.remove(idx);
        }
    }

    /// Returns `true` if `key` is subscribed.
    #[must_use]
    pub fn is_subscribed(&self, key: &K) -> bool {
        self.subscribers.iter().any(|k| k == key)
    }
}

impl<K, A> ToggleGroup<K, A>
where
    K: Clone + PartialEq,
{
    /// Replaces the selection sequence wholesale.
    ///
    /// - Duplicates in the input are ignored (first occurrence wins).
    /// - If the de-duplicated input equals the current sequence, nothing
    ///   changes: the revision stays put and no notifications are produced.
    /// - Otherwise the sequence is replaced, the revision bumps, and a
    ///   [`MembershipChange`] is returned for every subscriber whose
    ///   membership flipped. A pure reorder bumps the revision but produces
    ///   no membership changes.
    pub fn set_selected<I>(&mut self, keys: I) -> Vec<MembershipChange<K>>
    where
        I: IntoIterator<Item = K>,
    {
        let mut new_items: Vec<K> = Vec::new();
        for key in keys {
            if !new_items.iter().any(|existing| existing == &key) {
                new_items.push(key);
            }
        }

        if new_items == self.selected {
            return Vec::new();
        }

        let changes = self
            .subscribers
            .iter()
            .filter_map(|key| {
                let was = self.selected.iter().any(|k| k == key);
                let now = new_items.iter().any(|k| k == key);
                (was != now).then(|| MembershipChange {
                    key: key.clone(),
                    is_member: now,
                })
            })
            .collect();

        self.selected = new_items;
        self.bump_revision();
        changes
    }

    /// Applies a member's toggle request, subject to group policy.
    ///
    /// This is the only member-facing mutator. `next` is the membership the
    /// member wants for `key` after its local transition:
    ///
    /// - Growing the selection past the max-selected limit is rejected and
    ///   leaves the sequence and revision untouched.
    /// - A request the sequence already agrees with is accepted as a no-op.
    /// - Otherwise the key is appended or removed, the revision bumps, and
    ///   the membership transition is reported for subscribed keys.
    ///
    /// Members must not assume acceptance: they re-derive their checked
    /// state from the sequence on the next reconciliation pass either way.
    pub fn request_toggle(&mut self, key: &K, next: bool) -> ToggleRequest<K> {
        let is_member = self.contains(key);
        if next == is_member {
            return ToggleRequest::Accepted {
                changes: Vec::new(),
            };
        }

        if next {
            if self.limit.is_some_and(|limit| self.selected.len() >= limit) {
                return ToggleRequest::Rejected(RejectReason::LimitReached);
            }
            self.selected.push(key.clone());
        } else {
            // Membership was checked above, so the position exists.
            if let Some(idx) = self.selected.iter().position(|k| k == key) {
                self.selected.remove(idx);
            }
        }
        self.bump_revision();

        let changes = if self.is_subscribed(key) {
            let mut out = Vec::with_capacity(1);
            out.push(MembershipChange {
                key: key.clone(),
                is_member: next,
            });
            out
        } else {
            Vec::new()
        };
        ToggleRequest::Accepted { changes }
    }
}
