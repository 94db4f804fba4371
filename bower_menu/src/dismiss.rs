// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside-interaction detection and modal exclusivity.
//!
//! [`OutsideGuard`] answers one question: is this pointer-down or focus
//! event inside any of the currently *live* subtrees (anchor, open panel,
//! open descendant submenu panels)? It never touches a real document;
//! containment is answered by a host-supplied [`Containment`] source, so the
//! guard works against any tree the host renders into.
//!
//! A host typically keeps **one** guard for the whole document and registers
//! every open primitive's live roots with it, multiplexing a single
//! document-level listener instead of one per mounted primitive.
//!
//! [`ExclusivityGuard`] is the companion for modal panels: a process-wide,
//! reference-counted claim on the document-level side effects (scroll lock
//! plus marking sibling subtrees inert). Two independently opened modal
//! panels share one engagement; the side effects are reverted exactly once,
//! when the last claim is released. Handles are move-only, so a claim cannot
//! be released twice.

use alloc::vec::Vec;

/// Host-supplied ancestry test between rendered nodes.
pub trait Containment<N> {
    /// Whether `target` is `root` itself or a descendant of it.
    fn contains(&self, root: &N, target: &N) -> bool;
}

impl<N, F: Fn(&N, &N) -> bool> Containment<N> for F {
    fn contains(&self, root: &N, target: &N) -> bool {
        self(root, target)
    }
}

/// Verdict for a pointer-down or focus event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InteractionVerdict {
    /// The event landed inside a live subtree; nothing to dismiss.
    Inside,
    /// The event landed outside every live subtree; the owner should close
    /// unless its interception callback marks the event handled.
    Outside,
}

/// Tracks the live element subtrees of the open primitives.
#[derive(Clone, Debug, Default)]
pub struct OutsideGuard<N> {
    live: Vec<N>,
}

impl<N: Copy + Eq> OutsideGuard<N> {
    /// Create a guard with no live subtrees.
    pub const fn new() -> Self {
        Self { live: Vec::new() }
    }

    /// Add a subtree root (anchor or panel). Adding a root twice is a no-op.
    pub fn add_live(&mut self, root: N) {
        if !self.live.contains(&root) {
            self.live.push(root);
        }
    }

    /// Remove a subtree root. Removing an unknown root is a no-op.
    ///
    /// Must be called synchronously when a panel closes or unmounts so a
    /// dismissed panel cannot keep swallowing outside events.
    pub fn remove_live(&mut self, root: N) {
        self.live.retain(|r| *r != root);
    }

    /// Drop every live subtree (primitive unmount).
    pub fn clear(&mut self) {
        self.live.clear();
    }

    /// Whether any live subtree is registered.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Classify an event target against the live set.
    ///
    /// With no live subtrees registered every target is outside, which is
    /// the correct answer for a primitive that already closed.
    pub fn classify(&self, target: &N, containment: &impl Containment<N>) -> InteractionVerdict {
        if self
            .live
            .iter()
            .any(|root| containment.contains(root, target))
        {
            InteractionVerdict::Inside
        } else {
            InteractionVerdict::Outside
        }
    }
}

/// Whether an acquire/release crossed the engaged boundary.
///
/// `Engage` and `Disengage` are each reported exactly once per engagement,
/// no matter how many overlapping claims exist.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LockTransition {
    /// First claim: apply the document side effects now.
    Engage,
    /// Last claim released: revert the document side effects now.
    Disengage,
    /// The engagement state did not change.
    Unchanged,
}

/// A live claim on the modal side effects. Move-only; return it to
/// [`ExclusivityGuard::release`] when the owning panel closes.
#[derive(Debug)]
#[must_use = "dropping the handle without releasing it leaks the modal claim"]
pub struct ModalHandle {
    _private: (),
}

/// Reference-counted claim on document-level modal side effects
/// (scroll lock + inert siblings).
#[derive(Debug, Default)]
pub struct ExclusivityGuard {
    claims: usize,
}

impl ExclusivityGuard {
    /// Create a guard with no claims.
    pub const fn new() -> Self {
        Self { claims: 0 }
    }

    /// Take a claim. Returns [`LockTransition::Engage`] on the first one.
    pub fn acquire(&mut self) -> (ModalHandle, LockTransition) {
        self.claims += 1;
        let transition = if self.claims == 1 {
            LockTransition::Engage
        } else {
            LockTransition::Unchanged
        };
        (ModalHandle { _private: () }, transition)
    }

    /// Return a claim. Returns [`LockTransition::Disengage`] on the last one.
    pub fn release(&mut self, handle: ModalHandle) -> LockTransition {
        let ModalHandle { _private: () } = handle;
        debug_assert!(self.claims > 0, "release without a matching acquire");
        self.claims = self.claims.saturating_sub(1);
        if self.claims == 0 {
            LockTransition::Disengage
        } else {
            LockTransition::Unchanged
        }
    }

    /// Whether the side effects are currently engaged.
    pub fn is_engaged(&self) -> bool {
        self.claims > 0
    }
}
