// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bower Cell: a two-mode value container for headless UI primitives.
//!
//! Every interactive primitive owns at least one piece of primary state — an
//! open flag, a selected value, a checked flag. [`ControlledCell`] stores that
//! state in one of two modes, fixed at construction:
//!
//! - **Uncontrolled**: the cell owns the value. [`ControlledCell::set`]
//!   mutates it and returns the new value so the caller can report the change
//!   to its owner.
//! - **Controlled**: the owner outside the primitive owns the value and the
//!   cell merely echoes it. [`ControlledCell::set`] does *not* mutate; it only
//!   returns the proposed value for reporting. The owner is expected to feed
//!   the accepted value back in via [`ControlledCell::sync`].
//!
//! Switching a cell between modes after construction is not supported; create
//! a new cell instead.
//!
//! ## Example
//!
//! ```rust
//! use bower_cell::ControlledCell;
//!
//! // Uncontrolled open flag: the cell owns the state.
//! let mut open = ControlledCell::new(false);
//! let reported = open.set(true);
//! assert!(reported);
//! assert!(*open.get());
//!
//! // Controlled open flag: the owner drives the state.
//! let mut open = ControlledCell::controlled(false);
//! let reported = open.set(true);
//! assert!(reported); // reported to the owner…
//! assert!(!*open.get()); // …but the cell still echoes the owner's value
//! open.sync(true); // owner accepted the change and fed it back
//! assert!(*open.get());
//! ```
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

/// A value container that is either owned by the primitive (uncontrolled) or
/// echoed from an outside owner (controlled).
///
/// Exactly one side is authoritative at any instant: the internal value in
/// uncontrolled mode, the owner's last [`sync`](Self::sync) in controlled
/// mode. The mode is fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlledCell<T> {
    value: T,
    controlled: bool,
}

impl<T> ControlledCell<T> {
    /// Create an uncontrolled cell owning `initial`.
    pub const fn new(initial: T) -> Self {
        Self {
            value: initial,
            controlled: false,
        }
    }

    /// Create a controlled cell echoing an externally owned `value`.
    pub const fn controlled(value: T) -> Self {
        Self {
            value,
            controlled: true,
        }
    }

    /// Whether this cell is in controlled mode.
    pub const fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// Read the current value.
    ///
    /// In controlled mode this is the owner's most recently synced value,
    /// regardless of any [`set`](Self::set) calls in between.
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Echo a new externally owned value into a controlled cell.
    ///
    /// Calling this on an uncontrolled cell is a structural integration
    /// mistake; it is debug-asserted and otherwise ignored.
    pub fn sync(&mut self, next: T) {
        debug_assert!(self.controlled, "sync is only meaningful on controlled cells");
        if self.controlled {
            self.value = next;
        }
    }
}

impl<T: Clone> ControlledCell<T> {
    /// Propose a new value.
    ///
    /// Uncontrolled cells store `next`; controlled cells leave their echoed
    /// value untouched. Either way the proposed value is returned so the
    /// caller can report it to the owner's change listener. The cell does not
    /// deduplicate equal values; callers that want change-only reporting
    /// compare against [`get`](Self::get) first.
    #[must_use = "forward the returned value to the owner's change listener"]
    pub fn set(&mut self, next: T) -> T {
        if !self.controlled {
            self.value = next.clone();
        }
        next
    }
}

impl<T: Default> Default for ControlledCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncontrolled_set_mutates_and_reports() {
        let mut cell = ControlledCell::new(1_u32);
        assert!(!cell.is_controlled());
        let reported = cell.set(2);
        assert_eq!(reported, 2);
        assert_eq!(*cell.get(), 2);
    }

    #[test]
    fn controlled_set_reports_without_mutating() {
        let mut cell = ControlledCell::controlled(1_u32);
        assert!(cell.is_controlled());
        let reported = cell.set(2);
        assert_eq!(reported, 2);
        // The echoed value is unchanged until the owner syncs it back.
        assert_eq!(*cell.get(), 1);
    }

    #[test]
    fn controlled_read_never_diverges_from_synced_value() {
        let mut cell = ControlledCell::controlled(0_u32);
        for n in 1..10 {
            let _ = cell.set(n);
            assert_eq!(*cell.get(), 0);
        }
        cell.sync(7);
        assert_eq!(*cell.get(), 7);
        let _ = cell.set(99);
        assert_eq!(*cell.get(), 7);
    }

    #[test]
    fn set_reports_equal_values_too() {
        let mut cell = ControlledCell::new(true);
        let reported = cell.set(true);
        assert!(reported);
        assert!(*cell.get());
    }

    #[test]
    fn default_is_uncontrolled() {
        let cell: ControlledCell<bool> = ControlledCell::default();
        assert!(!cell.is_controlled());
        assert!(!*cell.get());
    }
}
