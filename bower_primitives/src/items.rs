// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Checkbox and radio item state.
//!
//! Menu items with persistent checked state keep it in [`ControlledCell`]s,
//! so each item (or radio group) independently supports the
//! controlled/uncontrolled contract. Selecting these items does not close
//! the menu (their [`ItemRole`](bower_menu::registry::ItemRole) keeps the
//! tree open); the host toggles the state here when the engine reports the
//! selection.

use bower_cell::ControlledCell;

/// Checked state of one checkbox menu item.
#[derive(Clone, Debug, Default)]
pub struct CheckboxItemState {
    checked: ControlledCell<bool>,
}

impl CheckboxItemState {
    /// An uncontrolled checkbox starting at `checked`.
    pub const fn new(checked: bool) -> Self {
        Self {
            checked: ControlledCell::new(checked),
        }
    }

    /// A checkbox whose checked state is owned externally.
    pub const fn controlled(checked: bool) -> Self {
        Self {
            checked: ControlledCell::controlled(checked),
        }
    }

    /// The current checked state.
    pub fn is_checked(&self) -> bool {
        *self.checked.get()
    }

    /// Toggle in response to a selection; returns the state to report to
    /// the owner's change listener.
    #[must_use = "forward the returned state to the owner's change listener"]
    pub fn toggle(&mut self) -> bool {
        let next = !self.is_checked();
        self.checked.set(next)
    }

    /// Echo an externally accepted state into a controlled checkbox.
    pub fn sync(&mut self, checked: bool) {
        self.checked.sync(checked);
    }
}

/// Selected value of a radio group of menu items.
///
/// Exclusivity is structural: the group holds one value, so checking one
/// item unchecks the rest.
#[derive(Clone, Debug, Default)]
pub struct RadioGroupState<V> {
    value: ControlledCell<Option<V>>,
}

impl<V: Clone + PartialEq> RadioGroupState<V> {
    /// An uncontrolled group with no checked item.
    pub const fn new() -> Self {
        Self {
            value: ControlledCell::new(None),
        }
    }

    /// A group whose value is owned externally.
    pub const fn controlled(value: Option<V>) -> Self {
        Self {
            value: ControlledCell::controlled(value),
        }
    }

    /// Whether `value` is the checked item.
    pub fn is_checked(&self, value: &V) -> bool {
        self.value.get().as_ref() == Some(value)
    }

    /// Check `value` in response to a selection; returns the value to
    /// report to the owner's change listener.
    #[must_use = "forward the returned value to the owner's change listener"]
    pub fn select(&mut self, value: V) -> Option<V> {
        self.value.set(Some(value))
    }

    /// Echo an externally accepted value into a controlled group.
    pub fn sync(&mut self, value: Option<V>) {
        self.value.sync(value);
    }
}
