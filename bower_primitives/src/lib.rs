// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bower Primitives: thin per-primitive adapters over the menu engine.
//!
//! Each menu-family primitive is a [`MenuEngine`](bower_menu::engine::MenuEngine)
//! configured by a policy preset plus whatever small state the primitive
//! genuinely adds on top:
//!
//! - [`dropdown`]: click-activated menu anchored to a trigger button.
//! - [`context_menu`]: context-click activation at the pointer position.
//! - [`menubar`]: a horizontal row of triggers with arrow traversal and
//!   hover chaining once any menu is open.
//! - [`select`]: a modal listbox with a selected-value cell and
//!   `aria-activedescendant` focus reporting.
//!
//! [`items`] holds the checkbox/radio item state cells, and [`markup`]
//! derives the machine-readable attribute contract (`data-state`, ARIA
//! pairings) from primitive state.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use bower_menu::action::TextDirection;
use bower_position::Side;

pub mod context_menu;
pub mod dropdown;
pub mod items;
pub mod markup;
pub mod menubar;
pub mod select;

/// The default submenu side for a layout direction.
pub(crate) fn submenu_side(direction: TextDirection) -> Side {
    match direction {
        TextDirection::Ltr => Side::Right,
        TextDirection::Rtl => Side::Left,
    }
}
