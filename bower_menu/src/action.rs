// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard action resolution.
//!
//! [`resolve`] is a pure, table-driven mapping from a platform key press plus
//! the current menu situation (open/closed, nesting, layout direction) to an
//! abstract [`MenuAction`]. Every menu-family primitive routes its key events
//! through this one table, so keyboard behavior cannot drift between
//! dropdowns, context menus, menubar panels, and selects.
//!
//! The submenu open/close keys mirror under right-to-left layout: ArrowRight
//! opens a submenu under [`TextDirection::Ltr`] and closes one under
//! [`TextDirection::Rtl`], and vice versa for ArrowLeft.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 1 << 0;
        /// Control key.
        const CONTROL = 1 << 1;
        /// Alt/Option key.
        const ALT = 1 << 2;
        /// Meta/Command key.
        const META = 1 << 3;
    }
}

impl Modifiers {
    /// Whether any modifier other than Shift is held.
    ///
    /// Shift does not disqualify typeahead input (it produces uppercase
    /// characters); the other modifiers turn a key press into a shortcut the
    /// menu must not swallow.
    pub fn beyond_shift(self) -> bool {
        self.intersects(Self::CONTROL | Self::ALT | Self::META)
    }
}

/// A platform key press, reduced to the keys the menu engine reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Enter/Return.
    Enter,
    /// Space bar.
    Space,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Escape.
    Escape,
    /// Tab (direction carried by the Shift modifier).
    Tab,
    /// A printable character.
    Character(char),
}

/// Horizontal layout direction of the document.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextDirection {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

/// Abstract action a key press resolves to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    /// Open the panel (closed-state trigger keys).
    Open,
    /// Close the whole panel tree.
    Close,
    /// Activate the focused item.
    Select,
    /// Move focus to the next enabled item.
    Next,
    /// Move focus to the previous enabled item.
    Prev,
    /// Move focus to the first enabled item.
    First,
    /// Move focus to the last enabled item.
    Last,
    /// Open the focused item's submenu and enter it.
    OpenSubmenu,
    /// Close the current submenu and return to its trigger item.
    CloseSubmenu,
    /// Feed a printable character to the typeahead buffer.
    Typeahead(char),
    /// Close and let focus move on sequentially (Tab).
    FocusOut,
    /// The key is not handled by the menu.
    None,
}

/// Resolve a key press to a [`MenuAction`].
///
/// Pure: identical inputs always yield identical output. `is_nested` is true
/// inside a submenu panel; it gates [`MenuAction::CloseSubmenu`] so the
/// close-submenu key falls through untouched at the root level.
pub fn resolve(
    key: Key,
    modifiers: Modifiers,
    is_open: bool,
    is_nested: bool,
    direction: TextDirection,
) -> MenuAction {
    if !is_open {
        return match key {
            Key::Enter | Key::Space | Key::ArrowDown | Key::ArrowUp
                if !modifiers.beyond_shift() =>
            {
                MenuAction::Open
            }
            Key::Character(c) if !modifiers.beyond_shift() && !c.is_control() => {
                MenuAction::Typeahead(c)
            }
            _ => MenuAction::None,
        };
    }

    let (open_submenu_key, close_submenu_key) = match direction {
        TextDirection::Ltr => (Key::ArrowRight, Key::ArrowLeft),
        TextDirection::Rtl => (Key::ArrowLeft, Key::ArrowRight),
    };

    match key {
        Key::Escape => MenuAction::Close,
        // Alt+ArrowUp is "select and close" (platform listbox convention);
        // it outranks plain ArrowUp navigation.
        Key::ArrowUp if modifiers.contains(Modifiers::ALT) => MenuAction::Select,
        Key::Enter | Key::Space if !modifiers.beyond_shift() => MenuAction::Select,
        Key::ArrowDown if !modifiers.beyond_shift() => MenuAction::Next,
        Key::ArrowUp if !modifiers.beyond_shift() => MenuAction::Prev,
        Key::Home if !modifiers.beyond_shift() => MenuAction::First,
        Key::End if !modifiers.beyond_shift() => MenuAction::Last,
        Key::Tab => MenuAction::FocusOut,
        k if k == open_submenu_key && !modifiers.beyond_shift() => MenuAction::OpenSubmenu,
        k if k == close_submenu_key && !modifiers.beyond_shift() => {
            if is_nested {
                MenuAction::CloseSubmenu
            } else {
                MenuAction::None
            }
        }
        Key::Character(c) if !modifiers.beyond_shift() && !c.is_control() => {
            MenuAction::Typeahead(c)
        }
        _ => MenuAction::None,
    }
}
