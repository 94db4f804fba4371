// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menubar: a horizontal row of menu triggers with arrow traversal.
//!
//! Each top-level menu owns its own engine built from [`policy`]; the
//! [`Menubar`] tracks the trigger row itself — which trigger holds roving
//! focus, which menu is open, and how the horizontal arrow keys traverse the
//! row. Traversal wraps at the ends, skips disabled triggers, and mirrors
//! under right-to-left layout. While a menu is open, moving to another
//! trigger means the host closes the old engine and opens the new one
//! (hover chaining); the menubar only reports the target trigger.

use alloc::vec::Vec;

use bower_menu::action::{Key, TextDirection};
use bower_menu::engine::{Activation, MenuPolicy};

use crate::submenu_side;

/// The per-menu policy preset for a menubar in a layout direction.
pub fn policy(direction: TextDirection) -> MenuPolicy {
    MenuPolicy {
        activation: Activation::HoverChain,
        submenu_side: submenu_side(direction),
        modal: false,
        loop_focus: false,
        direction,
        trigger_typeahead: false,
    }
}

/// The trigger row of a menubar.
#[derive(Clone, Debug)]
pub struct Menubar<K> {
    /// Triggers in visual order, with their disabled flags.
    triggers: Vec<(K, bool)>,
    active: Option<K>,
    open_menu: Option<K>,
    direction: TextDirection,
}

impl<K: Copy + Eq> Menubar<K> {
    /// Create an empty menubar for a layout direction.
    pub const fn new(direction: TextDirection) -> Self {
        Self {
            triggers: Vec::new(),
            active: None,
            open_menu: None,
            direction,
        }
    }

    /// Register a trigger at the end of the row, or update its disabled
    /// flag in place when already registered.
    pub fn register_trigger(&mut self, id: K, disabled: bool) {
        if let Some(entry) = self.triggers.iter_mut().find(|(t, _)| *t == id) {
            entry.1 = disabled;
            return;
        }
        self.triggers.push((id, disabled));
    }

    /// Remove a trigger from the row.
    pub fn unregister_trigger(&mut self, id: K) {
        self.triggers.retain(|(t, _)| *t != id);
        if self.active == Some(id) {
            self.active = None;
        }
        if self.open_menu == Some(id) {
            self.open_menu = None;
        }
    }

    /// The trigger currently holding roving focus.
    pub fn active(&self) -> Option<K> {
        self.active
    }

    /// Move roving focus to a trigger (or clear it on focus-out).
    pub fn set_active(&mut self, id: Option<K>) {
        self.active = id;
    }

    /// Record which menu is open, if any.
    pub fn menu_opened(&mut self, id: K) {
        self.open_menu = Some(id);
    }

    /// Record that the open menu closed.
    pub fn menu_closed(&mut self) {
        self.open_menu = None;
    }

    /// The open menu's trigger, if any.
    pub fn open_menu(&self) -> Option<K> {
        self.open_menu
    }

    /// Whether hovering another trigger should open its menu without a
    /// click (true once any menu in the bar is open).
    pub fn hover_chain_armed(&self) -> bool {
        self.open_menu.is_some()
    }

    /// The trigger a horizontal key moves roving focus to.
    ///
    /// ArrowRight advances in [`TextDirection::Ltr`] and retreats in
    /// [`TextDirection::Rtl`]; ArrowLeft mirrors. Home/End jump to the
    /// ends. Movement wraps and skips disabled triggers; keys that do not
    /// traverse the row return `None`.
    pub fn traverse(&self, key: Key) -> Option<K> {
        let enabled: Vec<K> = self
            .triggers
            .iter()
            .filter(|(_, disabled)| !disabled)
            .map(|&(t, _)| t)
            .collect();
        if enabled.is_empty() {
            return None;
        }
        let forward = match (key, self.direction) {
            (Key::ArrowRight, TextDirection::Ltr) | (Key::ArrowLeft, TextDirection::Rtl) => true,
            (Key::ArrowLeft, TextDirection::Ltr) | (Key::ArrowRight, TextDirection::Rtl) => false,
            (Key::Home, _) => return enabled.first().copied(),
            (Key::End, _) => return enabled.last().copied(),
            _ => return None,
        };
        let position = self.active.and_then(|a| enabled.iter().position(|&t| t == a));
        let next = match (position, forward) {
            (Some(pos), true) => (pos + 1) % enabled.len(),
            (Some(pos), false) => (pos + enabled.len() - 1) % enabled.len(),
            (None, true) => 0,
            (None, false) => enabled.len() - 1,
        };
        Some(enabled[next])
    }
}
