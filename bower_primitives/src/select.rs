// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Select: a modal listbox bound to a selected-value cell.
//!
//! The select wraps the engine with value plumbing: every
//! [`Effect::Select`] an entry point produces is absorbed into a
//! [`ControlledCell`] before the effects are handed back, so by the time the
//! host fires its value-change callback the adapter's picture of the
//! selection is settled. Options carry host-supplied value strings (the
//! form-submission values), looked up through [`Select::value_str`].
//!
//! Two behaviors distinguish the select from a dropdown:
//!
//! - Re-opening focuses the currently selected option rather than the first
//!   enabled one, and the open panel reports it through
//!   [`Select::active_descendant`] for `aria-activedescendant`.
//! - Typeahead on the *closed* trigger changes the selection without
//!   opening.

use alloc::string::{String, ToString};
use core::hash::Hash;

use hashbrown::HashMap;

use bower_cell::ControlledCell;
use bower_menu::action::{Key, Modifiers, TextDirection};
use bower_menu::engine::{Activation, Effect, Effects, MenuEngine, MenuPolicy};
use bower_menu::registry::{ItemRole, RegisteredItem};

use crate::submenu_side;

/// The select policy preset for a layout direction.
pub fn policy(direction: TextDirection) -> MenuPolicy {
    MenuPolicy {
        activation: Activation::Click,
        submenu_side: submenu_side(direction),
        modal: true,
        loop_focus: false,
        direction,
        trigger_typeahead: true,
    }
}

/// A select primitive: engine plus selected-value state.
#[derive(Clone, Debug)]
pub struct Select<P, K> {
    engine: MenuEngine<P, K>,
    value: ControlledCell<Option<K>>,
    values: HashMap<K, String>,
    trigger_disabled: bool,
}

impl<P: Copy + Ord, K: Copy + Eq + Hash> Select<P, K> {
    /// Create a select owning its value (uncontrolled), initially empty.
    pub fn new(direction: TextDirection) -> Self {
        Self::with_cell(direction, ControlledCell::new(None))
    }

    /// Create a select whose value is owned externally (controlled).
    pub fn controlled(direction: TextDirection, value: Option<K>) -> Self {
        Self::with_cell(direction, ControlledCell::controlled(value))
    }

    fn with_cell(direction: TextDirection, value: ControlledCell<Option<K>>) -> Self {
        Self {
            engine: MenuEngine::new(policy(direction)),
            value,
            values: HashMap::new(),
            trigger_disabled: false,
        }
    }

    /// The underlying engine, for panel-level entry points.
    pub fn engine(&self) -> &MenuEngine<P, K> {
        &self.engine
    }

    /// Mutable access to the underlying engine.
    pub fn engine_mut(&mut self) -> &mut MenuEngine<P, K> {
        &mut self.engine
    }

    /// Mount the listbox panel.
    pub fn mount_listbox(&mut self, panel: P) {
        self.engine.mount_panel(panel, None);
    }

    /// Register an option with its label (typeahead text) and value string
    /// (the form-submission value).
    pub fn register_option(
        &mut self,
        panel: P,
        id: K,
        label: &str,
        value: &str,
        order: u32,
        disabled: bool,
    ) {
        self.engine.register_item(
            panel,
            RegisteredItem {
                id,
                text: label.to_string(),
                disabled,
                order,
                role: ItemRole::Action,
            },
        );
        self.values.insert(id, value.to_string());
    }

    /// Remove an option.
    pub fn unregister_option(&mut self, panel: P, id: K) {
        self.engine.unregister_item(panel, id);
        self.values.remove(&id);
    }

    /// The selected option, if any.
    pub fn value(&self) -> Option<K> {
        *self.value.get()
    }

    /// The selected option's value string.
    pub fn value_str(&self) -> Option<&str> {
        self.value().and_then(|id| self.values.get(&id).map(String::as_str))
    }

    /// Echo an externally accepted value into a controlled select.
    pub fn sync_value(&mut self, value: Option<K>) {
        self.value.sync(value);
    }

    /// Set whether the trigger is disabled.
    pub fn set_trigger_disabled(&mut self, disabled: bool) {
        self.trigger_disabled = disabled;
    }

    /// The option to report through `aria-activedescendant` while open.
    pub fn active_descendant(&self) -> Option<K> {
        let root = self.engine.root()?;
        if !self.engine.is_open(root) {
            return None;
        }
        self.engine.focused(root)
    }

    /// A key press on the trigger. Opens seed focus from the selected
    /// value; closed-trigger typeahead selects without opening.
    pub fn on_trigger_key(&mut self, key: Key, modifiers: Modifiers, now: u64) -> Effects<P, K> {
        if self.trigger_disabled {
            return Effects::new();
        }
        let mut effects = self.engine.on_trigger_key(key, modifiers, now);
        self.absorb(&effects);
        self.seed_selected_focus(&mut effects);
        effects
    }

    /// A click on the trigger.
    pub fn on_trigger_click(&mut self) -> Effects<P, K> {
        if self.trigger_disabled {
            return Effects::new();
        }
        let mut effects = self.engine.on_trigger_click();
        self.seed_selected_focus(&mut effects);
        effects
    }

    /// A key press inside the open listbox.
    pub fn on_listbox_key(&mut self, key: Key, modifiers: Modifiers, now: u64) -> Effects<P, K> {
        let Some(root) = self.engine.root() else {
            return Effects::new();
        };
        let effects = self.engine.on_panel_key(root, key, modifiers, now);
        self.absorb(&effects);
        effects
    }

    /// An option was activated by pointer.
    pub fn on_option_select(&mut self, id: K) -> Effects<P, K> {
        let Some(root) = self.engine.root() else {
            return Effects::new();
        };
        let effects = self.engine.on_item_select(root, id);
        self.absorb(&effects);
        effects
    }

    /// Store selections out of an effect sequence into the value cell.
    fn absorb(&mut self, effects: &Effects<P, K>) {
        for effect in effects {
            if let Effect::Select(_, item) = *effect {
                let _reported = self.value.set(Some(item));
            }
        }
    }

    /// After an open, move focus from the default edge item to the selected
    /// option.
    fn seed_selected_focus(&mut self, effects: &mut Effects<P, K>) {
        let opened = effects
            .iter()
            .any(|e| matches!(e, Effect::OpenPanel(_)));
        if !opened {
            return;
        }
        let (Some(root), Some(selected)) = (self.engine.root(), self.value()) else {
            return;
        };
        let seeded = self.engine.focus_item(root, selected);
        if !seeded.is_empty() {
            effects.retain(|e| !matches!(e, Effect::FocusItem(..) | Effect::FocusPanel(_)));
            effects.extend(seeded);
        }
    }
}
