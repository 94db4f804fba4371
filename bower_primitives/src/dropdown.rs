// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropdown menu: a click-activated menu anchored to a trigger button.
//!
//! Almost everything lives in the engine; the adapter contributes the policy
//! preset and the disabled-trigger gate. A disabled trigger swallows open
//! actions entirely — keyboard and pointer alike — while an already open
//! panel keeps working so a menu cannot become unclosable by disabling its
//! trigger mid-session.

use bower_menu::action::{Key, Modifiers, TextDirection};
use bower_menu::engine::{Activation, Effects, MenuEngine, MenuPolicy};

use crate::submenu_side;

/// The dropdown policy preset for a layout direction.
pub fn policy(direction: TextDirection) -> MenuPolicy {
    MenuPolicy {
        activation: Activation::Click,
        submenu_side: submenu_side(direction),
        modal: false,
        loop_focus: false,
        direction,
        trigger_typeahead: false,
    }
}

/// A dropdown menu primitive.
#[derive(Clone, Debug)]
pub struct DropdownMenu<P, K> {
    engine: MenuEngine<P, K>,
    trigger_disabled: bool,
}

impl<P: Copy + Ord, K: Copy + Eq> DropdownMenu<P, K> {
    /// Create a dropdown for a layout direction.
    pub fn new(direction: TextDirection) -> Self {
        Self {
            engine: MenuEngine::new(policy(direction)),
            trigger_disabled: false,
        }
    }

    /// The underlying engine, for panel-level entry points (panel keys,
    /// item registration, pointer events, timers).
    pub fn engine(&self) -> &MenuEngine<P, K> {
        &self.engine
    }

    /// Mutable access to the underlying engine.
    pub fn engine_mut(&mut self) -> &mut MenuEngine<P, K> {
        &mut self.engine
    }

    /// Set whether the trigger is disabled.
    pub fn set_trigger_disabled(&mut self, disabled: bool) {
        self.trigger_disabled = disabled;
    }

    /// Whether the trigger is disabled.
    pub fn is_trigger_disabled(&self) -> bool {
        self.trigger_disabled
    }

    /// A key press on the trigger. Ignored entirely while disabled.
    pub fn on_trigger_key(&mut self, key: Key, modifiers: Modifiers, now: u64) -> Effects<P, K> {
        if self.trigger_disabled {
            return Effects::new();
        }
        self.engine.on_trigger_key(key, modifiers, now)
    }

    /// A click on the trigger. Ignored entirely while disabled.
    pub fn on_trigger_click(&mut self) -> Effects<P, K> {
        if self.trigger_disabled {
            return Effects::new();
        }
        self.engine.on_trigger_click()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bower_menu::engine::Effect;
    use bower_menu::registry::{ItemRole, RegisteredItem};
    use bower_position::Side;

    fn dropdown() -> DropdownMenu<u32, u32> {
        let mut menu = DropdownMenu::new(TextDirection::Ltr);
        menu.engine_mut().mount_panel(1, None);
        menu.engine_mut().register_item(
            1,
            RegisteredItem {
                id: 10,
                text: "Open".into(),
                disabled: false,
                order: 10,
                role: ItemRole::Action,
            },
        );
        menu
    }

    #[test]
    fn disabled_trigger_ignores_open_actions() {
        let mut menu = dropdown();
        menu.set_trigger_disabled(true);
        assert!(menu.on_trigger_key(Key::Enter, Modifiers::empty(), 0).is_empty());
        assert!(menu.on_trigger_click().is_empty());
        assert!(!menu.engine().is_open(1));
    }

    #[test]
    fn disabling_mid_session_still_allows_close() {
        let mut menu = dropdown();
        menu.on_trigger_click();
        assert!(menu.engine().is_open(1));
        menu.set_trigger_disabled(true);
        let effects = menu
            .engine_mut()
            .on_panel_key(1, Key::Escape, Modifiers::empty(), 0);
        assert_eq!(
            effects.as_slice(),
            [Effect::ClosePanel(1), Effect::FocusTrigger(1)]
        );
    }

    #[test]
    fn policy_mirrors_submenu_side_under_rtl() {
        assert_eq!(policy(TextDirection::Ltr).submenu_side, Side::Right);
        assert_eq!(policy(TextDirection::Rtl).submenu_side, Side::Left);
        assert!(!policy(TextDirection::Ltr).modal);
        assert_eq!(policy(TextDirection::Ltr).activation, Activation::Click);
    }
}
