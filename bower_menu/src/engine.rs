// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The menu engine façade.
//!
//! [`MenuEngine`] owns the panel tree, the per-panel item registries and
//! typeahead buffers, and the hover coordinator, and wires them into the
//! observable behavior of a menu-family primitive. Primitives differ only in
//! the [`MenuPolicy`] they construct the engine with.
//!
//! Every entry point mutates engine state first and then returns an ordered
//! [`Effect`] sequence for the host to apply to its document. Focus effects
//! always follow the open/close effects of the same interaction, so by the
//! time the host moves real focus the engine's picture of the tree is
//! already settled. The engine owns no timers: effects carry wake-up
//! deadlines and the host re-enters through [`MenuEngine::on_timer`].

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::action::{self, Key, MenuAction, Modifiers, TextDirection};
use crate::focus;
use crate::hover::HoverCoordinator;
use crate::panel::PanelTree;
use crate::registry::{ItemRegistry, ItemRole, RegisteredItem};
use crate::typeahead::TypeaheadBuffer;

/// How the primitive's root panel is opened by pointer input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Activation {
    /// Primary click on the trigger toggles the panel (dropdown, select).
    #[default]
    Click,
    /// Context click opens at the pointer position (context menu).
    ContextClick,
    /// Once any panel in the group is open, hovering a trigger opens its
    /// panel without a click (menubar).
    HoverChain,
}

/// Per-primitive behavior knobs.
#[derive(Clone, Debug)]
pub struct MenuPolicy {
    /// Pointer activation style of the root panel.
    pub activation: Activation,
    /// Preferred side for submenu panels relative to their trigger item.
    pub submenu_side: bower_position::Side,
    /// Whether open panels engage the document-level exclusivity guard
    /// (scroll lock + inert siblings).
    pub modal: bool,
    /// Whether Next/Prev wrap at the ends instead of clamping.
    pub loop_focus: bool,
    /// Horizontal layout direction; mirrors the submenu keys.
    pub direction: TextDirection,
    /// Whether typeahead on the *closed* trigger changes the selection
    /// without opening (select listboxes).
    pub trigger_typeahead: bool,
}

impl Default for MenuPolicy {
    fn default() -> Self {
        Self {
            activation: Activation::Click,
            submenu_side: bower_position::Side::Right,
            modal: false,
            loop_focus: false,
            direction: TextDirection::Ltr,
            trigger_typeahead: false,
        }
    }
}

/// Why a panel is being opened; decides where focus lands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenReason {
    /// Keyboard open. Focus moves onto the first enabled item, or the last
    /// when `backward` (ArrowUp on a trigger opens focusing the end).
    Keyboard {
        /// Focus the last enabled item instead of the first.
        backward: bool,
    },
    /// Pointer open. Focus moves to the panel container only; no item is
    /// highlighted until the pointer reaches one.
    Pointer,
}

/// One document side effect, to be applied by the host in sequence order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect<P, K> {
    /// Mount/show the panel's floating element.
    OpenPanel(P),
    /// Hide the panel's floating element.
    ClosePanel(P),
    /// Move focus to an item inside a panel.
    FocusItem(P, K),
    /// Move focus to the panel container itself.
    FocusPanel(P),
    /// Return focus to the primitive's trigger element.
    FocusTrigger(P),
    /// The item was activated; the host fires its selection callback.
    Select(P, K),
    /// Schedule a wake-up call to [`MenuEngine::on_timer`] at this deadline.
    ScheduleWake(u64),
    /// First modal panel opened: engage scroll lock and inert siblings via
    /// the host's [`ExclusivityGuard`](crate::dismiss::ExclusivityGuard).
    EngageExclusivity,
    /// Last modal panel closed: release the exclusivity claim.
    ReleaseExclusivity,
}

/// Ordered effect sequence of one engine entry point.
///
/// Interactions rarely produce more than a handful of effects, so these stay
/// on the stack.
pub type Effects<P, K> = SmallVec<[Effect<P, K>; 8]>;

/// The consolidated interaction engine behind one menu-family primitive.
#[derive(Clone, Debug)]
pub struct MenuEngine<P, K> {
    policy: MenuPolicy,
    panels: PanelTree<P, K>,
    registries: BTreeMap<P, ItemRegistry<K>>,
    /// One buffer per panel; a prefix typed in one panel never narrows
    /// matches in another.
    typeahead: BTreeMap<P, TypeaheadBuffer<K>>,
    hover: HoverCoordinator<P>,
    root: Option<P>,
}

impl<P: Copy + Ord, K: Copy + Eq> MenuEngine<P, K> {
    /// Create an engine with the given policy and no panels.
    pub fn new(policy: MenuPolicy) -> Self {
        Self {
            policy,
            panels: PanelTree::new(),
            registries: BTreeMap::new(),
            typeahead: BTreeMap::new(),
            hover: HoverCoordinator::new(),
            root: None,
        }
    }

    /// The policy the engine was built with.
    pub fn policy(&self) -> &MenuPolicy {
        &self.policy
    }

    /// Mount a panel. The root passes `parent: None`; submenu panels pass
    /// their parent panel and the trigger item inside it.
    pub fn mount_panel(&mut self, panel: P, parent: Option<(P, K)>) {
        if parent.is_none() {
            debug_assert!(self.root.is_none(), "a primitive has exactly one root panel");
            self.root = Some(panel);
        }
        self.panels.mount(panel, parent);
        self.registries.insert(panel, ItemRegistry::new());
    }

    /// Unmount a panel and its subtree, dropping registrations and pending
    /// deadlines synchronously.
    pub fn unmount_panel(&mut self, panel: P) -> Effects<P, K> {
        let open_before = self.panels.open_subtree(panel);
        let was_root_open = self.root == Some(panel) && self.panels.is_open(panel);
        let mut effects = Effects::new();
        for p in self.panels.unmount(panel) {
            self.hover.cancel(p);
            self.registries.remove(&p);
            self.typeahead.remove(&p);
            if open_before.contains(&p) {
                effects.push(Effect::ClosePanel(p));
            }
        }
        if self.root == Some(panel) {
            self.root = None;
            if self.policy.modal && was_root_open {
                effects.push(Effect::ReleaseExclusivity);
            }
        }
        effects
    }

    /// Register an item with its panel. Items in a nested submenu register
    /// with the submenu's panel, which keeps them out of the parent panel's
    /// navigable set.
    pub fn register_item(&mut self, panel: P, item: RegisteredItem<K>) {
        debug_assert!(
            self.registries.contains_key(&panel),
            "item registered with an unmounted panel"
        );
        if let Some(registry) = self.registries.get_mut(&panel) {
            registry.register(item);
        }
    }

    /// Unregister an item. Focus falls back to the tab stop on the next
    /// navigation; a stale focused id is treated as absent.
    pub fn unregister_item(&mut self, panel: P, id: K) {
        if let Some(registry) = self.registries.get_mut(&panel) {
            registry.unregister(id);
        }
        if self.panels.focused(panel) == Some(id) {
            self.panels.set_focused(panel, None);
        }
    }

    /// The root panel, once mounted.
    pub fn root(&self) -> Option<P> {
        self.root
    }

    /// Whether `panel` is open.
    pub fn is_open(&self, panel: P) -> bool {
        self.panels.is_open(panel)
    }

    /// The item holding roving focus in `panel`.
    pub fn focused(&self, panel: P) -> Option<K> {
        self.panels.focused(panel)
    }

    /// The single sequentially focusable item of `panel` (roving tabindex).
    pub fn tab_stop(&self, panel: P) -> Option<K> {
        let enabled = self.enabled_ids(panel);
        focus::tab_stop(self.panels.focused(panel), &enabled)
    }

    /// Earliest pending deadline across typeahead and hover intent.
    pub fn next_deadline(&self) -> Option<u64> {
        let typeahead = self
            .typeahead
            .values()
            .filter_map(TypeaheadBuffer::next_deadline)
            .min();
        match (typeahead, self.hover.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// A key press on the (closed or open) trigger element.
    pub fn on_trigger_key(&mut self, key: Key, modifiers: Modifiers, now: u64) -> Effects<P, K> {
        let Some(root) = self.root else {
            return Effects::new();
        };
        let is_open = self.panels.is_open(root);
        match action::resolve(key, modifiers, is_open, false, self.policy.direction) {
            MenuAction::Open => {
                let backward = key == Key::ArrowUp;
                self.open_panel(root, OpenReason::Keyboard { backward })
            }
            MenuAction::Typeahead(c) if !is_open && self.policy.trigger_typeahead => {
                // Closed-trigger typeahead (select): change the selection
                // without opening.
                let labels = match self.registries.get(&root) {
                    Some(registry) => registry.enabled_labels(),
                    None => Vec::new(),
                };
                let mut effects = Effects::new();
                let buffer = self
                    .typeahead
                    .entry(root)
                    .or_insert_with(TypeaheadBuffer::new);
                if let Some(matched) = buffer.on_character(c, now, &labels) {
                    effects.push(Effect::Select(root, matched));
                }
                self.push_wake(&mut effects);
                effects
            }
            _ => Effects::new(),
        }
    }

    /// A pointer click on the trigger: toggle the root panel.
    pub fn on_trigger_click(&mut self) -> Effects<P, K> {
        let Some(root) = self.root else {
            return Effects::new();
        };
        if self.panels.is_open(root) {
            // Focus stays on the trigger the user just clicked.
            self.close_tree(false)
        } else {
            self.open_panel(root, OpenReason::Pointer)
        }
    }

    /// Open a panel.
    ///
    /// Keyboard opens force focus onto an edge item; pointer opens focus the
    /// panel container only. Opening an already open panel is a no-op.
    pub fn open_panel(&mut self, panel: P, reason: OpenReason) -> Effects<P, K> {
        if self.panels.is_open(panel)
            || !self
                .panels
                .open(panel, matches!(reason, OpenReason::Keyboard { .. }))
        {
            return Effects::new();
        }
        let mut effects = Effects::new();
        effects.push(Effect::OpenPanel(panel));
        if self.policy.modal && self.root == Some(panel) {
            effects.push(Effect::EngageExclusivity);
        }
        match reason {
            OpenReason::Keyboard { backward } => {
                let enabled = self.enabled_ids(panel);
                let target = if backward {
                    enabled.last().copied()
                } else {
                    enabled.first().copied()
                };
                if let Some(item) = target {
                    self.panels.set_focused(panel, Some(item));
                    effects.push(Effect::FocusItem(panel, item));
                } else {
                    effects.push(Effect::FocusPanel(panel));
                }
            }
            OpenReason::Pointer => {
                effects.push(Effect::FocusPanel(panel));
            }
        }
        effects
    }

    /// Force roving focus onto a specific enabled item.
    ///
    /// Used by adapters that seed focus from external state, such as a
    /// select restoring its selected value on open. No-op for closed panels
    /// and disabled or unregistered items.
    pub fn focus_item(&mut self, panel: P, item: K) -> Effects<P, K> {
        if !self.panels.is_open(panel) {
            return Effects::new();
        }
        let enabled = self
            .registries
            .get(&panel)
            .and_then(|r| r.get(item))
            .is_some_and(|i| !i.disabled);
        if !enabled {
            return Effects::new();
        }
        self.panels.set_focused(panel, Some(item));
        let mut effects = Effects::new();
        effects.push(Effect::FocusItem(panel, item));
        effects
    }

    /// A key press inside an open panel.
    pub fn on_panel_key(
        &mut self,
        panel: P,
        key: Key,
        modifiers: Modifiers,
        now: u64,
    ) -> Effects<P, K> {
        if !self.panels.is_open(panel) {
            return Effects::new();
        }
        let is_nested = self.panels.parent(panel).is_some();
        match action::resolve(key, modifiers, true, is_nested, self.policy.direction) {
            MenuAction::Close => self.close_tree(true),
            MenuAction::FocusOut => {
                // Tab dismisses but lets focus continue sequentially, so no
                // focus effect is emitted.
                self.close_tree(false)
            }
            MenuAction::Select => match self.panels.focused(panel) {
                Some(item) => self.select_item(panel, item),
                None => Effects::new(),
            },
            action @ (MenuAction::Next
            | MenuAction::Prev
            | MenuAction::First
            | MenuAction::Last) => {
                let enabled = self.enabled_ids(panel);
                let next = focus::move_focus(
                    action,
                    self.panels.focused(panel),
                    &enabled,
                    self.policy.loop_focus,
                );
                let mut effects = Effects::new();
                if let Some(item) = next {
                    self.panels.set_focused(panel, Some(item));
                    effects.push(Effect::FocusItem(panel, item));
                }
                effects
            }
            MenuAction::OpenSubmenu => {
                let Some(item) = self.panels.focused(panel) else {
                    return Effects::new();
                };
                let is_trigger = self
                    .registries
                    .get(&panel)
                    .and_then(|r| r.get(item))
                    .is_some_and(|i| i.role == ItemRole::SubmenuTrigger);
                if !is_trigger {
                    return Effects::new();
                }
                match self.panels.child_for_trigger(panel, item) {
                    Some(child) => self.open_panel(child, OpenReason::Keyboard { backward: false }),
                    None => Effects::new(),
                }
            }
            MenuAction::CloseSubmenu => {
                let Some(parent) = self.panels.parent(panel) else {
                    return Effects::new();
                };
                let trigger = self.panels.trigger_item(panel);
                let mut effects = Effects::new();
                for closed in self.panels.close(panel) {
                    self.hover.cancel(closed);
                    self.typeahead.remove(&closed);
                    effects.push(Effect::ClosePanel(closed));
                }
                // Focus returns to the item that opened the submenu.
                if let Some(item) = trigger {
                    self.panels.set_focused(parent, Some(item));
                    effects.push(Effect::FocusItem(parent, item));
                }
                effects
            }
            MenuAction::Typeahead(c) => {
                let labels = match self.registries.get(&panel) {
                    Some(registry) => registry.enabled_labels(),
                    None => Vec::new(),
                };
                let matched = self
                    .typeahead
                    .entry(panel)
                    .or_insert_with(TypeaheadBuffer::new)
                    .on_character(c, now, &labels);
                let mut effects = Effects::new();
                if let Some(item) = matched {
                    self.panels.set_focused(panel, Some(item));
                    effects.push(Effect::FocusItem(panel, item));
                }
                self.push_wake(&mut effects);
                effects
            }
            MenuAction::Open | MenuAction::None => Effects::new(),
        }
    }

    /// An item was activated by pointer click or touch.
    pub fn on_item_select(&mut self, panel: P, item: K) -> Effects<P, K> {
        if !self.panels.is_open(panel) {
            return Effects::new();
        }
        let disabled = self
            .registries
            .get(&panel)
            .and_then(|r| r.get(item))
            .is_none_or(|i| i.disabled);
        if disabled {
            return Effects::new();
        }
        self.select_item(panel, item)
    }

    /// The pointer entered an item.
    ///
    /// Highlights the item, cancels any pending close on the panel chain,
    /// and arms a close on open sibling submenus so they retire once the
    /// pointer settles elsewhere.
    pub fn on_item_pointer_enter(&mut self, panel: P, item: K, now: u64) -> Effects<P, K> {
        if !self.panels.is_open(panel) {
            return Effects::new();
        }
        self.cancel_chain_closes(panel);
        let mut effects = Effects::new();
        let entry = self.registries.get(&panel).and_then(|r| r.get(item));
        if entry.is_some_and(|i| !i.disabled) {
            self.panels.set_focused(panel, Some(item));
            effects.push(Effect::FocusItem(panel, item));
        }
        let own_child = self.panels.child_for_trigger(panel, item);
        for child in self.panels.open_children(panel) {
            if Some(child) != own_child {
                self.hover.arm_close(child, now);
            }
        }
        self.push_wake(&mut effects);
        effects
    }

    /// The pointer entered a submenu trigger item: open its submenu.
    ///
    /// Pending closes along the ancestor chain are cancelled, open sibling
    /// submenus close immediately (only one submenu per level stays open),
    /// and the child opens as a pointer open, so focus stays where it is.
    pub fn on_submenu_trigger_enter(&mut self, panel: P, item: K) -> Effects<P, K> {
        if !self.panels.is_open(panel) {
            return Effects::new();
        }
        self.cancel_chain_closes(panel);
        let Some(child) = self.panels.child_for_trigger(panel, item) else {
            return Effects::new();
        };
        // A pending grace-period close belongs to the child, not to the
        // trigger's own panel; re-entering the trigger must defuse it.
        for pending in self.panels.open_subtree(child) {
            self.hover.cancel(pending);
        }
        let mut effects = Effects::new();
        for sibling in self.panels.open_children(panel) {
            if sibling != child {
                for closed in self.panels.close(sibling) {
                    self.hover.cancel(closed);
                    self.typeahead.remove(&closed);
                    effects.push(Effect::ClosePanel(closed));
                }
            }
        }
        self.panels.set_focused(panel, Some(item));
        effects.push(Effect::FocusItem(panel, item));
        if !self.panels.is_open(child) {
            effects.extend(self.open_panel(child, OpenReason::Pointer));
        }
        effects
    }

    /// The pointer left a panel's surface (or its trigger).
    ///
    /// Submenus arm their grace-period close; the root panel stays open for
    /// click-activated primitives and only participates under
    /// [`Activation::HoverChain`].
    pub fn on_pointer_leave(&mut self, panel: P, now: u64) -> Effects<P, K> {
        if !self.panels.is_open(panel) {
            return Effects::new();
        }
        let hover_managed = self.panels.parent(panel).is_some()
            || self.policy.activation == Activation::HoverChain;
        if !hover_managed {
            return Effects::new();
        }
        self.hover.arm_close(panel, now);
        let mut effects = Effects::new();
        self.push_wake(&mut effects);
        effects
    }

    /// Record the pointer position for the hover safe-region re-check.
    pub fn on_pointer_move(&mut self, position: Point) {
        self.hover.pointer_moved(position);
    }

    /// Host wake-up. Expires the typeahead window and fires due hover
    /// closes; `panel_rect` supplies current panel geometry for the
    /// safe-region re-check (`None` for unmeasured panels).
    pub fn on_timer(
        &mut self,
        now: u64,
        mut panel_rect: impl FnMut(&P) -> Option<Rect>,
    ) -> Effects<P, K> {
        for buffer in self.typeahead.values_mut() {
            buffer.on_timer(now);
        }
        let panels = &self.panels;
        let to_close = self.hover.fire_due(now, |p| {
            panels
                .open_subtree(*p)
                .into_iter()
                .filter_map(|q| panel_rect(&q))
                .collect()
        });
        let mut effects = Effects::new();
        for panel in to_close {
            if !self.panels.is_open(panel) {
                continue;
            }
            let closes_root = self.root == Some(panel);
            for closed in self.panels.close(panel) {
                self.hover.cancel(closed);
                self.typeahead.remove(&closed);
                effects.push(Effect::ClosePanel(closed));
            }
            if closes_root && self.policy.modal {
                effects.push(Effect::ReleaseExclusivity);
            }
        }
        self.push_wake(&mut effects);
        effects
    }

    /// A pointer-down landed outside every live subtree.
    ///
    /// `intercepted` is the host's interception callback verdict; a handled
    /// event leaves the tree open. Focus is not returned to the trigger:
    /// the outside interaction decides where focus goes next.
    pub fn on_outside_pointer_down(&mut self, intercepted: bool) -> Effects<P, K> {
        if intercepted {
            return Effects::new();
        }
        self.close_tree(false)
    }

    /// Activate `item`: emit the selection and close the tree unless the
    /// item's role keeps it open. Submenu triggers open their submenu
    /// instead of selecting.
    fn select_item(&mut self, panel: P, item: K) -> Effects<P, K> {
        let role = self
            .registries
            .get(&panel)
            .and_then(|r| r.get(item))
            .map(|i| i.role)
            .unwrap_or_default();
        if role == ItemRole::SubmenuTrigger {
            return match self.panels.child_for_trigger(panel, item) {
                Some(child) if !self.panels.is_open(child) => {
                    self.open_panel(child, OpenReason::Keyboard { backward: false })
                }
                _ => Effects::new(),
            };
        }
        let mut effects = Effects::new();
        effects.push(Effect::Select(panel, item));
        if !role.keeps_open() {
            effects.extend(self.close_tree(true));
        }
        effects
    }

    /// Close the whole tree from the root. `refocus_trigger` appends a
    /// [`Effect::FocusTrigger`] after the closes.
    fn close_tree(&mut self, refocus_trigger: bool) -> Effects<P, K> {
        let Some(root) = self.root else {
            return Effects::new();
        };
        if !self.panels.is_open(root) {
            return Effects::new();
        }
        let mut effects = Effects::new();
        for closed in self.panels.close(root) {
            self.hover.cancel(closed);
            effects.push(Effect::ClosePanel(closed));
        }
        self.typeahead.clear();
        if self.policy.modal {
            effects.push(Effect::ReleaseExclusivity);
        }
        if refocus_trigger {
            effects.push(Effect::FocusTrigger(root));
        }
        effects
    }

    /// Cancel pending hover closes on `panel` and every ancestor.
    fn cancel_chain_closes(&mut self, panel: P) {
        let mut current = Some(panel);
        while let Some(p) = current {
            self.hover.cancel(p);
            current = self.panels.parent(p);
        }
    }

    fn enabled_ids(&self, panel: P) -> Vec<K> {
        self.registries
            .get(&panel)
            .map(|r| r.enabled_ids())
            .unwrap_or_default()
    }

    /// Append a wake-up effect for the earliest pending deadline, if any.
    fn push_wake(&self, effects: &mut Effects<P, K>) {
        if let Some(deadline) = self.next_deadline() {
            effects.push(Effect::ScheduleWake(deadline));
        }
    }
}
