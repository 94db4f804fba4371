// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-primitive tree of panel states.
//!
//! A primitive owns one root panel; each submenu adds a child panel whose
//! trigger is an item in its parent. The tree enforces the two structural
//! invariants of nested floating panels:
//!
//! - a child can only be open while its parent is open, and
//! - closing a panel cascades through all open descendants, children before
//!   parents.
//!
//! Panels are identified by an opaque `P`; the item in the parent panel that
//! triggers a submenu is recorded at mount time so keyboard close can return
//! focus to it.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// Mutable interaction state of one panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelState<K> {
    /// Whether the panel is open.
    pub open: bool,
    /// Whether the current open was initiated by keyboard (drives whether
    /// focus is forced onto an item on open).
    pub opened_via_keyboard: bool,
    /// The item currently holding roving focus, if any.
    pub focused_item: Option<K>,
}

// Manual impl: a derived `Default` would demand `K: Default`, but a closed
// panel has no focused item regardless of the id type.
impl<K> Default for PanelState<K> {
    fn default() -> Self {
        Self {
            open: false,
            opened_via_keyboard: false,
            focused_item: None,
        }
    }
}

#[derive(Clone, Debug)]
struct PanelNode<P, K> {
    parent: Option<P>,
    /// The item in `parent` that opens this panel (submenus only).
    trigger_item: Option<K>,
    state: PanelState<K>,
}

/// Tree of panels for one primitive instance.
#[derive(Clone, Debug, Default)]
pub struct PanelTree<P, K> {
    nodes: BTreeMap<P, PanelNode<P, K>>,
}

impl<P: Copy + Ord, K: Copy + Eq> PanelTree<P, K> {
    /// Create an empty tree.
    pub const fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
        }
    }

    /// Mount a panel. The root panel passes `parent: None`; submenu panels
    /// pass their parent panel and the trigger item inside it.
    ///
    /// Mounting under an unmounted parent is a structural integration
    /// mistake (debug-asserted); the panel is still mounted so the tree
    /// stays usable during development.
    pub fn mount(&mut self, panel: P, parent: Option<(P, K)>) {
        if let Some((parent_panel, _)) = parent {
            debug_assert!(
                self.nodes.contains_key(&parent_panel),
                "submenu panel mounted under an unmounted parent"
            );
        }
        self.nodes.insert(
            panel,
            PanelNode {
                parent: parent.map(|(p, _)| p),
                trigger_item: parent.map(|(_, k)| k),
                state: PanelState::default(),
            },
        );
    }

    /// Unmount a panel and its entire subtree.
    ///
    /// Returns the unmounted panels (children before parents) so the owner
    /// can drop their timers and registrations synchronously.
    pub fn unmount(&mut self, panel: P) -> Vec<P> {
        let mut removed = self.subtree(panel);
        removed.reverse();
        for p in &removed {
            self.nodes.remove(p);
        }
        removed
    }

    /// Whether `panel` is mounted.
    pub fn is_mounted(&self, panel: P) -> bool {
        self.nodes.contains_key(&panel)
    }

    /// Whether `panel` is mounted and open.
    pub fn is_open(&self, panel: P) -> bool {
        self.nodes.get(&panel).is_some_and(|n| n.state.open)
    }

    /// The panel's parent, if it is a submenu.
    pub fn parent(&self, panel: P) -> Option<P> {
        self.nodes.get(&panel).and_then(|n| n.parent)
    }

    /// The item in the parent panel that triggers this submenu.
    pub fn trigger_item(&self, panel: P) -> Option<K> {
        self.nodes.get(&panel).and_then(|n| n.trigger_item)
    }

    /// The root ancestor of `panel` (itself when it is the root).
    pub fn root_of(&self, panel: P) -> P {
        let mut current = panel;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// The mounted submenu panel triggered by `item` inside `parent`.
    pub fn child_for_trigger(&self, parent: P, item: K) -> Option<P> {
        self.nodes
            .iter()
            .find(|(_, n)| n.parent == Some(parent) && n.trigger_item == Some(item))
            .map(|(&p, _)| p)
    }

    /// Mounted children of `panel`.
    pub fn children(&self, panel: P) -> Vec<P> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.parent == Some(panel))
            .map(|(&p, _)| p)
            .collect()
    }

    /// Open children of `panel`.
    pub fn open_children(&self, panel: P) -> Vec<P> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.parent == Some(panel) && n.state.open)
            .map(|(&p, _)| p)
            .collect()
    }

    /// Open `panel`.
    ///
    /// A submenu can only open while its parent is open (debug-asserted).
    /// Returns false for an unmounted panel.
    pub fn open(&mut self, panel: P, via_keyboard: bool) -> bool {
        if let Some(parent) = self.parent(panel) {
            debug_assert!(self.is_open(parent), "submenu opened under a closed parent");
        }
        let Some(node) = self.nodes.get_mut(&panel) else {
            return false;
        };
        node.state.open = true;
        node.state.opened_via_keyboard = via_keyboard;
        true
    }

    /// Close `panel`, cascading through all open descendants.
    ///
    /// Returns the panels that were actually open, children before parents,
    /// with `panel` last. Focus and keyboard-origin state reset on close.
    pub fn close(&mut self, panel: P) -> Vec<P> {
        let mut closed: Vec<P> = self
            .subtree(panel)
            .into_iter()
            .filter(|&p| self.is_open(p))
            .collect();
        closed.reverse();
        for p in &closed {
            if let Some(node) = self.nodes.get_mut(p) {
                node.state = PanelState::default();
            }
        }
        closed
    }

    /// The panel's interaction state.
    pub fn state(&self, panel: P) -> Option<&PanelState<K>> {
        self.nodes.get(&panel).map(|n| &n.state)
    }

    /// Set the roving focus within an open panel.
    pub fn set_focused(&mut self, panel: P, item: Option<K>) {
        if let Some(node) = self.nodes.get_mut(&panel) {
            node.state.focused_item = item;
        }
    }

    /// The item holding roving focus in `panel`.
    pub fn focused(&self, panel: P) -> Option<K> {
        self.nodes.get(&panel).and_then(|n| n.state.focused_item)
    }

    /// `panel` plus all mounted descendants, parents before children.
    pub fn subtree(&self, panel: P) -> Vec<P> {
        if !self.nodes.contains_key(&panel) {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut stack = Vec::new();
        stack.push(panel);
        while let Some(current) = stack.pop() {
            out.push(current);
            // BTreeMap iteration keeps sibling order deterministic.
            for child in self.children(current).into_iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Open panels in `panel`'s subtree, parents before children.
    pub fn open_subtree(&self, panel: P) -> Vec<P> {
        self.subtree(panel)
            .into_iter()
            .filter(|&p| self.is_open(p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// Root 1 with children 2 and 3; 2 has child 4.
    fn sample() -> PanelTree<u32, u32> {
        let mut tree = PanelTree::new();
        tree.mount(1, None);
        tree.mount(2, Some((1, 20)));
        tree.mount(3, Some((1, 30)));
        tree.mount(4, Some((2, 40)));
        tree
    }

    #[test]
    fn open_and_close_single_panel() {
        let mut tree = sample();
        assert!(tree.open(1, true));
        assert!(tree.is_open(1));
        assert!(tree.state(1).unwrap().opened_via_keyboard);
        assert_eq!(tree.close(1), vec![1]);
        assert!(!tree.is_open(1));
    }

    #[test]
    fn closing_a_parent_cascades_children_first() {
        let mut tree = sample();
        tree.open(1, false);
        tree.open(2, false);
        tree.open(4, false);
        let closed = tree.close(1);
        assert_eq!(closed, vec![4, 2, 1]);
        for p in [1, 2, 4] {
            assert!(!tree.is_open(p));
            assert_eq!(tree.focused(p), None);
        }
    }

    #[test]
    fn closing_a_submenu_leaves_ancestors_open() {
        let mut tree = sample();
        tree.open(1, true);
        tree.open(2, true);
        tree.open(4, true);
        assert_eq!(tree.close(2), vec![4, 2]);
        assert!(tree.is_open(1));
    }

    #[test]
    fn close_resets_focus_state() {
        let mut tree = sample();
        tree.open(1, true);
        tree.set_focused(1, Some(20));
        assert_eq!(tree.focused(1), Some(20));
        tree.close(1);
        assert_eq!(tree.focused(1), None);
    }

    #[test]
    fn trigger_item_links_child_to_parent() {
        let tree = sample();
        assert_eq!(tree.trigger_item(2), Some(20));
        assert_eq!(tree.trigger_item(1), None);
        assert_eq!(tree.child_for_trigger(1, 30), Some(3));
        assert_eq!(tree.child_for_trigger(1, 99), None);
        assert_eq!(tree.parent(4), Some(2));
        assert_eq!(tree.root_of(4), 1);
    }

    #[test]
    fn unmount_removes_the_whole_subtree() {
        let mut tree = sample();
        let removed = tree.unmount(2);
        assert_eq!(removed, vec![4, 2]);
        assert!(!tree.is_mounted(2));
        assert!(!tree.is_mounted(4));
        assert!(tree.is_mounted(1));
        assert!(tree.is_mounted(3));
    }

    #[test]
    fn open_children_reports_only_open_siblings() {
        let mut tree = sample();
        tree.open(1, false);
        tree.open(2, false);
        assert_eq!(tree.open_children(1), vec![2]);
        tree.close(2);
        tree.open(3, false);
        assert_eq!(tree.open_children(1), vec![3]);
    }

    #[test]
    fn item_ids_without_default_still_get_fresh_state() {
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        struct ItemId(u32);

        let mut tree: PanelTree<u32, ItemId> = PanelTree::new();
        tree.mount(1, None);
        tree.open(1, true);
        tree.set_focused(1, Some(ItemId(7)));
        assert_eq!(tree.close(1), vec![1]);
        assert_eq!(tree.focused(1), None);
    }

    #[test]
    fn closing_an_already_closed_panel_is_a_no_op() {
        let mut tree = sample();
        assert!(tree.close(1).is_empty());
        assert!(tree.close(99).is_empty());
    }
}
