// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-panel ordered item set.
//!
//! Items register when they mount inside an open panel and unregister when
//! they unmount. The registry keeps them sorted by a host-supplied `order`
//! key that must be consistent with document/render order, so First/Last and
//! Next/Prev navigate visually. Nested submenu items register with their own
//! panel's registry, never the parent's — which is what keeps them out of
//! the parent's navigable set while their submenu is open.

use alloc::string::String;
use alloc::vec::Vec;

/// How an item participates in selection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ItemRole {
    /// A plain action item; selecting it closes the panel tree.
    #[default]
    Action,
    /// A checkbox item; selecting it toggles without closing.
    Checkbox,
    /// A radio-group item; selecting it switches without closing.
    Radio,
    /// An item that opens a nested submenu instead of selecting.
    SubmenuTrigger,
}

impl ItemRole {
    /// Whether selecting this item keeps the panel tree open.
    pub const fn keeps_open(self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }
}

/// An interactive item registered with a panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisteredItem<K> {
    /// Opaque item identifier, unique within the panel.
    pub id: K,
    /// Display text used for typeahead matching.
    pub text: String,
    /// Disabled items stay registered but are skipped by navigation.
    pub disabled: bool,
    /// Document-order key supplied by the host.
    pub order: u32,
    /// Selection behavior of the item.
    pub role: ItemRole,
}

/// The dynamically mounted item set of one panel, in document order.
#[derive(Clone, Debug, Default)]
pub struct ItemRegistry<K> {
    // Sorted by `order`; ties keep registration order.
    items: Vec<RegisteredItem<K>>,
}

impl<K: Copy + Eq> ItemRegistry<K> {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Register an item, or update it in place when the id is already known.
    ///
    /// Re-registration updates `text`, `disabled`, and `role` (these change
    /// across renders) but keeps the item's original `order`, so focus
    /// positions stay stable.
    pub fn register(&mut self, item: RegisteredItem<K>) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.text = item.text;
            existing.disabled = item.disabled;
            existing.role = item.role;
            return;
        }
        // Insert after any existing item with the same or smaller order.
        let at = self.items.partition_point(|i| i.order <= item.order);
        self.items.insert(at, item);
    }

    /// Remove an item. Unregistering an unknown id is a no-op.
    pub fn unregister(&mut self, id: K) {
        self.items.retain(|i| i.id != id);
    }

    /// All items in document order.
    pub fn items(&self) -> &[RegisteredItem<K>] {
        &self.items
    }

    /// Ids of the enabled items, in document order.
    pub fn enabled_ids(&self) -> Vec<K> {
        self.items
            .iter()
            .filter(|i| !i.disabled)
            .map(|i| i.id)
            .collect()
    }

    /// `(id, text)` pairs of the enabled items, for typeahead matching.
    pub fn enabled_labels(&self) -> Vec<(K, &str)> {
        self.items
            .iter()
            .filter(|i| !i.disabled)
            .map(|i| (i.id, i.text.as_str()))
            .collect()
    }

    /// Look up a registered item.
    pub fn get(&self, id: K) -> Option<&RegisteredItem<K>> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Whether the registry currently holds `id`.
    pub fn contains(&self, id: K) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn item(id: u32, text: &str, order: u32) -> RegisteredItem<u32> {
        RegisteredItem {
            id,
            text: text.to_string(),
            disabled: false,
            order,
            role: ItemRole::Action,
        }
    }

    #[test]
    fn items_stay_sorted_by_order() {
        let mut reg = ItemRegistry::new();
        reg.register(item(3, "c", 30));
        reg.register(item(1, "a", 10));
        reg.register(item(2, "b", 20));
        let ids: Vec<u32> = reg.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn interleaved_register_unregister_never_leaves_stale_ids() {
        let mut reg = ItemRegistry::new();
        reg.register(item(1, "a", 10));
        reg.register(item(2, "b", 20));
        reg.unregister(1);
        reg.register(item(3, "c", 5));
        reg.unregister(9); // unknown id: no-op
        let ids: Vec<u32> = reg.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, [3, 2]);
        assert!(!reg.contains(1));
    }

    #[test]
    fn reregistration_updates_in_place_and_keeps_order() {
        let mut reg = ItemRegistry::new();
        reg.register(item(1, "a", 10));
        reg.register(item(2, "b", 20));
        // Re-render: same id, new text and disabled flag, different order key.
        reg.register(RegisteredItem {
            id: 1,
            text: "a-renamed".to_string(),
            disabled: true,
            order: 99,
            role: ItemRole::Checkbox,
        });
        let ids: Vec<u32> = reg.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, [1, 2], "order key is kept from first registration");
        let updated = reg.get(1).unwrap();
        assert_eq!(updated.text, "a-renamed");
        assert!(updated.disabled);
        assert_eq!(updated.role, ItemRole::Checkbox);
    }

    #[test]
    fn enabled_views_skip_disabled_items() {
        let mut reg = ItemRegistry::new();
        reg.register(item(1, "a", 10));
        reg.register(RegisteredItem {
            disabled: true,
            ..item(2, "b", 20)
        });
        reg.register(item(3, "c", 30));
        assert_eq!(reg.enabled_ids(), [1, 3]);
        let labels = reg.enabled_labels();
        assert_eq!(labels, [(1, "a"), (3, "c")]);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn equal_orders_keep_registration_order() {
        let mut reg = ItemRegistry::new();
        reg.register(item(1, "a", 10));
        reg.register(item(2, "b", 10));
        reg.register(item(3, "c", 10));
        let ids: Vec<u32> = reg.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }
}
