// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendered-state attribute and ARIA contract.
//!
//! Pure functions from primitive state to the machine-readable attributes a
//! host writes onto its elements: `data-state` and friends for styling
//! hooks, and the ARIA pairings that make the primitives accessible. All
//! values are stable strings; identical state always derives identical
//! attributes.
//!
//! Attribute sets come back as ordered `(name, value)` pairs. Boolean
//! presence-only attributes (`data-disabled`) use an empty value and are
//! simply absent when they do not apply.

use alloc::string::{String, ToString};
use smallvec::SmallVec;

use bower_position::Side;

/// An ordered attribute list for one element.
pub type Attrs = SmallVec<[(&'static str, String); 8]>;

/// ARIA role of a primitive part.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    /// The menubar row container.
    Menubar,
    /// A menu or submenu panel.
    Menu,
    /// A plain action item.
    MenuItem,
    /// A checkbox item.
    MenuItemCheckbox,
    /// A radio-group item.
    MenuItemRadio,
    /// A select's listbox panel.
    Listbox,
    /// An option inside a listbox.
    ListboxOption,
}

impl Role {
    /// The ARIA role string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Menubar => "menubar",
            Self::Menu => "menu",
            Self::MenuItem => "menuitem",
            Self::MenuItemCheckbox => "menuitemcheckbox",
            Self::MenuItemRadio => "menuitemradio",
            Self::Listbox => "listbox",
            Self::ListboxOption => "option",
        }
    }

    /// The `aria-haspopup` token for a trigger opening this panel role.
    const fn popup_token(self) -> &'static str {
        match self {
            Self::Listbox => "listbox",
            _ => "menu",
        }
    }
}

/// `data-state` for an openable part.
pub const fn data_state(open: bool) -> &'static str {
    if open { "open" } else { "closed" }
}

/// `data-state` for a checkable item.
pub const fn data_checked_state(checked: bool) -> &'static str {
    if checked { "checked" } else { "unchecked" }
}

/// `data-orientation` for a container.
pub const fn data_orientation(horizontal: bool) -> &'static str {
    if horizontal { "horizontal" } else { "vertical" }
}

/// `data-side` for a positioned panel.
pub const fn data_side(side: Side) -> &'static str {
    side.as_str()
}

/// Attributes of a menu/select trigger element.
///
/// `panel_role` is the role of the panel this trigger opens and `panel_id`
/// its element id; `aria-controls` is present only while open.
pub fn trigger_attrs(open: bool, disabled: bool, panel_role: Role, panel_id: &str) -> Attrs {
    let mut attrs = Attrs::new();
    attrs.push(("aria-haspopup", panel_role.popup_token().to_string()));
    attrs.push(("aria-expanded", bool_str(open).to_string()));
    if open {
        attrs.push(("aria-controls", panel_id.to_string()));
    }
    attrs.push(("data-state", data_state(open).to_string()));
    if disabled {
        attrs.push(("data-disabled", String::new()));
    }
    attrs
}

/// Attributes of an open panel element. `side` is the resolved placement
/// side, absent while the panel is not yet positioned.
pub fn panel_attrs(role: Role, open: bool, side: Option<Side>) -> Attrs {
    let mut attrs = Attrs::new();
    attrs.push(("role", role.as_str().to_string()));
    attrs.push(("data-state", data_state(open).to_string()));
    if let Some(side) = side {
        attrs.push(("data-side", data_side(side).to_string()));
    }
    attrs
}

/// Attributes of a menu item or listbox option.
///
/// `checked` applies to checkbox/radio roles and listbox options
/// (`aria-checked`/`aria-selected` respectively); `tab_stop` is whether
/// this item currently holds the panel's roving tabindex; `highlighted` is
/// whether it holds roving focus.
pub fn item_attrs(
    role: Role,
    disabled: bool,
    checked: Option<bool>,
    tab_stop: bool,
    highlighted: bool,
) -> Attrs {
    let mut attrs = Attrs::new();
    attrs.push(("role", role.as_str().to_string()));
    attrs.push(("tabindex", if tab_stop { "0" } else { "-1" }.to_string()));
    if let Some(checked) = checked {
        let name = match role {
            Role::ListboxOption => "aria-selected",
            _ => "aria-checked",
        };
        attrs.push((name, bool_str(checked).to_string()));
        attrs.push(("data-state", data_checked_state(checked).to_string()));
    }
    if disabled {
        attrs.push(("aria-disabled", "true".to_string()));
        attrs.push(("data-disabled", String::new()));
    }
    if highlighted {
        attrs.push(("data-highlighted", String::new()));
    }
    attrs
}

/// Attributes of a select trigger, which follows the combobox pattern and
/// reports the focused option through `aria-activedescendant`.
pub fn select_trigger_attrs(
    open: bool,
    disabled: bool,
    listbox_id: &str,
    active_descendant: Option<&str>,
) -> Attrs {
    let mut attrs = Attrs::new();
    attrs.push(("role", "combobox".to_string()));
    attrs.push(("aria-haspopup", "listbox".to_string()));
    attrs.push(("aria-expanded", bool_str(open).to_string()));
    if open {
        attrs.push(("aria-controls", listbox_id.to_string()));
        if let Some(id) = active_descendant {
            attrs.push(("aria-activedescendant", id.to_string()));
        }
    }
    attrs.push(("data-state", data_state(open).to_string()));
    if disabled {
        attrs.push(("data-disabled", String::new()));
    }
    attrs
}

const fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
