// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context menu: context-click activation at the pointer position.
//!
//! The anchor is the pointer coordinate of the triggering click rather than
//! an element rectangle, so the panel's placement resolves against a
//! zero-size [`Anchor::Point`]. A context click while the menu is already
//! open re-anchors it to the new position instead of toggling it closed.

use kurbo::{Point, Rect, Size};

use bower_menu::action::TextDirection;
use bower_menu::engine::{Activation, Effects, MenuEngine, MenuPolicy, OpenReason};
use bower_position::{Anchor, Placement, PlacementOptions, resolve};

use crate::submenu_side;

/// The context-menu policy preset for a layout direction.
pub fn policy(direction: TextDirection) -> MenuPolicy {
    MenuPolicy {
        activation: Activation::ContextClick,
        submenu_side: submenu_side(direction),
        modal: false,
        loop_focus: false,
        direction,
        trigger_typeahead: false,
    }
}

/// Placement options for a context-menu panel: below and to the trailing
/// side of the pointer, flipping on collision.
pub fn placement_options() -> PlacementOptions {
    PlacementOptions::default()
}

/// A context menu primitive.
#[derive(Clone, Debug)]
pub struct ContextMenu<P, K> {
    engine: MenuEngine<P, K>,
    anchor: Option<Point>,
    disabled: bool,
}

impl<P: Copy + Ord, K: Copy + Eq> ContextMenu<P, K> {
    /// Create a context menu for a layout direction.
    pub fn new(direction: TextDirection) -> Self {
        Self {
            engine: MenuEngine::new(policy(direction)),
            anchor: None,
            disabled: false,
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

    /// Set whether the context area is disabled.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// A context click inside the primitive's area.
    ///
    /// Opens the menu at `position`, or re-anchors an already open menu to
    /// the new position. Ignored while disabled.
    pub fn on_context_click(&mut self, position: Point) -> Effects<P, K> {
        if self.disabled {
            return Effects::new();
        }
        let Some(root) = self.engine.root() else {
            return Effects::new();
        };
        self.anchor = Some(position);
        if self.engine.is_open(root) {
            // Re-anchor only; the host re-resolves placement on layout.
            return Effects::new();
        }
        self.engine.open_panel(root, OpenReason::Pointer)
    }

    /// The pointer anchor of the current (or last) open.
    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor.map(Anchor::Point)
    }

    /// Resolve the root panel's placement for the current anchor.
    pub fn placement(&self, panel_size: Size, boundary: Rect) -> Option<Placement> {
        let anchor = self.anchor()?;
        Some(resolve(anchor, panel_size, boundary, &placement_options()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bower_menu::engine::Effect;

    fn menu() -> ContextMenu<u32, u32> {
        let mut menu = ContextMenu::new(TextDirection::Ltr);
        menu.engine_mut().mount_panel(1, None);
        menu
    }

    #[test]
    fn context_click_opens_at_the_pointer() {
        let mut menu = menu();
        let effects = menu.on_context_click(Point::new(40.0, 60.0));
        assert_eq!(
            effects.as_slice(),
            [Effect::OpenPanel(1), Effect::FocusPanel(1)]
        );
        assert_eq!(menu.anchor(), Some(Anchor::Point(Point::new(40.0, 60.0))));
    }

    #[test]
    fn second_context_click_re_anchors_without_toggling() {
        let mut menu = menu();
        menu.on_context_click(Point::new(40.0, 60.0));
        let effects = menu.on_context_click(Point::new(200.0, 10.0));
        assert!(effects.is_empty());
        assert!(menu.engine().is_open(1));
        assert_eq!(menu.anchor(), Some(Anchor::Point(Point::new(200.0, 10.0))));
    }

    #[test]
    fn placement_resolves_below_the_pointer_when_room_allows() {
        let mut menu = menu();
        menu.on_context_click(Point::new(40.0, 60.0));
        let placement = menu
            .placement(Size::new(100.0, 150.0), Rect::new(0.0, 0.0, 800.0, 600.0))
            .unwrap();
        assert!(placement.is_positioned);
        assert_eq!(placement.origin, Point::new(40.0, 60.0));
    }

    #[test]
    fn disabled_area_ignores_context_clicks() {
        let mut menu = menu();
        menu.set_disabled(true);
        assert!(menu.on_context_click(Point::new(1.0, 1.0)).is_empty());
        assert!(!menu.engine().is_open(1));
    }
}
