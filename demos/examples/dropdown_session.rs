// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A keyboard-driven dropdown session, printed step by step.
//!
//! This example shows how a host drives the menu engine:
//! - `bower_primitives::dropdown` for the policy preset and trigger gate,
//! - `bower_position` for placing the panel under the trigger,
//! - the `Effect` sequences the host would apply to its document.
//!
//! Run:
//! - `cargo run -p bower_demos --example dropdown_session`

use kurbo::{Rect, Size};

use bower_menu::action::{Key, Modifiers, TextDirection};
use bower_menu::engine::Effects;
use bower_menu::registry::{ItemRole, RegisteredItem};
use bower_position::{Anchor, PlacementOptions, resolve};
use bower_primitives::dropdown::DropdownMenu;

const PANEL: u32 = 1;

fn apply(step: &str, effects: &Effects<u32, u32>) {
    println!("\n== {step} ==");
    if effects.is_empty() {
        println!("  (no effects)");
    }
    for effect in effects {
        println!("  {effect:?}");
    }
}

fn main() {
    let mut menu: DropdownMenu<u32, u32> = DropdownMenu::new(TextDirection::Ltr);
    menu.engine_mut().mount_panel(PANEL, None);
    for (id, text, order, disabled) in [
        (10, "New File", 10, false),
        (11, "Open…", 20, false),
        (12, "Save", 30, true),
        (13, "Quit", 40, false),
    ] {
        menu.engine_mut().register_item(
            PANEL,
            RegisteredItem {
                id,
                text: text.into(),
                disabled,
                order,
                role: ItemRole::Action,
            },
        );
    }

    // Place the panel under a measured trigger rect within the viewport.
    let trigger = Rect::new(500.0, 20.0, 620.0, 52.0);
    let placement = resolve(
        Anchor::Rect(trigger),
        Size::new(220.0, 160.0),
        Rect::new(0.0, 0.0, 800.0, 600.0),
        &PlacementOptions::default(),
    );
    println!(
        "panel placed at {:?} on side {:?}",
        placement.origin, placement.resolved_side
    );

    let now = 0;
    apply(
        "Enter on the trigger",
        &menu.on_trigger_key(Key::Enter, Modifiers::empty(), now),
    );
    apply(
        "ArrowDown",
        &menu
            .engine_mut()
            .on_panel_key(PANEL, Key::ArrowDown, Modifiers::empty(), now),
    );
    // "Save" is disabled, so focus skips from "Open…" to "Quit".
    apply(
        "ArrowDown again (skips the disabled item)",
        &menu
            .engine_mut()
            .on_panel_key(PANEL, Key::ArrowDown, Modifiers::empty(), now),
    );
    apply(
        "typeahead: press `n`",
        &menu
            .engine_mut()
            .on_panel_key(PANEL, Key::Character('n'), Modifiers::empty(), now),
    );
    apply(
        "Enter selects the focused item and closes",
        &menu
            .engine_mut()
            .on_panel_key(PANEL, Key::Enter, Modifiers::empty(), now),
    );
}
