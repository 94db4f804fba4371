// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A select listbox with value plumbing and ARIA attribute derivation.
//!
//! This example shows:
//! - `bower_primitives::select` for the modal listbox with a value cell,
//! - the exclusivity effects a host maps to scroll lock + inert siblings,
//! - `bower_primitives::markup` deriving the trigger's combobox attributes.
//!
//! Run:
//! - `cargo run -p bower_demos --example select_value`

use bower_menu::action::{Key, Modifiers, TextDirection};
use bower_menu::dismiss::ExclusivityGuard;
use bower_menu::engine::Effect;
use bower_primitives::markup;
use bower_primitives::select::Select;

const LISTBOX: u32 = 1;

fn main() {
    let mut select: Select<u32, u32> = Select::new(TextDirection::Ltr);
    select.mount_listbox(LISTBOX);
    for (id, label, value, order) in [
        (10, "Latest version", "latest", 10),
        (11, "Long-term support", "lts", 20),
        (12, "Nightly", "nightly", 30),
    ] {
        select.register_option(LISTBOX, id, label, value, order, false);
    }

    // The host owns the document-wide exclusivity guard.
    let mut exclusivity = ExclusivityGuard::new();
    let mut handle = None;

    let now = 0;
    for (step, effects) in [
        (
            "open with Enter",
            select.on_trigger_key(Key::Enter, Modifiers::empty(), now),
        ),
        (
            "ArrowDown to the LTS option",
            select.on_listbox_key(Key::ArrowDown, Modifiers::empty(), now),
        ),
        (
            "Enter commits the selection",
            select.on_listbox_key(Key::Enter, Modifiers::empty(), now),
        ),
    ] {
        println!("\n== {step} ==");
        for effect in &effects {
            println!("  {effect:?}");
            match effect {
                Effect::EngageExclusivity => {
                    let (h, transition) = exclusivity.acquire();
                    handle = Some(h);
                    println!("    -> scroll lock: {transition:?}");
                }
                Effect::ReleaseExclusivity => {
                    if let Some(h) = handle.take() {
                        println!("    -> scroll lock: {:?}", exclusivity.release(h));
                    }
                }
                _ => {}
            }
        }
    }

    println!("\nselected value: {:?}", select.value_str());

    // Re-opening highlights the stored value, which the trigger reports
    // through aria-activedescendant.
    let _ = select.on_trigger_key(Key::Enter, Modifiers::empty(), now);
    let active = select
        .active_descendant()
        .map(|id| format!("opt-{id}"));
    let attrs = markup::select_trigger_attrs(true, false, "listbox-1", active.as_deref());
    println!("\ntrigger attributes after re-open:");
    for (name, value) in &attrs {
        println!("  {name}={value:?}");
    }
}
