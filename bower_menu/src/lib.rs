// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bower Menu: the floating menu engine shared by the menu-family primitives.
//!
//! Dropdown menus, context menus, menubars, and select listboxes all share the
//! same hard interaction core: an open/close lifecycle, roving keyboard
//! navigation over a dynamically registered item set (including nested
//! submenus), typeahead with a debounce window, pointer hover intent with a
//! cancellation grace period, and outside-interaction dismissal. This crate
//! implements that core once; primitive adapters differ only in a small
//! [`MenuPolicy`](engine::MenuPolicy).
//!
//! ## Collaborators
//!
//! - [`action`]: the pure key → [`MenuAction`](action::MenuAction) table,
//!   identical for every menu-family primitive.
//! - [`focus`]: roving-tabindex movement over the enabled item sequence.
//! - [`registry`]: the per-panel ordered item set.
//! - [`typeahead`]: printable-character matching with a 500 ms window.
//! - [`hover`]: delayed submenu closing with a safe-region re-check.
//! - [`dismiss`]: outside-interaction detection and the reference-counted
//!   exclusivity (scroll-lock/inert) guard for modal panels.
//! - [`panel`]: the per-primitive tree of panel states with cascading close.
//! - [`engine`]: the façade wiring all of the above into the observable
//!   behavior, parameterized per primitive.
//!
//! ## Host contract
//!
//! The engine is platform-free. Hosts feed it platform input events plus a
//! millisecond timestamp, and it returns an ordered
//! [`Effect`](engine::Effect) sequence — focus moves, panel opens/closes,
//! selections, wake-up deadlines — which the host applies to its document
//! *after* the engine's state has settled. "Timers" are deadlines the host
//! schedules; components with a pending deadline expose it and are re-entered
//! through their timer entry points. Closing or unmounting a panel drops its
//! deadlines synchronously.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod action;
pub mod dismiss;
pub mod engine;
pub mod focus;
pub mod hover;
pub mod panel;
pub mod registry;
pub mod typeahead;
