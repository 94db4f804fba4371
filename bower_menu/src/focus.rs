// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roving focus movement over the enabled item sequence.
//!
//! The router is pure: it returns only the id of the item that should be
//! focused next. The caller issues the platform focus call and scrolls the
//! target into view, which keeps this logic independently testable.
//!
//! The roving-tabindex invariant is realized by [`tab_stop`]: at most one
//! item in a panel is sequentially focusable at a time — the focused item if
//! there is one, otherwise the first enabled item.

use crate::action::MenuAction;

/// Compute the item that should receive focus after `action`.
///
/// `enabled` is the panel's enabled item sequence in document order.
/// [`MenuAction::Next`]/[`MenuAction::Prev`] step by one; at a boundary they
/// wrap to the opposite end when `wrap` is set, otherwise they clamp (stay).
/// [`MenuAction::First`]/[`MenuAction::Last`] jump to the ends. Actions that
/// do not move focus return `current` unchanged. With no current focus,
/// forward movement starts at the first enabled item and backward movement at
/// the last.
pub fn move_focus<K: Copy + Eq>(
    action: MenuAction,
    current: Option<K>,
    enabled: &[K],
    wrap: bool,
) -> Option<K> {
    if enabled.is_empty() {
        return current;
    }
    let position = current.and_then(|c| enabled.iter().position(|&k| k == c));
    match action {
        MenuAction::Next => match position {
            Some(pos) if pos + 1 < enabled.len() => Some(enabled[pos + 1]),
            Some(pos) => {
                if wrap {
                    Some(enabled[0])
                } else {
                    Some(enabled[pos])
                }
            }
            None => Some(enabled[0]),
        },
        MenuAction::Prev => match position {
            Some(pos) if pos > 0 => Some(enabled[pos - 1]),
            Some(pos) => {
                if wrap {
                    Some(enabled[enabled.len() - 1])
                } else {
                    Some(enabled[pos])
                }
            }
            None => Some(enabled[enabled.len() - 1]),
        },
        MenuAction::First => Some(enabled[0]),
        MenuAction::Last => Some(enabled[enabled.len() - 1]),
        _ => current,
    }
}

/// The single item holding the panel's sequential tab stop.
///
/// Returns the focused item when it is still enabled, else the first enabled
/// item, else `None` (an all-disabled panel has no tab stop).
pub fn tab_stop<K: Copy + Eq>(current: Option<K>, enabled: &[K]) -> Option<K> {
    current
        .filter(|c| enabled.contains(c))
        .or_else(|| enabled.first().copied())
}
