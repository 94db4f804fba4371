// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Submenu hover intent: delayed closing with a safe-region re-check.
//!
//! Moving the pointer from a submenu trigger into its panel usually crosses
//! a gap (and often cuts diagonally across a sibling item). Closing the
//! moment the pointer leaves the trigger would make submenus unusable, so
//! the coordinator arms a short close timer instead and, when the timer
//! fires, re-checks the pointer against the panel's rectangle and every open
//! descendant panel's rectangle. If the pointer made it into any of those
//! safe regions, the close is cancelled.
//!
//! Like the rest of the engine the coordinator owns no timer: it records
//! deadlines in host-supplied millisecond timestamps, exposes the earliest
//! via [`HoverCoordinator::next_deadline`], and is re-entered through
//! [`HoverCoordinator::fire_due`]. Re-arming a panel's deadline replaces the
//! previous one, and at most one close deadline exists per panel. Keyboard
//! open/close bypasses the coordinator entirely.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use kurbo::{Point, Rect};

/// Grace period between the pointer leaving a trigger/panel and the close.
pub const HOVER_CLOSE_DELAY_MS: u64 = 100;

/// Per-primitive coordinator of pending submenu closes.
#[derive(Clone, Debug)]
pub struct HoverCoordinator<P> {
    /// Pending close deadline per panel.
    pending: BTreeMap<P, u64>,
    /// Last observed pointer position, for the safe-region re-check.
    pointer: Option<Point>,
    close_delay: u64,
}

impl<P: Copy + Ord> HoverCoordinator<P> {
    /// Create a coordinator with the default 100 ms close delay.
    pub const fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
            pointer: None,
            close_delay: HOVER_CLOSE_DELAY_MS,
        }
    }

    /// Create a coordinator with a custom close delay.
    pub const fn with_delay(close_delay: u64) -> Self {
        Self {
            pending: BTreeMap::new(),
            pointer: None,
            close_delay,
        }
    }

    /// Record the latest pointer position.
    pub fn pointer_moved(&mut self, position: Point) {
        self.pointer = Some(position);
    }

    /// The pointer left `panel`'s trigger or surface: arm its close timer.
    ///
    /// An existing deadline for the same panel is replaced, so a panel never
    /// holds more than one.
    pub fn arm_close(&mut self, panel: P, now: u64) {
        self.pending.insert(panel, now + self.close_delay);
    }

    /// Cancel a pending close (pointer re-entered, or keyboard took over).
    ///
    /// Returns whether a deadline was actually pending.
    pub fn cancel(&mut self, panel: P) -> bool {
        self.pending.remove(&panel).is_some()
    }

    /// Cancel every pending close (tree closed or unmounted).
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Whether `panel` has a pending close.
    pub fn is_pending(&self, panel: P) -> bool {
        self.pending.contains_key(&panel)
    }

    /// Earliest pending deadline, for the host's wake-up scheduling.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.values().min().copied()
    }

    /// Fire all deadlines that elapsed by `now`.
    ///
    /// `safe_rects` yields the panel's own rectangle plus the rectangles of
    /// its open descendant panels. A due panel whose safe region contains
    /// the pointer has its close cancelled; the rest are returned as the
    /// panels to close.
    pub fn fire_due(
        &mut self,
        now: u64,
        mut safe_rects: impl FnMut(&P) -> Vec<Rect>,
    ) -> Vec<P> {
        let due: Vec<P> = self
            .pending
            .iter()
            .filter(|&(_, &deadline)| deadline <= now)
            .map(|(&panel, _)| panel)
            .collect();

        let mut to_close = Vec::new();
        for panel in due {
            self.pending.remove(&panel);
            let saved = self
                .pointer
                .is_some_and(|pt| safe_rects(&panel).iter().any(|r| r.contains(pt)));
            if !saved {
                to_close.push(panel);
            }
        }
        to_close
    }
}

impl<P: Copy + Ord> Default for HoverCoordinator<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn panel_rect() -> Rect {
        Rect::new(100.0, 0.0, 300.0, 200.0)
    }

    #[test]
    fn pointer_reaching_the_panel_cancels_the_close() {
        let mut hover: HoverCoordinator<u32> = HoverCoordinator::new();
        hover.arm_close(1, 0);
        // Diagonal movement: pointer is inside the panel when the timer fires.
        hover.pointer_moved(Point::new(150.0, 50.0));
        let closed = hover.fire_due(100, |_| vec![panel_rect()]);
        assert!(closed.is_empty());
        assert!(!hover.is_pending(1));
    }

    #[test]
    fn pointer_elsewhere_closes_after_the_delay() {
        let mut hover: HoverCoordinator<u32> = HoverCoordinator::new();
        hover.arm_close(1, 0);
        hover.pointer_moved(Point::new(500.0, 500.0));
        // Not yet due.
        assert!(hover.fire_due(99, |_| vec![panel_rect()]).is_empty());
        assert!(hover.is_pending(1));
        // Due and not in a safe region.
        assert_eq!(hover.fire_due(100, |_| vec![panel_rect()]), vec![1]);
    }

    #[test]
    fn descendant_panel_rects_are_safe_too() {
        let mut hover: HoverCoordinator<u32> = HoverCoordinator::new();
        hover.arm_close(1, 0);
        // Pointer sits inside an open grandchild panel.
        hover.pointer_moved(Point::new(350.0, 100.0));
        let grandchild = Rect::new(300.0, 50.0, 450.0, 250.0);
        let closed = hover.fire_due(150, |_| vec![panel_rect(), grandchild]);
        assert!(closed.is_empty());
    }

    #[test]
    fn rearming_replaces_the_deadline() {
        let mut hover: HoverCoordinator<u32> = HoverCoordinator::new();
        hover.arm_close(1, 0);
        hover.arm_close(1, 80);
        assert_eq!(hover.next_deadline(), Some(180));
        hover.pointer_moved(Point::new(500.0, 500.0));
        // The original deadline no longer exists.
        assert!(hover.fire_due(100, |_| vec![panel_rect()]).is_empty());
        assert_eq!(hover.fire_due(180, |_| vec![panel_rect()]), vec![1]);
    }

    #[test]
    fn cancel_and_cancel_all_drop_deadlines() {
        let mut hover: HoverCoordinator<u32> = HoverCoordinator::new();
        hover.arm_close(1, 0);
        hover.arm_close(2, 10);
        assert!(hover.cancel(1));
        assert!(!hover.cancel(1));
        hover.cancel_all();
        assert_eq!(hover.next_deadline(), None);
        hover.pointer_moved(Point::new(500.0, 500.0));
        assert!(hover.fire_due(1000, |_| Vec::new()).is_empty());
    }

    #[test]
    fn independent_panels_fire_independently() {
        let mut hover: HoverCoordinator<u32> = HoverCoordinator::with_delay(50);
        hover.arm_close(1, 0);
        hover.arm_close(2, 100);
        hover.pointer_moved(Point::new(500.0, 500.0));
        assert_eq!(hover.fire_due(60, |_| Vec::new()), vec![1]);
        assert!(hover.is_pending(2));
        assert_eq!(hover.fire_due(200, |_| Vec::new()), vec![2]);
    }

    #[test]
    fn unknown_pointer_position_never_saves_a_close() {
        // No pointer_moved observed yet: fail safe by closing.
        let mut hover: HoverCoordinator<u32> = HoverCoordinator::new();
        hover.arm_close(1, 0);
        assert_eq!(hover.fire_due(100, |_| vec![panel_rect()]), vec![1]);
    }
}
