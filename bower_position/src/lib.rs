// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bower Position: anchored placement resolution for floating panels.
//!
//! This crate computes where a floating panel (menu, listbox, popover) should
//! appear relative to an anchor — an element rectangle or a bare point — given
//! a desired side and alignment, a collision boundary, and the panel's natural
//! size. It is a pure geometry layer built on [`kurbo`]: no state, no DOM, no
//! clocks. Hosts re-invoke [`resolve`] on every layout-affecting change
//! (anchor move/resize, panel resize, viewport resize/scroll, mount).
//!
//! ## Collision handling
//!
//! When [`PlacementOptions::avoid_collisions`] is set and the requested side
//! would overflow the boundary, the resolver tries the opposite side, then the
//! two perpendicular sides, and takes the first that fully fits. If no side
//! fits, the requested side is kept and the position is clamped according to
//! [`Sticky`]; [`Placement::max_width`]/[`Placement::max_height`] then report
//! how much room the fitted side actually offers so the host can cap the
//! panel's size (for example a long list near the viewport's bottom edge).
//!
//! ## Degraded geometry
//!
//! A panel that has not been measured yet (zero or non-finite size) resolves
//! to [`Placement::is_positioned`]` == false`; hosts render it hidden and
//! retry on the next layout pass. An anchor element that has left the
//! boundary entirely, or collapsed to zero size because it left layout,
//! resolves with [`Placement::is_anchor_hidden`]` == true`; hosts hide the
//! panel but keep it mounted so focus and state survive. Neither condition
//! is an error.
//!
//! ## Determinism
//!
//! Identical inputs produce identical output. There is no randomness and no
//! hidden time dependency, so placements are snapshot-testable.
//!
//! ## Example
//!
//! ```rust
//! use bower_position::{Anchor, PlacementOptions, Side, resolve};
//! use kurbo::{Rect, Size};
//!
//! let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
//! let trigger = Anchor::Rect(Rect::new(100.0, 100.0, 180.0, 130.0));
//! let panel = Size::new(200.0, 150.0);
//!
//! let placement = resolve(trigger, panel, viewport, &PlacementOptions::default());
//! assert!(placement.is_positioned);
//! assert_eq!(placement.resolved_side, Side::Bottom);
//! ```
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

use kurbo::{Point, Rect, Size};

/// Comparison slack for fit tests, in logical pixels.
const FIT_EPS: f64 = 1e-9;

/// The side of the anchor a panel is placed against.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the anchor.
    Top,
    /// To the right of the anchor.
    Right,
    /// Below the anchor.
    Bottom,
    /// To the left of the anchor.
    Left,
}

impl Side {
    /// The side opposite this one.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether the panel extends horizontally from the anchor (left/right).
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// The machine-readable token used in rendered `data-side` attributes.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

/// Cross-axis alignment of the panel relative to the anchor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// Align the panel's leading edge with the anchor's leading edge.
    #[default]
    Start,
    /// Center the panel on the anchor.
    Center,
    /// Align the panel's trailing edge with the anchor's trailing edge.
    End,
}

/// Clamping behavior when no candidate side fully fits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Sticky {
    /// Keep the requested main-axis position; only the cross axis is clamped.
    /// The size caps report the partial room that remains.
    #[default]
    Partial,
    /// Clamp both axes fully into the boundary, even if the panel then
    /// overlaps the anchor.
    Always,
}

/// What the panel is positioned relative to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Anchor {
    /// A measured element rectangle (trigger buttons, menu items).
    Rect(Rect),
    /// A bare point (context-menu pointer coordinates).
    Point(Point),
}

impl Anchor {
    /// The anchor as a rectangle; point anchors behave as zero-size rects.
    pub fn rect(&self) -> Rect {
        match *self {
            Self::Rect(r) => r,
            Self::Point(p) => Rect::new(p.x, p.y, p.x, p.y),
        }
    }
}

/// Options controlling a single placement resolution.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementOptions {
    /// Requested side of the anchor.
    pub side: Side,
    /// Cross-axis alignment against the anchor.
    pub align: Align,
    /// Gap between the anchor and the panel along the main axis.
    pub side_offset: f64,
    /// Additional shift along the cross axis, applied after alignment.
    pub align_offset: f64,
    /// Inset applied to the collision boundary on all edges.
    pub collision_padding: f64,
    /// Whether to try other sides when the requested one overflows.
    pub avoid_collisions: bool,
    /// Clamping behavior when nothing fully fits.
    pub sticky: Sticky,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            side: Side::Bottom,
            align: Align::Start,
            side_offset: 0.0,
            align_offset: 0.0,
            collision_padding: 0.0,
            avoid_collisions: true,
            sticky: Sticky::Partial,
        }
    }
}

/// The outcome of one placement resolution.
///
/// A fresh value is produced on every layout pass; placements are never
/// mutated in place.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Top-left corner of the panel, in boundary coordinates.
    pub origin: Point,
    /// The side that was actually used after collision handling.
    pub resolved_side: Side,
    /// Cap on the panel's width when the resolved side constrains it.
    pub max_width: Option<f64>,
    /// Cap on the panel's height when the resolved side constrains it.
    pub max_height: Option<f64>,
    /// False while the panel is not yet measurable; render hidden and retry.
    pub is_positioned: bool,
    /// True when the anchor has left the boundary; hide but keep mounted.
    pub is_anchor_hidden: bool,
}

impl Placement {
    fn unpositioned(side: Side) -> Self {
        Self {
            origin: Point::ZERO,
            resolved_side: side,
            max_width: None,
            max_height: None,
            is_positioned: false,
            is_anchor_hidden: false,
        }
    }
}

/// Resolve a panel placement against an anchor within a collision boundary.
///
/// `target` is the panel's natural (unconstrained) size and `boundary` the
/// region the panel should stay within, typically the viewport. See the
/// crate docs for collision and degraded-geometry behavior.
pub fn resolve(
    anchor: Anchor,
    target: Size,
    boundary: Rect,
    options: &PlacementOptions,
) -> Placement {
    if !is_measurable(target) {
        return Placement::unpositioned(options.side);
    }

    let anchor_rect = anchor.rect();
    let bounds = boundary.inset(-options.collision_padding);
    // A zero-area element rect means the anchor was removed from layout;
    // point anchors are zero-size on purpose and stay visible.
    let anchor_empty = matches!(anchor, Anchor::Rect(r) if r.area() == 0.0);
    let anchor_hidden = !rect_is_finite(anchor_rect)
        || anchor_empty
        || anchor_rect.x0 > bounds.x1
        || anchor_rect.x1 < bounds.x0
        || anchor_rect.y0 > bounds.y1
        || anchor_rect.y1 < bounds.y0;

    let mut resolved = options.side;
    let mut origin = place(anchor_rect, target, options, options.side);

    if options.avoid_collisions {
        let mut fitted = false;
        for side in candidate_sides(options.side) {
            let candidate = place(anchor_rect, target, options, side);
            if fits(candidate, target, bounds) {
                resolved = side;
                origin = candidate;
                fitted = true;
                break;
            }
        }
        if !fitted {
            // Nothing fits fully; stay on the requested side and clamp.
            resolved = options.side;
            origin = clamp(
                place(anchor_rect, target, options, options.side),
                target,
                bounds,
                options.side,
                options.sticky,
            );
        }
    }

    let (max_width, max_height) = size_caps(anchor_rect, target, bounds, resolved, options);

    Placement {
        origin,
        resolved_side: resolved,
        max_width,
        max_height,
        is_positioned: true,
        is_anchor_hidden: anchor_hidden,
    }
}

fn is_measurable(target: Size) -> bool {
    target.width.is_finite() && target.height.is_finite() && target.width > 0.0 && target.height > 0.0
}

fn rect_is_finite(r: Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
}

/// Candidate order: requested, opposite, then the perpendicular pair in
/// `{bottom, top, right, left}` preference order.
fn candidate_sides(requested: Side) -> [Side; 4] {
    let (perp_a, perp_b) = if requested.is_horizontal() {
        (Side::Bottom, Side::Top)
    } else {
        (Side::Right, Side::Left)
    };
    [requested, requested.opposite(), perp_a, perp_b]
}

/// Top-left corner of the panel for `side`, before any collision handling.
fn place(anchor: Rect, target: Size, options: &PlacementOptions, side: Side) -> Point {
    let main = match side {
        Side::Bottom => anchor.y1 + options.side_offset,
        Side::Top => anchor.y0 - options.side_offset - target.height,
        Side::Right => anchor.x1 + options.side_offset,
        Side::Left => anchor.x0 - options.side_offset - target.width,
    };
    let cross = if side.is_horizontal() {
        aligned(anchor.y0, anchor.y1, target.height, options)
    } else {
        aligned(anchor.x0, anchor.x1, target.width, options)
    };
    if side.is_horizontal() {
        Point::new(main, cross)
    } else {
        Point::new(cross, main)
    }
}

fn aligned(lead: f64, trail: f64, extent: f64, options: &PlacementOptions) -> f64 {
    let base = match options.align {
        Align::Start => lead,
        Align::Center => lead + ((trail - lead) - extent) / 2.0,
        Align::End => trail - extent,
    };
    base + options.align_offset
}

fn fits(origin: Point, target: Size, bounds: Rect) -> bool {
    origin.x >= bounds.x0 - FIT_EPS
        && origin.y >= bounds.y0 - FIT_EPS
        && origin.x + target.width <= bounds.x1 + FIT_EPS
        && origin.y + target.height <= bounds.y1 + FIT_EPS
}

fn clamp(origin: Point, target: Size, bounds: Rect, side: Side, sticky: Sticky) -> Point {
    let clamp_axis = |v: f64, lo: f64, hi: f64| v.max(lo).min(hi.max(lo));
    let x_clamped = clamp_axis(origin.x, bounds.x0, bounds.x1 - target.width);
    let y_clamped = clamp_axis(origin.y, bounds.y0, bounds.y1 - target.height);
    match sticky {
        Sticky::Always => Point::new(x_clamped, y_clamped),
        // Partial keeps the main-axis position so the panel stays attached to
        // the anchor; only the cross axis is pulled back into the boundary.
        Sticky::Partial => {
            if side.is_horizontal() {
                Point::new(origin.x, y_clamped)
            } else {
                Point::new(x_clamped, origin.y)
            }
        }
    }
}

/// Size caps for the resolved side.
///
/// The main-axis cap reflects the room between the anchor edge and the
/// boundary; the cross-axis cap only appears when the panel is wider/taller
/// than the boundary itself.
fn size_caps(
    anchor: Rect,
    target: Size,
    bounds: Rect,
    side: Side,
    options: &PlacementOptions,
) -> (Option<f64>, Option<f64>) {
    let available_main = match side {
        Side::Bottom => bounds.y1 - (anchor.y1 + options.side_offset),
        Side::Top => (anchor.y0 - options.side_offset) - bounds.y0,
        Side::Right => bounds.x1 - (anchor.x1 + options.side_offset),
        Side::Left => (anchor.x0 - options.side_offset) - bounds.x0,
    }
    .max(0.0);

    let mut max_width = None;
    let mut max_height = None;
    if side.is_horizontal() {
        if available_main < target.width {
            max_width = Some(available_main);
        }
        if bounds.height() < target.height {
            max_height = Some(bounds.height().max(0.0));
        }
    } else {
        if available_main < target.height {
            max_height = Some(available_main);
        }
        if bounds.width() < target.width {
            max_width = Some(bounds.width().max(0.0));
        }
    }
    (max_width, max_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    fn trigger() -> Anchor {
        Anchor::Rect(Rect::new(100.0, 100.0, 180.0, 130.0))
    }

    #[test]
    fn ample_room_keeps_requested_side() {
        let p = resolve(
            trigger(),
            Size::new(200.0, 150.0),
            viewport(),
            &PlacementOptions::default(),
        );
        assert!(p.is_positioned);
        assert!(!p.is_anchor_hidden);
        assert_eq!(p.resolved_side, Side::Bottom);
        assert_eq!(p.origin, Point::new(100.0, 130.0));
        assert_eq!(p.max_height, None);
    }

    #[test]
    fn flips_to_top_when_bottom_overflows() {
        // Anchor near the bottom edge: 30px below, plenty above.
        let anchor = Anchor::Rect(Rect::new(100.0, 540.0, 180.0, 570.0));
        let p = resolve(
            anchor,
            Size::new(200.0, 150.0),
            viewport(),
            &PlacementOptions::default(),
        );
        assert_eq!(p.resolved_side, Side::Top);
        assert_eq!(p.origin, Point::new(100.0, 540.0 - 150.0));
    }

    #[test]
    fn no_flip_when_collisions_disabled() {
        let anchor = Anchor::Rect(Rect::new(100.0, 540.0, 180.0, 570.0));
        let options = PlacementOptions {
            avoid_collisions: false,
            ..PlacementOptions::default()
        };
        let p = resolve(anchor, Size::new(200.0, 150.0), viewport(), &options);
        assert_eq!(p.resolved_side, Side::Bottom);
        assert_eq!(p.origin, Point::new(100.0, 570.0));
        // The cap still reports the partial room below.
        assert_eq!(p.max_height, Some(30.0));
    }

    #[test]
    fn falls_back_to_perpendicular_side() {
        // Tall panel that fits neither below nor above, but fits to the right.
        let p = resolve(
            trigger(),
            Size::new(200.0, 500.0),
            viewport(),
            &PlacementOptions::default(),
        );
        assert_eq!(p.resolved_side, Side::Right);
        assert_eq!(p.origin, Point::new(180.0, 100.0));
    }

    #[test]
    fn clamped_fallback_reports_partial_room() {
        // Panel taller than the whole viewport: nothing fits anywhere.
        let p = resolve(
            trigger(),
            Size::new(200.0, 700.0),
            viewport(),
            &PlacementOptions::default(),
        );
        assert_eq!(p.resolved_side, Side::Bottom);
        // Sticky::Partial keeps the main-axis attachment.
        assert_eq!(p.origin.y, 130.0);
        assert_eq!(p.max_height, Some(600.0 - 130.0));
    }

    #[test]
    fn sticky_always_clamps_fully() {
        let options = PlacementOptions {
            sticky: Sticky::Always,
            ..PlacementOptions::default()
        };
        let p = resolve(trigger(), Size::new(200.0, 700.0), viewport(), &options);
        // Fully clamped: the top edge pins to the boundary.
        assert_eq!(p.origin.y, 0.0);
    }

    #[test]
    fn alignment_center_and_end() {
        let center = PlacementOptions {
            align: Align::Center,
            avoid_collisions: false,
            ..PlacementOptions::default()
        };
        let p = resolve(trigger(), Size::new(200.0, 100.0), viewport(), &center);
        // Anchor is 80 wide at x=100; panel 200 wide centered on it.
        assert_eq!(p.origin.x, 100.0 + (80.0 - 200.0) / 2.0);

        let end = PlacementOptions {
            align: Align::End,
            avoid_collisions: false,
            ..PlacementOptions::default()
        };
        let p = resolve(trigger(), Size::new(200.0, 100.0), viewport(), &end);
        assert_eq!(p.origin.x, 180.0 - 200.0);
    }

    #[test]
    fn offsets_shift_both_axes() {
        let options = PlacementOptions {
            side_offset: 8.0,
            align_offset: 4.0,
            ..PlacementOptions::default()
        };
        let p = resolve(trigger(), Size::new(100.0, 100.0), viewport(), &options);
        assert_eq!(p.origin, Point::new(104.0, 138.0));
    }

    #[test]
    fn point_anchor_positions_like_zero_size_rect() {
        let p = resolve(
            Anchor::Point(Point::new(400.0, 300.0)),
            Size::new(100.0, 100.0),
            viewport(),
            &PlacementOptions::default(),
        );
        assert_eq!(p.origin, Point::new(400.0, 300.0));
        assert_eq!(p.resolved_side, Side::Bottom);
    }

    #[test]
    fn collision_padding_insets_the_boundary() {
        // Without padding the panel fits below exactly; padding forces a flip.
        let anchor = Anchor::Rect(Rect::new(100.0, 400.0, 180.0, 450.0));
        let options = PlacementOptions {
            collision_padding: 10.0,
            ..PlacementOptions::default()
        };
        // Room below inside the padded boundary is 590 - 450 = 140.
        let fitting = resolve(anchor, Size::new(100.0, 140.0), viewport(), &options);
        assert_eq!(fitting.resolved_side, Side::Bottom);
        let overflowing = resolve(anchor, Size::new(100.0, 145.0), viewport(), &options);
        assert_eq!(overflowing.resolved_side, Side::Top);
    }

    #[test]
    fn unmeasured_target_is_unpositioned() {
        let p = resolve(trigger(), Size::ZERO, viewport(), &PlacementOptions::default());
        assert!(!p.is_positioned);
        let p = resolve(
            trigger(),
            Size::new(f64::NAN, 10.0),
            viewport(),
            &PlacementOptions::default(),
        );
        assert!(!p.is_positioned);
    }

    #[test]
    fn anchor_outside_boundary_is_hidden_but_positioned() {
        let anchor = Anchor::Rect(Rect::new(-300.0, -300.0, -200.0, -250.0));
        let p = resolve(
            anchor,
            Size::new(100.0, 100.0),
            viewport(),
            &PlacementOptions::default(),
        );
        assert!(p.is_positioned);
        assert!(p.is_anchor_hidden);
    }

    #[test]
    fn empty_anchor_rect_is_hidden_but_a_point_is_not() {
        // An element removed from layout measures as a zero-size rect.
        let removed = Anchor::Rect(Rect::new(100.0, 100.0, 100.0, 100.0));
        let p = resolve(
            removed,
            Size::new(100.0, 100.0),
            viewport(),
            &PlacementOptions::default(),
        );
        assert!(p.is_positioned);
        assert!(p.is_anchor_hidden);

        let p = resolve(
            Anchor::Point(Point::new(100.0, 100.0)),
            Size::new(100.0, 100.0),
            viewport(),
            &PlacementOptions::default(),
        );
        assert!(!p.is_anchor_hidden);
    }

    #[test]
    fn non_finite_anchor_coordinates_hide_the_anchor() {
        for rect in [
            Rect::new(f64::NAN, 100.0, 180.0, 130.0),
            Rect::new(100.0, f64::NAN, 180.0, 130.0),
            Rect::new(100.0, 100.0, f64::NAN, 130.0),
            Rect::new(100.0, 100.0, 180.0, f64::NAN),
        ] {
            let p = resolve(
                Anchor::Rect(rect),
                Size::new(100.0, 100.0),
                viewport(),
                &PlacementOptions::default(),
            );
            assert!(p.is_anchor_hidden);
        }
    }

    #[test]
    fn identical_inputs_yield_identical_output() {
        let options = PlacementOptions {
            side: Side::Right,
            align: Align::Center,
            side_offset: 3.0,
            ..PlacementOptions::default()
        };
        let a = resolve(trigger(), Size::new(123.0, 77.0), viewport(), &options);
        let b = resolve(trigger(), Size::new(123.0, 77.0), viewport(), &options);
        assert_eq!(a, b);
    }
}
