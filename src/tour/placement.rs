//! Spotlight and tooltip placement around a tour anchor.
//!
//! The tooltip card is roughly 320×180; the clearances below leave room for
//! it plus a margin. Clamping applies the upper bound first and the 20px
//! inset last, so on a viewport too small for the card it pins to the inset.

use serde::Serialize;

use crate::model::{Point, Rect, TooltipPosition, Viewport};

/// Padding added around the anchor's box for the spotlight.
pub const SPOTLIGHT_MARGIN: f64 = 5.0;
/// Gap between anchor and tooltip for `bottom` and `right`.
pub const TOOLTIP_GAP: f64 = 20.0;
/// Horizontal room reserved for the tooltip card.
pub const TOOLTIP_CLEARANCE_X: f64 = 340.0;
/// Vertical room reserved for the tooltip card.
pub const TOOLTIP_CLEARANCE_Y: f64 = 200.0;
/// Minimum distance from the viewport's top and left edges.
pub const VIEWPORT_INSET: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub spotlight: Rect,
    pub tooltip: Point,
}

/// Computes where the spotlight and tooltip go for an anchor at `anchor`.
pub fn place(anchor: Rect, position: TooltipPosition, viewport: Viewport) -> Placement {
    let (left, top) = match position {
        TooltipPosition::Bottom => (anchor.left, anchor.bottom() + TOOLTIP_GAP),
        TooltipPosition::Top => (anchor.left, anchor.top - TOOLTIP_CLEARANCE_Y),
        TooltipPosition::Right => (anchor.right() + TOOLTIP_GAP, anchor.top),
        TooltipPosition::Left => (anchor.left - TOOLTIP_CLEARANCE_X, anchor.top),
    };

    let left = left
        .min(viewport.width - TOOLTIP_CLEARANCE_X)
        .max(VIEWPORT_INSET);
    let top = top
        .min(viewport.height - TOOLTIP_CLEARANCE_Y)
        .max(VIEWPORT_INSET);

    Placement {
        spotlight: anchor.inflate(SPOTLIGHT_MARGIN),
        tooltip: Point { left, top },
    }
}
