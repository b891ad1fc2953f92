//! Screen geometry in CSS pixels.

use serde::{Deserialize, Serialize};

/// An axis-aligned box, measured from the viewport's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Grows the box by `margin` on every side.
    pub fn inflate(&self, margin: f64) -> Self {
        Self {
            left: self.left - margin,
            top: self.top - margin,
            width: self.width + margin * 2.0,
            height: self.height + margin * 2.0,
        }
    }
}

/// A top-left position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub left: f64,
    pub top: f64,
}

/// The visible area of the host window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inflate_grows_every_side() {
        let rect = Rect::new(100.0, 50.0, 40.0, 20.0).inflate(5.0);
        assert_eq!(rect, Rect::new(95.0, 45.0, 50.0, 30.0));
        assert_eq!(rect.right(), 145.0);
        assert_eq!(rect.bottom(), 75.0);
    }
}
