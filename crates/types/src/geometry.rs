/// Axis-aligned box in viewport coordinates.
///
/// Units are whatever the view layer measures in (pixels in a browser,
/// terminal cells here). `left` may be negative when the box is scrolled past
/// the viewport's left edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
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

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// True when the box has not been laid out yet (zero, negative, or
    /// non-finite size).
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.left.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}
