//! Points, sizes and boxes in a symbol's frame.
//!
//! Coordinates follow SVG: x grows to the right, y grows downwards. A
//! symbol's local frame puts the origin at the top-left corner of its shell,
//! so pin offsets and anchor points are never negative. Labels and readouts
//! may hang outside the shell, which is why [`Bounds`] can have negative
//! minimums.
//!
//! ```text
//!   (0,0) ──────── width ──► x
//!     │   ┌──────────────┐
//!     │   │    shell     │
//!  height └──────────────┘
//!     ▼
//!     y
//! ```

/// A position in a symbol's frame.
///
/// ```
/// # use pinline_core::geometry::Point;
/// let pivot = Point::new(20.0, 10.0);
/// let contact = Point::new(60.0, 30.0);
///
/// assert_eq!(pivot.add_point(Point::new(5.0, 5.0)), Point::new(25.0, 15.0));
/// assert_eq!(pivot.midpoint(contact), Point::new(40.0, 20.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    pub fn with_x(self, x: f32) -> Self {
        Self { x, ..self }
    }

    pub fn with_y(self, y: f32) -> Self {
        Self { y, ..self }
    }

    /// Offsets this point by `delta`.
    pub fn add_point(self, delta: Point) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y)
    }

    pub fn midpoint(self, other: Point) -> Self {
        self.lerp(other, 0.5)
    }

    /// Point at fraction `t` of the way to `other`.
    pub fn lerp(self, other: Point, t: f32) -> Self {
        Self::new(
            (other.x - self.x).mul_add(t, self.x),
            (other.y - self.y).mul_add(t, self.y),
        )
    }

    /// Box of `size` centered on this point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Width and height of a shell, a glyph or a text run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Component-wise maximum, used to enforce a minimum shell size.
    pub fn max(self, other: Size) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }

    pub fn add_padding(self, insets: Insets) -> Self {
        Self::new(
            self.width + insets.left + insets.right,
            self.height + insets.top + insets.bottom,
        )
    }

    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Axis-aligned box, stored as its extreme coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half = Point::new(size.width / 2.0, size.height / 2.0);
        Self {
            min_x: center.x - half.x,
            min_y: center.y - half.y,
            max_x: center.x + half.x,
            max_y: center.y + half.y,
        }
    }

    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(self) -> Point {
        Point::new(self.min_x, self.min_y).midpoint(Point::new(self.max_x, self.max_y))
    }

    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Smallest box covering both.
    ///
    /// ```
    /// # use pinline_core::geometry::{Bounds, Point, Size};
    /// let shell = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(80.0, 40.0));
    /// let title = Bounds::new_from_center(Point::new(40.0, 52.0), Size::new(100.0, 12.0));
    ///
    /// let covered = shell.merge(&title);
    /// assert_eq!(covered.min_x(), -10.0);
    /// assert_eq!(covered.max_y(), 58.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the box by `insets` on each side.
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left,
            min_y: self.min_y - insets.top,
            max_x: self.max_x + insets.right,
            max_y: self.max_y + insets.bottom,
        }
    }

    /// Shrinks the box by `insets` on each side, stopping at its center.
    pub fn inset(&self, insets: Insets) -> Self {
        let center = self.center();
        Self {
            min_x: (self.min_x + insets.left).min(center.x),
            min_y: (self.min_y + insets.top).min(center.y),
            max_x: (self.max_x - insets.right).max(center.x),
            max_y: (self.max_y - insets.bottom).max(center.y),
        }
    }
}

/// Per-side distances, in CSS order: top, right, bottom, left.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_lerp_endpoints() {
        let a = Point::new(0.0, 10.0);
        let b = Point::new(40.0, 30.0);

        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);

        let mid = a.lerp(b, 0.5);
        assert_approx_eq!(f32, mid.x(), 20.0);
        assert_approx_eq!(f32, mid.y(), 20.0);
    }

    #[test]
    fn test_point_with_coordinate() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(p.with_x(9.0), Point::new(9.0, 4.0));
        assert_eq!(p.with_y(9.0), Point::new(3.0, 9.0));
    }

    #[test]
    fn test_bounds_from_center() {
        let center = Point::new(50.0, 60.0);
        let bounds = center.to_bounds(Size::new(20.0, 30.0));

        assert_eq!(bounds.min_x(), 40.0);
        assert_eq!(bounds.min_y(), 45.0);
        assert_eq!(bounds.max_x(), 60.0);
        assert_eq!(bounds.max_y(), 75.0);
        assert_eq!(bounds.center(), center);
    }

    #[test]
    fn test_bounds_from_top_left() {
        let top_left = Point::new(10.0, 20.0);
        let bounds = Bounds::new_from_top_left(top_left, Size::new(30.0, 40.0));

        assert_eq!(bounds.max_x(), 40.0);
        assert_eq!(bounds.max_y(), 60.0);
        assert_eq!(bounds.min_point(), top_left);
        assert_eq!(bounds.to_size(), Size::new(30.0, 40.0));
    }

    #[test]
    fn test_inset_stops_at_center() {
        let bounds = Bounds::new_from_top_left(Point::default(), Size::new(10.0, 10.0));
        let shrunk = bounds.inset(Insets::uniform(20.0));
        assert_eq!(shrunk.width(), 0.0);
        assert_eq!(shrunk.height(), 0.0);
        assert_eq!(shrunk.center(), bounds.center());
    }

    #[test]
    fn test_padding_then_inset_restores_bounds() {
        let bounds = Bounds::new_from_top_left(Point::new(5.0, 5.0), Size::new(50.0, 20.0));
        let insets = Insets::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(bounds.add_padding(insets).inset(insets), bounds);
    }

    #[test]
    fn test_size_padding_and_max() {
        let padded = Size::new(10.0, 20.0).add_padding(Insets::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(padded, Size::new(16.0, 24.0));

        let max = Size::new(10.0, 20.0).max(Size::new(15.0, 18.0));
        assert_eq!(max, Size::new(15.0, 20.0));
        assert!(Size::default().is_zero());
    }
}
