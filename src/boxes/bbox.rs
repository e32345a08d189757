//! Canonical bounding box: absolute integer corners.
//!
//! Every format converts to and from this type; it is the hub of all
//! conversions and the only place where box geometry is computed.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use super::space::ImageSize;

/// Exclusive bound on the magnitude of canonical corners.
///
/// Within it, widths stay below 2^31, so areas fit in `i64` and so does
/// the sum of two areas.
pub const COORD_LIMIT: i64 = 1 << 30;

/// An axis-aligned bounding box in absolute pixel corners
/// (`x_tl, y_tl, x_br, y_br`), the layout Pascal VOC uses.
///
/// Boxes derived from a validated format box always satisfy
/// `x_br >= x_tl` and `y_br >= y_tl`, and every corner lies strictly
/// within `±COORD_LIMIT`. The type itself does not enforce either, so
/// that transforms can produce a malformed rectangle and leave the
/// rejection to format validation. Geometry on boxes outside the limit
/// may overflow.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BBoxXYXY {
    pub x_tl: i64,
    pub y_tl: i64,
    pub x_br: i64,
    pub y_br: i64,
}

impl BBoxXYXY {
    /// Creates a new bounding box from explicit corners.
    #[inline]
    pub fn new(x_tl: i64, y_tl: i64, x_br: i64, y_br: i64) -> Self {
        Self {
            x_tl,
            y_tl,
            x_br,
            y_br,
        }
    }

    /// Builds a box from floating-point corners, rounding each half-to-even.
    ///
    /// This is the only rounding point between format math and the
    /// canonical representation.
    pub fn from_f64_corners(x_tl: f64, y_tl: f64, x_br: f64, y_br: f64) -> Self {
        Self::new(
            round_half_even(x_tl),
            round_half_even(y_tl),
            round_half_even(x_br),
            round_half_even(y_br),
        )
    }

    /// Returns the corners as a tuple-like array.
    #[inline]
    pub fn corners(&self) -> [i64; 4] {
        [self.x_tl, self.y_tl, self.x_br, self.y_br]
    }

    /// Returns the width of the bounding box.
    #[inline]
    pub fn width(&self) -> i64 {
        self.x_br - self.x_tl
    }

    /// Returns the height of the bounding box.
    #[inline]
    pub fn height(&self) -> i64 {
        self.y_br - self.y_tl
    }

    /// Returns the area of the bounding box.
    #[inline]
    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    /// Returns the center point, which may fall on a half pixel.
    #[inline]
    pub fn center(&self) -> Coord {
        Coord::new(
            self.x_tl as f64 + self.width() as f64 / 2.0,
            self.y_tl as f64 + self.height() as f64 / 2.0,
        )
    }

    /// Whether every corner lies strictly within `±COORD_LIMIT`.
    #[inline]
    pub fn in_range(&self) -> bool {
        self.corners().iter().all(|c| c.abs() < COORD_LIMIT)
    }

    /// Area shared by both boxes.
    ///
    /// Boxes that only touch along an edge or corner intersect at 0.
    pub fn intersection(&self, other: &BBoxXYXY) -> i64 {
        let x_tl = self.x_tl.max(other.x_tl);
        let y_tl = self.y_tl.max(other.y_tl);
        let x_br = self.x_br.min(other.x_br);
        let y_br = self.y_br.min(other.y_br);
        if x_tl >= x_br || y_tl >= y_br {
            return 0;
        }
        (x_br - x_tl) * (y_br - y_tl)
    }

    /// Area covered by at least one of the boxes.
    pub fn union(&self, other: &BBoxXYXY) -> i64 {
        self.area() + other.area() - self.intersection(other)
    }

    /// Intersection over union.
    ///
    /// Two zero-area boxes have a zero union, and the result is NaN.
    pub fn iou(&self, other: &BBoxXYXY) -> f64 {
        self.intersection(other) as f64 / self.union(other) as f64
    }

    /// Distance between the two centers, rounded half-to-even.
    pub fn distance(&self, other: &BBoxXYXY) -> i64 {
        self.center().rounded_distance(&other.center())
    }

    /// Intersects the box with the full image frame.
    ///
    /// A box lying entirely outside the frame comes back malformed.
    pub fn clamp_to(&self, image_size: ImageSize) -> BBoxXYXY {
        let frame = image_size.frame();
        BBoxXYXY::new(
            self.x_tl.max(frame.x_tl),
            self.y_tl.max(frame.y_tl),
            self.x_br.min(frame.x_br),
            self.y_br.min(frame.y_br),
        )
    }

    /// Scales width and height by `factor`, keeping the top-left corner fixed.
    ///
    /// New sizes are rounded half-to-even. Corners that do not fit in
    /// `i64` saturate; check [`BBoxXYXY::in_range`] before using them.
    pub fn scale(&self, factor: f64) -> BBoxXYXY {
        let width = (self.width() as f64 * factor).round_ties_even();
        let height = (self.height() as f64 * factor).round_ties_even();
        BBoxXYXY::from_f64_corners(
            self.x_tl as f64,
            self.y_tl as f64,
            self.x_tl as f64 + width,
            self.y_tl as f64 + height,
        )
    }

    /// Translates both corners by an absolute pixel offset.
    ///
    /// Saturates like [`BBoxXYXY::scale`].
    pub fn shift(&self, dx: f64, dy: f64) -> BBoxXYXY {
        BBoxXYXY::from_f64_corners(
            self.x_tl as f64 + dx,
            self.y_tl as f64 + dy,
            self.x_br as f64 + dx,
            self.y_br as f64 + dy,
        )
    }
}

/// Rounds half-to-even and converts to an integer pixel coordinate.
#[inline]
pub(crate) fn round_half_even(value: f64) -> i64 {
    value.round_ties_even() as i64
}

impl fmt::Debug for BBoxXYXY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BBoxXYXY")
            .field("x_tl", &self.x_tl)
            .field("y_tl", &self.y_tl)
            .field("x_br", &self.x_br)
            .field("y_br", &self.y_br)
            .finish()
    }
}

impl fmt::Display for BBoxXYXY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {} {} {}]",
            self.x_tl, self.y_tl, self.x_br, self.y_br
        )
    }
}

/// `a + b` is the union area.
impl Add for &BBoxXYXY {
    type Output = i64;

    fn add(self, other: &BBoxXYXY) -> i64 {
        self.union(other)
    }
}

/// `a - b` is the area of `a` not covered by `b`.
impl Sub for &BBoxXYXY {
    type Output = i64;

    fn sub(self, other: &BBoxXYXY) -> i64 {
        self.area() - self.intersection(other)
    }
}

/// `a * b` is the intersection area.
impl Mul for &BBoxXYXY {
    type Output = i64;

    fn mul(self, other: &BBoxXYXY) -> i64 {
        self.intersection(other)
    }
}

/// `a / b` is the ratio of the two areas.
impl Div for &BBoxXYXY {
    type Output = f64;

    fn div(self, other: &BBoxXYXY) -> f64 {
        self.area() as f64 / other.area() as f64
    }
}
