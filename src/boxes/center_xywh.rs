//! Center-based boxes: absolute center and size `(x_c, y_c, w, h)`.
//!
//! The center of a whole-pixel box can sit on a half pixel, so values are
//! `f64`. Corners are rounded half-to-even only when the canonical box is
//! derived.

use super::bbox::BBoxXYXY;
use super::bounding_box::BoundingBox;
use super::format::{BoxFormat, Extent, Format};
use super::space::ImageSize;
use crate::error::BBoxError;

/// Marker for the absolute center format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CenterXywh {}

/// An absolute center-based box. Requires an image size.
pub type CenterXywhBox = BoundingBox<CenterXywh>;

impl Format for CenterXywh {
    type Value = f64;

    const KIND: BoxFormat = BoxFormat::CenterXywh;

    fn extent(values: &[f64; 4]) -> Extent {
        let [x_c, y_c, w, h] = *values;
        Extent {
            x_tl: x_c - w / 2.0,
            y_tl: y_c - h / 2.0,
            x_br: x_c + w / 2.0,
            y_br: y_c + h / 2.0,
        }
    }

    fn to_canonical(values: &[f64; 4], _: Option<ImageSize>) -> Result<BBoxXYXY, BBoxError> {
        let [x_c, y_c, w, h] = *values;
        let x_tl = x_c - w / 2.0;
        let y_tl = y_c - h / 2.0;
        Ok(BBoxXYXY::from_f64_corners(x_tl, y_tl, x_tl + w, y_tl + h))
    }

    fn from_canonical(bbox: &BBoxXYXY, _: Option<ImageSize>) -> Result<[f64; 4], BBoxError> {
        let w = bbox.width() as f64;
        let h = bbox.height() as f64;
        Ok([
            bbox.x_tl as f64 + w / 2.0,
            bbox.y_tl as f64 + h / 2.0,
            w,
            h,
        ])
    }
}
