//! COCO boxes: absolute top-left and size `(x_tl, y_tl, w, h)`.

use super::bbox::BBoxXYXY;
use super::bounding_box::BoundingBox;
use super::format::{BoxFormat, Extent, Format};
use super::space::ImageSize;
use crate::error::BBoxError;

/// Marker for the COCO format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Coco {}

/// A COCO box.
pub type CocoBox = BoundingBox<Coco>;

impl Format for Coco {
    type Value = i64;

    const KIND: BoxFormat = BoxFormat::Coco;

    fn extent(values: &[i64; 4]) -> Extent {
        let [x_tl, y_tl, w, h] = values.map(|v| v as f64);
        Extent {
            x_tl,
            y_tl,
            x_br: x_tl + w,
            y_br: y_tl + h,
        }
    }

    fn to_canonical(values: &[i64; 4], _: Option<ImageSize>) -> Result<BBoxXYXY, BBoxError> {
        let [x_tl, y_tl, w, h] = *values;
        Ok(BBoxXYXY::new(x_tl, y_tl, x_tl + w, y_tl + h))
    }

    fn from_canonical(bbox: &BBoxXYXY, _: Option<ImageSize>) -> Result<[i64; 4], BBoxError> {
        Ok([bbox.x_tl, bbox.y_tl, bbox.width(), bbox.height()])
    }
}
