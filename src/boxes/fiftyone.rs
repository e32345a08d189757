//! FiftyOne boxes: normalized top-left and size `(x_tl, y_tl, w, h)`.

use super::bbox::BBoxXYXY;
use super::bounding_box::BoundingBox;
use super::format::{require_image_size, BoxFormat, Extent, Format};
use super::space::ImageSize;
use crate::error::BBoxError;

/// Marker for the FiftyOne format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fiftyone {}

/// A FiftyOne box. Requires an image size.
pub type FiftyoneBox = BoundingBox<Fiftyone>;

impl Format for Fiftyone {
    type Value = f64;

    const KIND: BoxFormat = BoxFormat::Fiftyone;

    fn extent(values: &[f64; 4]) -> Extent {
        let [x_tl, y_tl, w, h] = *values;
        Extent {
            x_tl,
            y_tl,
            x_br: x_tl + w,
            y_br: y_tl + h,
        }
    }

    fn to_canonical(
        values: &[f64; 4],
        image_size: Option<ImageSize>,
    ) -> Result<BBoxXYXY, BBoxError> {
        let (image_w, image_h) = require_image_size(Self::KIND, image_size, "conversion")?.dims();
        let [x_tl, y_tl, w, h] = *values;
        let x_tl = x_tl * image_w;
        let y_tl = y_tl * image_h;
        Ok(BBoxXYXY::from_f64_corners(
            x_tl,
            y_tl,
            x_tl + w * image_w,
            y_tl + h * image_h,
        ))
    }

    fn from_canonical(
        bbox: &BBoxXYXY,
        image_size: Option<ImageSize>,
    ) -> Result<[f64; 4], BBoxError> {
        let (image_w, image_h) = require_image_size(Self::KIND, image_size, "conversion")?.dims();
        Ok([
            bbox.x_tl as f64 / image_w,
            bbox.y_tl as f64 / image_h,
            bbox.width() as f64 / image_w,
            bbox.height() as f64 / image_h,
        ])
    }
}
