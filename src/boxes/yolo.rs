//! YOLO boxes: normalized center and size `(x_c, y_c, w, h)`.

use super::bbox::BBoxXYXY;
use super::bounding_box::BoundingBox;
use super::format::{require_image_size, BoxFormat, Extent, Format};
use super::space::ImageSize;
use crate::error::BBoxError;

/// Marker for the YOLO format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Yolo {}

/// A YOLO box. Requires an image size.
pub type YoloBox = BoundingBox<Yolo>;

impl Format for Yolo {
    type Value = f64;

    const KIND: BoxFormat = BoxFormat::Yolo;

    fn extent(values: &[f64; 4]) -> Extent {
        let [x_c, y_c, w, h] = *values;
        Extent {
            x_tl: x_c - w / 2.0,
            y_tl: y_c - h / 2.0,
            x_br: x_c + w / 2.0,
            y_br: y_c + h / 2.0,
        }
    }

    fn to_canonical(
        values: &[f64; 4],
        image_size: Option<ImageSize>,
    ) -> Result<BBoxXYXY, BBoxError> {
        let (image_w, image_h) = require_image_size(Self::KIND, image_size, "conversion")?.dims();
        let [x_c, y_c, w, h] = *values;
        let w = w * image_w;
        let h = h * image_h;
        let x_tl = x_c * image_w - w / 2.0;
        let y_tl = y_c * image_h - h / 2.0;
        Ok(BBoxXYXY::from_f64_corners(x_tl, y_tl, x_tl + w, y_tl + h))
    }

    fn from_canonical(
        bbox: &BBoxXYXY,
        image_size: Option<ImageSize>,
    ) -> Result<[f64; 4], BBoxError> {
        let (image_w, image_h) = require_image_size(Self::KIND, image_size, "conversion")?.dims();
        let w = bbox.width() as f64;
        let h = bbox.height() as f64;
        Ok([
            (bbox.x_tl as f64 + w / 2.0) / image_w,
            (bbox.y_tl as f64 + h / 2.0) / image_h,
            w / image_w,
            h / image_h,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::{BoxOptions, OobState};

    #[test]
    fn test_yolo_to_canonical() {
        let yolo = YoloBox::new(
            [0.4046875, 0.840625, 0.503125, 0.24375],
            BoxOptions::with_image_size(640, 480),
        )
        .unwrap();
        assert_eq!(*yolo.canonical(), BBoxXYXY::new(98, 345, 420, 462));
        assert_eq!(yolo.oob(), OobState::InBounds);
    }

    #[test]
    fn test_yolo_oob_uses_unit_frame() {
        let opts = BoxOptions::with_image_size(640, 480);
        let lenient = YoloBox::new([0.95, 0.5, 0.2, 0.2], opts).unwrap();
        assert_eq!(lenient.oob(), OobState::OutOfBounds);

        let strict = YoloBox::new([0.95, 0.5, 0.2, 0.2], opts.strict(true));
        assert!(matches!(strict, Err(BBoxError::OutOfBounds { .. })));
    }

    #[test]
    fn test_yolo_rejects_zero_size() {
        let err = YoloBox::new([0.5, 0.5, 0.0, 0.2], BoxOptions::with_image_size(10, 10));
        assert!(matches!(err, Err(BBoxError::InvalidCoordinates { .. })));
    }

    #[test]
    fn test_yolo_shift_is_fractional() {
        let opts = BoxOptions::with_image_size(100, 100);
        let yolo = YoloBox::new([0.3, 0.3, 0.2, 0.2], opts).unwrap();
        let shifted = yolo.shift(0.1, 0.1).unwrap();
        assert_eq!(*shifted.canonical(), yolo.canonical().shift(10.0, 10.0));
        assert_eq!(*shifted.canonical(), BBoxXYXY::new(30, 30, 50, 50));
    }
}
