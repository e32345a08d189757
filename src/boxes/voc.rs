//! Pascal VOC boxes: absolute corners `(x_tl, y_tl, x_br, y_br)`.
//!
//! VOC has the same layout as the canonical box, so its conversions are
//! the identity.

use super::bbox::BBoxXYXY;
use super::bounding_box::BoundingBox;
use super::format::{BoxFormat, Extent, Format};
use super::space::ImageSize;
use crate::error::BBoxError;

/// Marker for the Pascal VOC format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Voc {}

/// A Pascal VOC box.
pub type VocBox = BoundingBox<Voc>;

impl Format for Voc {
    type Value = i64;

    const KIND: BoxFormat = BoxFormat::Voc;

    fn extent(values: &[i64; 4]) -> Extent {
        let [x_tl, y_tl, x_br, y_br] = *values;
        Extent {
            x_tl: x_tl as f64,
            y_tl: y_tl as f64,
            x_br: x_br as f64,
            y_br: y_br as f64,
        }
    }

    fn to_canonical(values: &[i64; 4], _: Option<ImageSize>) -> Result<BBoxXYXY, BBoxError> {
        let [x_tl, y_tl, x_br, y_br] = *values;
        Ok(BBoxXYXY::new(x_tl, y_tl, x_br, y_br))
    }

    fn from_canonical(bbox: &BBoxXYXY, _: Option<ImageSize>) -> Result<[i64; 4], BBoxError> {
        Ok(bbox.corners())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::{BoxOptions, OobState};

    #[test]
    fn test_voc_is_canonical() {
        let voc = VocBox::new([98, 345, 420, 462], BoxOptions::with_image_size(640, 480)).unwrap();
        assert_eq!(*voc.canonical(), BBoxXYXY::new(98, 345, 420, 462));
        assert_eq!(voc.width(), 322);
        assert_eq!(voc.height(), 117);
        assert_eq!(voc.oob(), OobState::InBounds);
    }

    #[test]
    fn test_voc_rejects_inverted_corners() {
        let err = VocBox::new([50, 50, 40, 60], BoxOptions::default());
        assert!(matches!(err, Err(BBoxError::InvalidCoordinates { .. })));
    }

    #[test]
    fn test_voc_negative_top_left() {
        let lenient = VocBox::new([-5, 0, 10, 10], BoxOptions::default()).unwrap();
        assert_eq!(lenient.oob(), OobState::Unknown);

        let strict = VocBox::new([-5, 0, 10, 10], BoxOptions::default().strict(true));
        assert!(matches!(strict, Err(BBoxError::OutOfBounds { .. })));
    }

    #[test]
    fn test_voc_converts_to_every_format() {
        let voc = VocBox::new([98, 345, 420, 462], BoxOptions::with_image_size(640, 480)).unwrap();
        assert_eq!(voc.to_coco().unwrap().values(), [98, 345, 322, 117]);
        assert_eq!(
            voc.to_center_xywh().unwrap().values(),
            [259.0, 403.5, 322.0, 117.0]
        );

        let albu = voc.to_albumentations().unwrap().values();
        let expected = [98.0 / 640.0, 345.0 / 480.0, 420.0 / 640.0, 462.0 / 480.0];
        for (got, want) in albu.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }

        let yolo = voc.to_yolo().unwrap().values();
        let expected = [259.0 / 640.0, 403.5 / 480.0, 322.0 / 640.0, 117.0 / 480.0];
        for (got, want) in yolo.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }

        let fiftyone = voc.to_fiftyone().unwrap().values();
        let expected = [98.0 / 640.0, 345.0 / 480.0, 322.0 / 640.0, 117.0 / 480.0];
        for (got, want) in fiftyone.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }
    }
}
