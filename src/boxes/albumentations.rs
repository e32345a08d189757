//! Albumentations boxes: normalized corners `(x_tl, y_tl, x_br, y_br)`.

use super::bbox::BBoxXYXY;
use super::bounding_box::BoundingBox;
use super::format::{require_image_size, BoxFormat, Extent, Format};
use super::space::ImageSize;
use crate::error::BBoxError;

/// Marker for the Albumentations format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Albumentations {}

/// An Albumentations box. Requires an image size.
pub type AlbumentationsBox = BoundingBox<Albumentations>;

impl Format for Albumentations {
    type Value = f64;

    const KIND: BoxFormat = BoxFormat::Albumentations;

    fn extent(values: &[f64; 4]) -> Extent {
        let [x_tl, y_tl, x_br, y_br] = *values;
        Extent {
            x_tl,
            y_tl,
            x_br,
            y_br,
        }
    }

    fn to_canonical(
        values: &[f64; 4],
        image_size: Option<ImageSize>,
    ) -> Result<BBoxXYXY, BBoxError> {
        let (image_w, image_h) = require_image_size(Self::KIND, image_size, "conversion")?.dims();
        let [x_tl, y_tl, x_br, y_br] = *values;
        Ok(BBoxXYXY::from_f64_corners(
            x_tl * image_w,
            y_tl * image_h,
            x_br * image_w,
            y_br * image_h,
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
            bbox.x_br as f64 / image_w,
            bbox.y_br as f64 / image_h,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::{BoxOptions, OobState};

    #[test]
    fn test_albumentations_to_canonical() {
        let albu = AlbumentationsBox::new(
            [0.4, 0.4, 0.6, 0.6],
            BoxOptions::with_image_size(100, 100),
        )
        .unwrap();
        assert_eq!(*albu.canonical(), BBoxXYXY::new(40, 40, 60, 60));
        assert_eq!(albu.to_center_xywh().unwrap().values(), [50.0, 50.0, 20.0, 20.0]);
    }

    #[test]
    fn test_albumentations_clamp() {
        let albu = AlbumentationsBox::new(
            [-0.1, 0.5, 0.5, 1.25],
            BoxOptions::with_image_size(200, 100),
        )
        .unwrap();
        assert_eq!(albu.oob(), OobState::OutOfBounds);

        let clamped = albu.clamp().unwrap();
        assert_eq!(*clamped.canonical(), BBoxXYXY::new(0, 50, 100, 100));
        assert_eq!(clamped.values(), [0.0, 0.5, 0.5, 1.0]);
        assert_eq!(clamped.oob(), OobState::InBounds);
    }

    #[test]
    fn test_albumentations_inverted_corners() {
        let err = AlbumentationsBox::new([0.6, 0.4, 0.4, 0.6], BoxOptions::with_image_size(10, 10));
        assert!(matches!(err, Err(BBoxError::InvalidCoordinates { .. })));
    }
}
