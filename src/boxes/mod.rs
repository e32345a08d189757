//! Bounding boxes in every supported convention.
//!
//! All conversions pass through one canonical representation,
//! [`BBoxXYXY`] (absolute integer corners), so each format only has to
//! know how to reach it and come back. Adding a format is one
//! [`Format`] impl, not one converter per existing format.
//!
//! # Design Principles
//!
//! 1. **Canonical hub**: format boxes derive their canonical corners at
//!    construction; conversions, geometry and transforms all go through it.
//!
//! 2. **Validated construction**: a [`BoundingBox`] only exists if its
//!    values passed validation. Boxes outside the image are either
//!    rejected (`strict`) or flagged through [`OobState`].
//!
//! 3. **No mutation**: transforms return new boxes; assign the result
//!    back to keep "in place" semantics.
//!
//! # Example
//!
//! ```
//! use bboxes::boxes::{BoxOptions, CenterXywhBox, OobState};
//!
//! let opts = BoxOptions::with_image_size(100, 100);
//! let center = CenterXywhBox::new([50.0, 50.0, 20.0, 20.0], opts).unwrap();
//! assert_eq!(center.canonical().corners(), [40, 40, 60, 60]);
//!
//! let albu = center.to_albumentations().unwrap();
//! assert_eq!(albu.values(), [0.4, 0.4, 0.6, 0.6]);
//!
//! let oob = CenterXywhBox::new([95.0, 95.0, 20.0, 20.0], opts).unwrap();
//! assert_eq!(oob.oob(), OobState::OutOfBounds);
//! let clamped = oob.clamp().unwrap();
//! assert_eq!(clamped.canonical().corners(), [85, 85, 100, 100]);
//! ```

mod albumentations;
mod any;
mod batch;
mod bbox;
mod bounding_box;
mod center_xywh;
mod coco;
mod coord;
mod fiftyone;
mod format;
mod space;
mod validate;
mod voc;
mod yolo;

// Re-export core types for convenient access
pub use albumentations::{Albumentations, AlbumentationsBox};
pub use any::AnyBox;
pub use batch::{flatten_nested, BoxBatch};
pub use bbox::{BBoxXYXY, COORD_LIMIT};
pub use bounding_box::BoundingBox;
pub use center_xywh::{CenterXywh, CenterXywhBox};
pub use coco::{Coco, CocoBox};
pub use coord::Coord;
pub use fiftyone::{Fiftyone, FiftyoneBox};
pub use format::{BoxFormat, BoxValue, Extent, Format};
pub use space::{BoxOptions, ImageSize, OobState};
pub use voc::{Voc, VocBox};
pub use yolo::{Yolo, YoloBox};
