//! The format contract every box convention implements.
//!
//! A format only knows how to go to and from the canonical box
//! ([`BBoxXYXY`]) and how to describe its own extent for validation.
//! Everything else (cross-format conversion, transforms, geometry) is
//! written once on [`BoundingBox`](super::BoundingBox).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bbox::{BBoxXYXY, COORD_LIMIT};
use super::space::ImageSize;
use crate::error::BBoxError;

/// Names of the supported box formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxFormat {
    /// Absolute corners `(x_tl, y_tl, x_br, y_br)`.
    Voc,
    /// Absolute top-left and size `(x_tl, y_tl, w, h)`.
    Coco,
    /// Absolute center and size `(x_c, y_c, w, h)`.
    CenterXywh,
    /// Normalized center and size `(x_c, y_c, w, h)`.
    Yolo,
    /// Normalized corners `(x_tl, y_tl, x_br, y_br)`.
    Albumentations,
    /// Normalized top-left and size `(x_tl, y_tl, w, h)`.
    Fiftyone,
}

impl BoxFormat {
    /// Every supported format, in a stable order.
    pub const ALL: [BoxFormat; 6] = [
        BoxFormat::Voc,
        BoxFormat::Coco,
        BoxFormat::CenterXywh,
        BoxFormat::Yolo,
        BoxFormat::Albumentations,
        BoxFormat::Fiftyone,
    ];

    /// The canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            BoxFormat::Voc => "voc",
            BoxFormat::Coco => "coco",
            BoxFormat::CenterXywh => "center_xywh",
            BoxFormat::Yolo => "yolo",
            BoxFormat::Albumentations => "albumentations",
            BoxFormat::Fiftyone => "fiftyone",
        }
    }

    /// Whether values are fractions of the image size.
    pub fn is_normalized(&self) -> bool {
        matches!(
            self,
            BoxFormat::Yolo | BoxFormat::Albumentations | BoxFormat::Fiftyone
        )
    }

    /// Whether boxes of this format cannot exist without an image size.
    pub fn requires_image_size(&self) -> bool {
        !matches!(self, BoxFormat::Voc | BoxFormat::Coco)
    }
}

impl fmt::Display for BoxFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoxFormat {
    type Err = BBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "voc" | "pascal_voc" | "xyxy" => Ok(BoxFormat::Voc),
            "coco" | "xywh" => Ok(BoxFormat::Coco),
            "center_xywh" | "centerxywh" | "cxcywh" => Ok(BoxFormat::CenterXywh),
            "yolo" => Ok(BoxFormat::Yolo),
            "albumentations" => Ok(BoxFormat::Albumentations),
            "fiftyone" => Ok(BoxFormat::Fiftyone),
            other => Err(BBoxError::UnsupportedFormat(format!(
                "'{}' (supported: voc, coco, center_xywh, yolo, albumentations, fiftyone)",
                other
            ))),
        }
    }
}

/// Scalar type of a format's four values.
///
/// Absolute formats hold whole pixels (`i64`); normalized formats and
/// the center format hold `f64`.
pub trait BoxValue: Copy + PartialEq + fmt::Debug + Serialize {
    /// Type correction from raw input.
    fn from_f64(raw: f64) -> Result<Self, BBoxError>;

    fn to_f64(self) -> f64;

    /// Writes the value the way box listings show it.
    fn write_value(self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl BoxValue for i64 {
    fn from_f64(raw: f64) -> Result<Self, BBoxError> {
        if !raw.is_finite() || raw.fract() != 0.0 {
            return Err(BBoxError::invalid_value(format!(
                "expected a whole pixel value, got {raw}"
            )));
        }
        if raw.abs() >= COORD_LIMIT as f64 {
            return Err(BBoxError::invalid_value(format!(
                "pixel value {raw} is outside ±{COORD_LIMIT}"
            )));
        }
        Ok(raw as i64)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn write_value(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl BoxValue for f64 {
    fn from_f64(raw: f64) -> Result<Self, BBoxError> {
        if !raw.is_finite() {
            return Err(BBoxError::invalid_value(format!(
                "expected a finite number, got {raw}"
            )));
        }
        Ok(raw)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    fn write_value(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:.4}")
    }
}

/// Box extent in a format's own units, before any rounding.
///
/// Absolute formats report pixels, normalized formats report fractions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub x_tl: f64,
    pub y_tl: f64,
    pub x_br: f64,
    pub y_br: f64,
}

impl Extent {
    #[inline]
    pub fn width(&self) -> f64 {
        self.x_br - self.x_tl
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_br - self.y_tl
    }

    pub(crate) fn is_finite(&self) -> bool {
        [self.x_tl, self.y_tl, self.x_br, self.y_br]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// A box convention.
///
/// Implementors are uninhabited marker types; boxes of the format are
/// [`BoundingBox<Self>`](super::BoundingBox).
pub trait Format {
    type Value: BoxValue;

    const KIND: BoxFormat;

    /// Extent of `values` used by boundary validation.
    fn extent(values: &[Self::Value; 4]) -> Extent;

    /// Forward math to canonical corners.
    ///
    /// `image_size` is always present for formats that require it.
    fn to_canonical(
        values: &[Self::Value; 4],
        image_size: Option<ImageSize>,
    ) -> Result<BBoxXYXY, BBoxError>;

    /// Inverse of [`Format::to_canonical`].
    fn from_canonical(
        bbox: &BBoxXYXY,
        image_size: Option<ImageSize>,
    ) -> Result<[Self::Value; 4], BBoxError>;
}

/// Unwraps the image size for formats that cannot work without one.
pub(crate) fn require_image_size(
    format: BoxFormat,
    image_size: Option<ImageSize>,
    operation: &'static str,
) -> Result<ImageSize, BBoxError> {
    image_size.ok_or(BBoxError::MissingContext { format, operation })
}
