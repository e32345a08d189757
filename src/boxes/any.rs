//! Runtime-selected format boxes.
//!
//! [`AnyBox`] is for callers that only learn the format at runtime (the
//! CLI, batch input tagged by name). Every method dispatches with an
//! exhaustive match, so adding a [`BoxFormat`] variant fails to compile
//! until it is handled here.

use std::fmt;

use super::bbox::BBoxXYXY;
use super::format::{BoxFormat, BoxValue, Format};
use super::space::{BoxOptions, ImageSize, OobState};
use super::{
    Albumentations, AlbumentationsBox, CenterXywh, CenterXywhBox, Coco, CocoBox, Fiftyone,
    FiftyoneBox, Voc, VocBox, Yolo, YoloBox,
};
use crate::error::BBoxError;

/// A format box whose format is chosen at runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnyBox {
    Voc(VocBox),
    Coco(CocoBox),
    CenterXywh(CenterXywhBox),
    Yolo(YoloBox),
    Albumentations(AlbumentationsBox),
    Fiftyone(FiftyoneBox),
}

/// Evaluates `$body` with `$b` bound to the inner box of any variant.
macro_rules! with_box {
    ($any:expr, $b:ident => $body:expr) => {
        match $any {
            AnyBox::Voc($b) => $body,
            AnyBox::Coco($b) => $body,
            AnyBox::CenterXywh($b) => $body,
            AnyBox::Yolo($b) => $body,
            AnyBox::Albumentations($b) => $body,
            AnyBox::Fiftyone($b) => $body,
        }
    };
}

/// Like `with_box!`, rewrapping a `Result<BoundingBox<_>, _>` into the
/// variant it came from.
macro_rules! map_box {
    ($any:expr, $b:ident => $body:expr) => {
        match $any {
            AnyBox::Voc($b) => $body.map(AnyBox::Voc),
            AnyBox::Coco($b) => $body.map(AnyBox::Coco),
            AnyBox::CenterXywh($b) => $body.map(AnyBox::CenterXywh),
            AnyBox::Yolo($b) => $body.map(AnyBox::Yolo),
            AnyBox::Albumentations($b) => $body.map(AnyBox::Albumentations),
            AnyBox::Fiftyone($b) => $body.map(AnyBox::Fiftyone),
        }
    };
}

impl AnyBox {
    /// Builds a box of `format` from untyped values.
    pub fn from_raw(
        format: BoxFormat,
        raw: [f64; 4],
        options: BoxOptions,
    ) -> Result<AnyBox, BBoxError> {
        Ok(match format {
            BoxFormat::Voc => AnyBox::Voc(VocBox::from_raw(raw, options)?),
            BoxFormat::Coco => AnyBox::Coco(CocoBox::from_raw(raw, options)?),
            BoxFormat::CenterXywh => AnyBox::CenterXywh(CenterXywhBox::from_raw(raw, options)?),
            BoxFormat::Yolo => AnyBox::Yolo(YoloBox::from_raw(raw, options)?),
            BoxFormat::Albumentations => {
                AnyBox::Albumentations(AlbumentationsBox::from_raw(raw, options)?)
            }
            BoxFormat::Fiftyone => AnyBox::Fiftyone(FiftyoneBox::from_raw(raw, options)?),
        })
    }

    /// Builds a box of `format` from canonical corners.
    pub fn from_canonical(
        format: BoxFormat,
        bbox: BBoxXYXY,
        options: BoxOptions,
    ) -> Result<AnyBox, BBoxError> {
        Ok(match format {
            BoxFormat::Voc => AnyBox::Voc(VocBox::from_canonical(bbox, options)?),
            BoxFormat::Coco => AnyBox::Coco(CocoBox::from_canonical(bbox, options)?),
            BoxFormat::CenterXywh => {
                AnyBox::CenterXywh(CenterXywhBox::from_canonical(bbox, options)?)
            }
            BoxFormat::Yolo => AnyBox::Yolo(YoloBox::from_canonical(bbox, options)?),
            BoxFormat::Albumentations => {
                AnyBox::Albumentations(AlbumentationsBox::from_canonical(bbox, options)?)
            }
            BoxFormat::Fiftyone => AnyBox::Fiftyone(FiftyoneBox::from_canonical(bbox, options)?),
        })
    }

    pub fn format(&self) -> BoxFormat {
        with_box!(self, b => b.format())
    }

    /// The format's values widened to `f64`.
    pub fn values(&self) -> [f64; 4] {
        with_box!(self, b => b.raw_values())
    }

    pub fn canonical(&self) -> &BBoxXYXY {
        with_box!(self, b => b.canonical())
    }

    pub fn options(&self) -> BoxOptions {
        with_box!(self, b => b.options())
    }

    pub fn image_size(&self) -> Option<ImageSize> {
        with_box!(self, b => b.image_size())
    }

    pub fn oob(&self) -> OobState {
        with_box!(self, b => b.oob())
    }

    pub fn width(&self) -> i64 {
        self.canonical().width()
    }

    pub fn height(&self) -> i64 {
        self.canonical().height()
    }

    pub fn area(&self) -> i64 {
        self.canonical().area()
    }

    /// Converts to `target` through the canonical box.
    pub fn convert(&self, target: BoxFormat) -> Result<AnyBox, BBoxError> {
        AnyBox::from_canonical(target, *self.canonical(), self.options())
    }

    /// Values in `target` format, without validating a target box.
    pub fn convert_values(&self, target: BoxFormat) -> Result<[f64; 4], BBoxError> {
        fn widen<G: Format>(b: &AnyBox) -> Result<[f64; 4], BBoxError> {
            let values = with_box!(b, inner => inner.convert_values::<G>())?;
            Ok(values.map(|v| v.to_f64()))
        }

        match target {
            BoxFormat::Voc => widen::<Voc>(self),
            BoxFormat::Coco => widen::<Coco>(self),
            BoxFormat::CenterXywh => widen::<CenterXywh>(self),
            BoxFormat::Yolo => widen::<Yolo>(self),
            BoxFormat::Albumentations => widen::<Albumentations>(self),
            BoxFormat::Fiftyone => widen::<Fiftyone>(self),
        }
    }

    pub fn clamp(&self) -> Result<AnyBox, BBoxError> {
        map_box!(self, b => b.clamp())
    }

    pub fn scale(&self, factor: f64) -> Result<AnyBox, BBoxError> {
        map_box!(self, b => b.scale(factor))
    }

    pub fn shift(&self, dx: f64, dy: f64) -> Result<AnyBox, BBoxError> {
        map_box!(self, b => b.shift(dx, dy))
    }

    pub fn distance_from_center(&self) -> Result<i64, BBoxError> {
        with_box!(self, b => b.distance_from_center())
    }

    pub fn intersection(&self, other: &AnyBox) -> i64 {
        self.canonical().intersection(other.canonical())
    }

    pub fn union(&self, other: &AnyBox) -> i64 {
        self.canonical().union(other.canonical())
    }

    pub fn iou(&self, other: &AnyBox) -> f64 {
        self.canonical().iou(other.canonical())
    }

    pub fn distance(&self, other: &AnyBox) -> i64 {
        self.canonical().distance(other.canonical())
    }
}

impl fmt::Display for AnyBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_box!(self, b => fmt::Display::fmt(b, f))
    }
}

macro_rules! any_box_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for AnyBox {
                fn from(bbox: $ty) -> Self {
                    AnyBox::$variant(bbox)
                }
            }
        )*
    };
}

any_box_from!(
    VocBox => Voc,
    CocoBox => Coco,
    CenterXywhBox => CenterXywh,
    YoloBox => Yolo,
    AlbumentationsBox => Albumentations,
    FiftyoneBox => Fiftyone,
);
