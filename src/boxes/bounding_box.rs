//! Format boxes: validated values of one convention plus their canonical box.

use std::fmt;
use std::marker::PhantomData;

use log::debug;

use super::bbox::BBoxXYXY;
use super::coord::Coord;
use super::format::{require_image_size, BoxFormat, BoxValue, Format};
use super::space::{BoxOptions, ImageSize, OobState};
use super::validate::{check_canonical, check_extent, check_image_size};
use super::{Albumentations, CenterXywh, Coco, Fiftyone, Voc, Yolo};
use crate::error::BBoxError;

/// A bounding box in format `F`.
///
/// Holds the four values in the format's own convention, the image
/// context, the out-of-bounds state and the canonical corners derived
/// at construction. Instances are immutable: conversions and transforms
/// produce new, fully validated boxes.
pub struct BoundingBox<F: Format> {
    values: [F::Value; 4],
    options: BoxOptions,
    oob: OobState,
    canonical: BBoxXYXY,
    _format: PhantomData<F>,
}

impl<F: Format> BoundingBox<F> {
    /// Validates `values` and derives the canonical box.
    ///
    /// # Errors
    /// - [`BBoxError::MissingContext`] if the format needs an image size
    ///   and `options` has none.
    /// - [`BBoxError::InvalidValue`] for an image with a zero dimension or
    ///   corners outside `±COORD_LIMIT`.
    /// - [`BBoxError::InvalidCoordinates`] for a non-positive width or height.
    /// - [`BBoxError::OutOfBounds`] for boundary violations in strict mode.
    pub fn new(values: [F::Value; 4], options: BoxOptions) -> Result<Self, BBoxError> {
        if F::KIND.requires_image_size() {
            require_image_size(F::KIND, options.image_size, "construction")?;
        }
        check_image_size(F::KIND, &options)?;
        let oob = check_extent(F::KIND, F::extent(&values), &options)?;
        let canonical = F::to_canonical(&values, options.image_size)?;
        check_canonical(F::KIND, &canonical)?;

        Ok(Self {
            values,
            options,
            oob,
            canonical,
            _format: PhantomData,
        })
    }

    /// Builds a box from untyped input, correcting value types first.
    ///
    /// Integer formats only accept whole numbers; float formats accept
    /// any finite number.
    pub fn from_raw(raw: [f64; 4], options: BoxOptions) -> Result<Self, BBoxError> {
        let values = [
            F::Value::from_f64(raw[0])?,
            F::Value::from_f64(raw[1])?,
            F::Value::from_f64(raw[2])?,
            F::Value::from_f64(raw[3])?,
        ];
        Self::new(values, options)
    }

    /// Rebuilds a box of this format from canonical corners.
    pub fn from_canonical(bbox: BBoxXYXY, options: BoxOptions) -> Result<Self, BBoxError> {
        if F::KIND.requires_image_size() {
            require_image_size(F::KIND, options.image_size, "conversion")?;
        }
        check_image_size(F::KIND, &options)?;
        check_canonical(F::KIND, &bbox)?;
        let values = F::from_canonical(&bbox, options.image_size)?;
        Self::new(values, options)
    }

    /// The format's own values.
    #[inline]
    pub fn values(&self) -> [F::Value; 4] {
        self.values
    }

    /// The values widened to `f64`.
    pub fn raw_values(&self) -> [f64; 4] {
        self.values.map(|v| v.to_f64())
    }

    #[inline]
    pub fn format(&self) -> BoxFormat {
        F::KIND
    }

    #[inline]
    pub fn image_size(&self) -> Option<ImageSize> {
        self.options.image_size
    }

    #[inline]
    pub fn options(&self) -> BoxOptions {
        self.options
    }

    /// Whether the box lies within its image.
    #[inline]
    pub fn oob(&self) -> OobState {
        self.oob
    }

    /// The canonical corners derived from this box.
    #[inline]
    pub fn canonical(&self) -> &BBoxXYXY {
        &self.canonical
    }

    #[inline]
    pub fn width(&self) -> i64 {
        self.canonical.width()
    }

    #[inline]
    pub fn height(&self) -> i64 {
        self.canonical.height()
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.canonical.area()
    }

    /// Converts to format `G` through the canonical box.
    ///
    /// The new box keeps this box's image size and strict flag, and is
    /// validated as a `G` box.
    pub fn convert<G: Format>(&self) -> Result<BoundingBox<G>, BBoxError> {
        debug!("converting {} box {} to {}", F::KIND, self.canonical, G::KIND);
        BoundingBox::<G>::from_canonical(self.canonical, self.options)
    }

    /// Values of this box in format `G`, without building a `G` box.
    pub fn convert_values<G: Format>(&self) -> Result<[G::Value; 4], BBoxError> {
        if G::KIND.requires_image_size() {
            require_image_size(G::KIND, self.options.image_size, "conversion")?;
        }
        G::from_canonical(&self.canonical, self.options.image_size)
    }

    pub fn to_voc(&self) -> Result<BoundingBox<Voc>, BBoxError> {
        self.convert()
    }

    pub fn to_coco(&self) -> Result<BoundingBox<Coco>, BBoxError> {
        self.convert()
    }

    pub fn to_center_xywh(&self) -> Result<BoundingBox<CenterXywh>, BBoxError> {
        self.convert()
    }

    pub fn to_yolo(&self) -> Result<BoundingBox<Yolo>, BBoxError> {
        self.convert()
    }

    pub fn to_albumentations(&self) -> Result<BoundingBox<Albumentations>, BBoxError> {
        self.convert()
    }

    pub fn to_fiftyone(&self) -> Result<BoundingBox<Fiftyone>, BBoxError> {
        self.convert()
    }

    /// Rebuilds this format from a transformed canonical box.
    fn rebuild(&self, op: &str, bbox: BBoxXYXY) -> Result<Self, BBoxError> {
        debug!("{} on {} box: {} -> {}", op, F::KIND, self.canonical, bbox);
        Self::from_canonical(bbox, self.options)
    }

    /// Clamps the box to the image borders.
    ///
    /// Returns an unchanged copy unless the box is out of bounds.
    pub fn clamp(&self) -> Result<Self, BBoxError> {
        if self.oob != OobState::OutOfBounds {
            return Ok(*self);
        }
        let image_size = require_image_size(F::KIND, self.options.image_size, "clamp")?;
        self.rebuild("clamp", self.canonical.clamp_to(image_size))
    }

    /// Scales width and height by `factor`, keeping the top-left corner fixed.
    pub fn scale(&self, factor: f64) -> Result<Self, BBoxError> {
        if !factor.is_finite() {
            return Err(BBoxError::invalid_value(format!(
                "scale factor must be finite, got {factor}"
            )));
        }
        self.rebuild("scale", self.canonical.scale(factor))
    }

    /// Shifts the box by `(dx, dy)` in the format's own units.
    ///
    /// Normalized formats take the amount as a fraction of the image
    /// size; every other format takes pixels.
    pub fn shift(&self, dx: f64, dy: f64) -> Result<Self, BBoxError> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(BBoxError::invalid_value(format!(
                "shift amount must be finite, got ({dx}, {dy})"
            )));
        }
        let (dx, dy) = if F::KIND.is_normalized() {
            let (width, height) =
                require_image_size(F::KIND, self.options.image_size, "shift")?.dims();
            (dx * width, dy * height)
        } else {
            (dx, dy)
        };
        self.rebuild("shift", self.canonical.shift(dx, dy))
    }

    /// Distance from the box center to the image center, in whole pixels.
    pub fn distance_from_center(&self) -> Result<i64, BBoxError> {
        let (width, height) =
            require_image_size(F::KIND, self.options.image_size, "distance_from_center")?.dims();
        let image_center = Coord::new(width / 2.0, height / 2.0);
        Ok(self.canonical.center().rounded_distance(&image_center))
    }

    pub fn intersection<G: Format>(&self, other: &BoundingBox<G>) -> i64 {
        self.canonical.intersection(other.canonical())
    }

    pub fn union<G: Format>(&self, other: &BoundingBox<G>) -> i64 {
        self.canonical.union(other.canonical())
    }

    pub fn iou<G: Format>(&self, other: &BoundingBox<G>) -> f64 {
        self.canonical.iou(other.canonical())
    }

    pub fn distance<G: Format>(&self, other: &BoundingBox<G>) -> i64 {
        self.canonical.distance(other.canonical())
    }
}

// Manual impls avoid `F: Clone`/`F: Debug` bounds on the marker type.
impl<F: Format> Clone for BoundingBox<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: Format> Copy for BoundingBox<F> {}

impl<F: Format> PartialEq for BoundingBox<F> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.options == other.options && self.oob == other.oob
    }
}

impl<F: Format> fmt::Debug for BoundingBox<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundingBox")
            .field("format", &F::KIND)
            .field("values", &self.values)
            .field("image_size", &self.options.image_size)
            .field("strict", &self.options.strict)
            .field("oob", &self.oob)
            .field("canonical", &self.canonical)
            .finish()
    }
}

/// `<[v1 v2 v3 v4] (WxH) | Image: (WxH)>`, with `?` for unknown image dimensions.
impl<F: Format> fmt::Display for BoundingBox<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            value.write_value(f)?;
        }
        write!(f, "] ({}x{}) | Image: ", self.width(), self.height())?;
        match self.options.image_size {
            Some(size) => write!(f, "({size})>"),
            None => f.write_str("(?x?)>"),
        }
    }
}
