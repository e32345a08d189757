//! Image context shared by format boxes.
//!
//! The image size is read-only context: it feeds normalization math and
//! boundary checks, and is never owned by the canonical box.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bbox::BBoxXYXY;
use crate::error::BBoxError;

/// Image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The full image as a canonical box anchored at the origin.
    #[inline]
    pub fn frame(&self) -> BBoxXYXY {
        BBoxXYXY::new(0, 0, i64::from(self.width), i64::from(self.height))
    }

    /// Whether either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub(crate) fn dims(&self) -> (f64, f64) {
        (f64::from(self.width), f64::from(self.height))
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `WIDTHxHEIGHT` (also accepts `WIDTH,HEIGHT`).
impl FromStr for ImageSize {
    type Err = BBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X', ','])
            .ok_or_else(|| BBoxError::invalid_value(format!("image size '{s}' is not WxH")))?;
        let parse = |part: &str| {
            part.trim().parse::<u32>().map_err(|_| {
                BBoxError::invalid_value(format!("image size '{s}' has a non-integer dimension"))
            })
        };
        let size = ImageSize::new(parse(w)?, parse(h)?);
        if size.is_empty() {
            return Err(BBoxError::invalid_value(format!(
                "image size '{s}' must have non-zero width and height"
            )));
        }
        Ok(size)
    }
}

/// Whether a box lies within its image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OobState {
    /// No image size was given, so bounds were not checked.
    #[default]
    Unknown,
    InBounds,
    /// Accepted despite exceeding the image; only reachable without `strict`.
    OutOfBounds,
}

impl fmt::Display for OobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OobState::Unknown => "unknown",
            OobState::InBounds => "in-bounds",
            OobState::OutOfBounds => "out-of-bounds",
        };
        f.write_str(s)
    }
}

/// Construction context for format boxes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoxOptions {
    /// Size of the image the box belongs to, if known.
    pub image_size: Option<ImageSize>,

    /// Reject boxes that leave the image instead of flagging them.
    pub strict: bool,
}

impl BoxOptions {
    /// Options carrying an image size, non-strict.
    pub fn with_image_size(width: u32, height: u32) -> Self {
        Self {
            image_size: Some(ImageSize::new(width, height)),
            strict: false,
        }
    }

    /// Returns a copy with the strict flag set.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
