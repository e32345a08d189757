//! Out-of-bounds validation policy shared by every format.

use log::warn;

use super::bbox::{BBoxXYXY, COORD_LIMIT};
use super::format::{BoxFormat, Extent};
use super::space::{BoxOptions, OobState};
use crate::error::BBoxError;

/// Slack for normalized bounds, so that a box rebuilt from canonical
/// pixels is not flagged over a last-bit rounding difference.
const NORMALIZED_TOLERANCE: f64 = 1e-9;

/// Applies the shared validation policy to a box extent.
///
/// 1. Width or height `<= 0` is rejected, strict or not.
/// 2. In strict mode a negative top-left is rejected.
/// 3. With a known frame, leaving it is rejected in strict mode and
///    recorded as [`OobState::OutOfBounds`] otherwise.
///
/// The frame is the image for absolute formats and the unit square for
/// normalized ones.
pub(crate) fn check_extent(
    format: BoxFormat,
    extent: Extent,
    options: &BoxOptions,
) -> Result<OobState, BBoxError> {
    if !extent.is_finite() {
        return Err(BBoxError::invalid_value(format!(
            "{format} box has non-finite coordinates"
        )));
    }

    let (width, height) = (extent.width(), extent.height());
    if width <= 0.0 || height <= 0.0 {
        return Err(BBoxError::InvalidCoordinates {
            format,
            message: format!("width and height must be greater than 0, got {width}x{height}"),
        });
    }

    let tolerance = if format.is_normalized() {
        NORMALIZED_TOLERANCE
    } else {
        0.0
    };
    let negative_top_left = extent.x_tl < -tolerance || extent.y_tl < -tolerance;

    if options.strict && negative_top_left {
        return Err(BBoxError::OutOfBounds {
            format,
            message: format!(
                "top-left point ({}, {}) is negative",
                extent.x_tl, extent.y_tl
            ),
        });
    }

    let Some((frame_w, frame_h)) = frame(format, options) else {
        return Ok(OobState::Unknown);
    };

    let exceeds = extent.x_br > frame_w + tolerance || extent.y_br > frame_h + tolerance;
    if negative_top_left || exceeds {
        if options.strict {
            return Err(BBoxError::OutOfBounds {
                format,
                message: format!(
                    "box ({}, {}, {}, {}) exceeds the {}x{} frame; pass strict = false to accept it",
                    extent.x_tl, extent.y_tl, extent.x_br, extent.y_br, frame_w, frame_h
                ),
            });
        }
        warn!(
            "accepting out-of-bounds {} box ({}, {}, {}, {})",
            format, extent.x_tl, extent.y_tl, extent.x_br, extent.y_br
        );
        return Ok(OobState::OutOfBounds);
    }

    Ok(OobState::InBounds)
}

/// Rejects an image size with a zero dimension.
pub(crate) fn check_image_size(format: BoxFormat, options: &BoxOptions) -> Result<(), BBoxError> {
    match options.image_size {
        Some(size) if size.is_empty() => Err(BBoxError::invalid_value(format!(
            "{format} box needs a non-empty image, got {size}"
        ))),
        _ => Ok(()),
    }
}

/// Rejects canonical corners outside `±COORD_LIMIT`.
pub(crate) fn check_canonical(format: BoxFormat, bbox: &BBoxXYXY) -> Result<(), BBoxError> {
    if bbox.in_range() {
        return Ok(());
    }
    Err(BBoxError::invalid_value(format!(
        "{format} box corners {bbox} exceed the supported range of ±{COORD_LIMIT}"
    )))
}

fn frame(format: BoxFormat, options: &BoxOptions) -> Option<(f64, f64)> {
    let size = options.image_size?;
    if format.is_normalized() {
        Some((1.0, 1.0))
    } else {
        Some(size.dims())
    }
}
