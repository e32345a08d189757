#![allow(dead_code)]

use bboxes::boxes::{BBoxXYXY, BoxFormat, ImageSize};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(256);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_format() -> BoxedStrategy<BoxFormat> {
    proptest::sample::select(BoxFormat::ALL.to_vec()).boxed()
}

pub fn arb_image_size() -> BoxedStrategy<ImageSize> {
    (2u32..=4096, 2u32..=4096)
        .prop_map(|(w, h)| ImageSize::new(w, h))
        .boxed()
}

/// A box with positive size lying inside `image_size`.
pub fn arb_bbox_within(image_size: ImageSize) -> BoxedStrategy<BBoxXYXY> {
    let w = i64::from(image_size.width);
    let h = i64::from(image_size.height);
    (0..w, 0..h)
        .prop_flat_map(move |(x_tl, y_tl)| {
            (
                Just(x_tl),
                Just(y_tl),
                (x_tl + 1)..=w,
                (y_tl + 1)..=h,
            )
        })
        .prop_map(|(x_tl, y_tl, x_br, y_br)| BBoxXYXY::new(x_tl, y_tl, x_br, y_br))
        .boxed()
}

/// An image together with a box that lies inside it.
pub fn arb_image_and_bbox() -> BoxedStrategy<(ImageSize, BBoxXYXY)> {
    arb_image_size()
        .prop_flat_map(|size| (Just(size), arb_bbox_within(size)))
        .boxed()
}

/// An image together with a box that overlaps it but may stick out of
/// any side.
pub fn arb_image_and_overlapping_bbox() -> BoxedStrategy<(ImageSize, BBoxXYXY)> {
    arb_image_and_bbox()
        .prop_flat_map(|(size, inner)| {
            (
                Just(size),
                Just(inner),
                0i64..=50,
                0i64..=50,
                0i64..=50,
                0i64..=50,
            )
        })
        .prop_map(|(size, inner, left, top, right, bottom)| {
            (
                size,
                BBoxXYXY::new(
                    inner.x_tl - left,
                    inner.y_tl - top,
                    inner.x_br + right,
                    inner.y_br + bottom,
                ),
            )
        })
        .boxed()
}

/// Any box with positive size, anywhere on the plane.
pub fn arb_bbox() -> BoxedStrategy<BBoxXYXY> {
    (-1000i64..1000, -1000i64..1000, 1i64..500, 1i64..500)
        .prop_map(|(x, y, w, h)| BBoxXYXY::new(x, y, x + w, y + h))
        .boxed()
}
