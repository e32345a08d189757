//! Criterion microbenches for bboxes conversion and geometry.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Single-box conversion through the canonical box (to_yolo, AnyBox::convert)
//! - Pairwise IoU on canonical boxes
//! - Batch construction from nested JSON (AnyBox::from_nested)

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use bboxes::boxes::{AnyBox, BBoxXYXY, BoxFormat, BoxOptions, VocBox};

const BATCH_SIZE: usize = 1_000;

fn options() -> BoxOptions {
    BoxOptions::with_image_size(1920, 1080)
}

/// Benchmark statically typed conversion.
fn bench_convert_typed(c: &mut Criterion) {
    let voc = VocBox::new([100, 200, 400, 600], options()).unwrap();
    let mut group = c.benchmark_group("convert");

    group.bench_function("voc_to_yolo", |b| {
        b.iter(|| {
            let yolo = black_box(&voc).to_yolo().unwrap();
            black_box(yolo)
        })
    });

    group.finish();
}

/// Benchmark runtime-dispatched conversion across every target format.
fn bench_convert_dynamic(c: &mut Criterion) {
    let source = AnyBox::from_raw(BoxFormat::Voc, [100.0, 200.0, 400.0, 600.0], options()).unwrap();
    let mut group = c.benchmark_group("convert");
    group.throughput(Throughput::Elements(BoxFormat::ALL.len() as u64));

    group.bench_function("any_to_all_formats", |b| {
        b.iter(|| {
            for format in BoxFormat::ALL {
                black_box(black_box(&source).convert(format).unwrap());
            }
        })
    });

    group.finish();
}

/// Benchmark IoU over a grid of overlapping boxes.
fn bench_iou(c: &mut Criterion) {
    let boxes: Vec<BBoxXYXY> = (0..100)
        .map(|i| BBoxXYXY::new(i * 5, i * 3, i * 5 + 80, i * 3 + 60))
        .collect();
    let mut group = c.benchmark_group("geometry");
    group.throughput(Throughput::Elements((boxes.len() * boxes.len()) as u64));

    group.bench_function("iou_pairwise", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for a in &boxes {
                for other in &boxes {
                    total += a.iou(black_box(other));
                }
            }
            black_box(total)
        })
    });

    group.finish();
}

/// Benchmark batch construction from a nested JSON array.
///
/// The JSON is parsed once up front so only box construction is measured.
fn bench_from_nested(c: &mut Criterion) {
    let rows: Vec<[f64; 4]> = (0..BATCH_SIZE)
        .map(|i| {
            let x = (i % 100) as f64 * 0.009;
            let y = (i / 100) as f64 * 0.09;
            [x, y, x + 0.05, y + 0.05]
        })
        .collect();
    let value = serde_json::to_value(&rows).unwrap();

    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(BATCH_SIZE as u64));

    group.bench_function("albumentations_from_nested", |b| {
        b.iter(|| {
            let batch =
                AnyBox::from_nested(BoxFormat::Albumentations, black_box(&value), options())
                    .unwrap();
            black_box(batch)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_convert_typed,
    bench_convert_dynamic,
    bench_iou,
    bench_from_nested
);
criterion_main!(benches);
