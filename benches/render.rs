//! Benchmarks for the filter pipeline.
//!
//! Measures a full-viewport render with every stage active, the identity
//! passthrough, and scaling a camera-sized source to the viewport.

use criterion::{criterion_group, criterion_main, Criterion};
use image::{Rgba, RgbaImage};
use photopost::prelude::*;
use std::hint::black_box;

fn sample_source(width: u32, height: u32) -> SourceImage {
    SourceImage::from_rgba(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 251) as u8, (y % 241) as u8, ((x ^ y) % 256) as u8, 255])
    }))
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let viewport = Viewport::default();
    let scaled = scale(&sample_source(750, 750), &viewport, &ScalingOptions::default()).unwrap();
    let pipeline = FilterPipeline::new();

    let all_stages = FilterParameters::identity()
        .with_saturation(1.4)
        .with_brightness(0.1)
        .with_blur_radius(3.0)
        .with_hue_angle(0.8)
        .with_sepia_intensity(0.5);

    group.bench_function("identity", |b| {
        b.iter(|| black_box(pipeline.render(&scaled, &FilterParameters::identity())));
    });

    group.bench_function("all_stages", |b| {
        b.iter(|| black_box(pipeline.render(&scaled, &all_stages)));
    });

    group.finish();
}

fn bench_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("scale");
    group.sample_size(20);

    let source = sample_source(3024, 4032);
    let viewport = Viewport::default().with_aspect_ratio(4.0 / 3.0);

    for filter in [ScaleFilter::Triangle, ScaleFilter::Lanczos3] {
        let options = ScalingOptions {
            filter,
            ..ScalingOptions::default()
        };
        group.bench_function(filter.to_string(), |b| {
            b.iter(|| black_box(scale(&source, &viewport, &options).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_scale);
criterion_main!(benches);
