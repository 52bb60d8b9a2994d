use std::io::Cursor;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use ndarray::Array4;
use oralscan::classifier::preprocess::{decode_image, to_input_tensor};
use oralscan::{Classifier, ClassifierError, Predictor, PreprocessConfig};

#[derive(Debug)]
struct ConstantPredictor;

impl Predictor for ConstantPredictor {
    fn predict(&self, _input: Array4<f32>) -> Result<Vec<f32>, ClassifierError> {
        Ok(vec![0.2, 1.4, -0.3])
    }
}

fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut bytes), format)
        .unwrap();
    bytes
}

fn bench_preprocessing(c: &mut Criterion) {
    let config = PreprocessConfig::default();
    let mut group = c.benchmark_group("Preprocessing");

    // Configure sampling
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    for &(name, width, height) in &[("small_64", 64, 64), ("camera_1280x960", 1280, 960)] {
        let png = encoded_image(width, height, ImageFormat::Png);
        let decoded = decode_image(&png).unwrap();

        group.bench_function(format!("decode_png/{}", name), |b| {
            b.iter(|| decode_image(black_box(&png)).unwrap())
        });
        group.bench_function(format!("to_tensor/{}", name), |b| {
            b.iter(|| to_input_tensor(black_box(&decoded), &config).unwrap())
        });
    }

    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let classifier = Classifier::builder()
        .with_predictor(Arc::new(ConstantPredictor))
        .build()
        .unwrap();
    let jpeg = encoded_image(640, 480, ImageFormat::Jpeg);

    let mut group = c.benchmark_group("Classification");
    group.sample_size(30);
    group.bench_function("jpeg_640x480_without_model", |b| {
        b.iter(|| classifier.classify_bytes(black_box(&jpeg)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_preprocessing, bench_end_to_end);
criterion_main!(benches);
