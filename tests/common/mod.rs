#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use ndarray::{Array4, Axis};
use oralscan::{Classifier, ClassifierError, Predictor};

/// Scores each class with the mean of the matching color channel, so the
/// dominant color of the image decides the label.
#[derive(Debug)]
pub struct ChannelMeanPredictor;

impl Predictor for ChannelMeanPredictor {
    fn predict(&self, input: Array4<f32>) -> Result<Vec<f32>, ClassifierError> {
        assert_eq!(input.shape(), &[1, 3, 224, 224]);
        Ok(input
            .axis_iter(Axis(1))
            .map(|channel| channel.mean().unwrap_or(0.0))
            .collect())
    }

    fn output_len(&self) -> Option<usize> {
        Some(3)
    }
}

/// Always fails the forward pass.
#[derive(Debug)]
pub struct BrokenPredictor;

impl Predictor for BrokenPredictor {
    fn predict(&self, _input: Array4<f32>) -> Result<Vec<f32>, ClassifierError> {
        Err(ClassifierError::Inference("backend unavailable".into()))
    }
}

/// Returns a fixed score vector regardless of input.
#[derive(Debug)]
pub struct FixedPredictor(pub Vec<f32>);

impl Predictor for FixedPredictor {
    fn predict(&self, _input: Array4<f32>) -> Result<Vec<f32>, ClassifierError> {
        Ok(self.0.clone())
    }
}

pub fn classifier_with(predictor: impl Predictor + 'static) -> Arc<Classifier> {
    Arc::new(
        Classifier::builder()
            .with_predictor(Arc::new(predictor))
            .build()
            .expect("Failed to create classifier"),
    )
}

pub fn solid_image(width: u32, height: u32, color: [u8; 3], format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
        .write_to(&mut Cursor::new(&mut bytes), format)
        .expect("Failed to encode test image");
    bytes
}
