mod common;

use std::sync::Arc;
use std::thread;

use image::ImageFormat;
use tokio_test::assert_ok;

use common::{classifier_with, solid_image, ChannelMeanPredictor, FixedPredictor};
use oralscan::{Classifier, ClassifierError, CLASS_LABELS};

#[test]
fn test_red_square_pipeline() {
    let classifier = classifier_with(ChannelMeanPredictor);
    let png = solid_image(50, 50, [255, 0, 0], ImageFormat::Png);

    let prediction = assert_ok!(classifier.classify_bytes(&png));
    assert_eq!(prediction.label, "OSCC");
    assert_eq!(prediction.probabilities.len(), CLASS_LABELS.len());
    let total: f32 = prediction.probabilities.iter().sum();
    assert!((total - 1.0).abs() < 1e-5);
}

#[test]
fn test_confidence_matches_max_probability() {
    let classifier = classifier_with(FixedPredictor(vec![0.3, -1.2, 2.4]));
    let png = solid_image(5, 5, [0, 0, 0], ImageFormat::Png);

    let prediction = classifier.classify_bytes(&png).unwrap();
    let max = prediction.probabilities.iter().copied().fold(f32::MIN, f32::max);
    assert_eq!(prediction.label, "without_dysplasia");
    assert!((prediction.confidence - f64::from(max)).abs() <= 0.00005 + 1e-9);
    assert!((0.0..=1.0).contains(&prediction.confidence));
}

#[test]
fn test_tall_image_is_accepted() {
    let classifier = classifier_with(ChannelMeanPredictor);
    let png = solid_image(100, 400, [0, 255, 0], ImageFormat::Png);
    let prediction = classifier.classify_bytes(&png).unwrap();
    assert_eq!(prediction.label, "with_dysplasia");
}

#[test]
fn test_non_finite_scores() {
    let classifier = classifier_with(FixedPredictor(vec![f32::NAN, 0.0, 0.0]));
    let png = solid_image(5, 5, [0, 0, 0], ImageFormat::Png);
    assert!(matches!(
        classifier.classify_bytes(&png),
        Err(ClassifierError::Postprocess(_))
    ));
}

#[test]
fn test_corrupt_bytes() {
    let classifier = classifier_with(ChannelMeanPredictor);
    let result = classifier.classify_bytes(b"not really a png");
    assert!(matches!(result, Err(ClassifierError::Decode(_))));
}

#[test]
fn test_determinism() {
    let classifier = classifier_with(ChannelMeanPredictor);
    let jpeg = solid_image(64, 21, [10, 140, 220], ImageFormat::Jpeg);
    let first = classifier.classify_bytes(&jpeg).unwrap();
    let second = classifier.classify_bytes(&jpeg).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_thread_safety() {
    let classifier: Arc<Classifier> = classifier_with(ChannelMeanPredictor);
    let png = Arc::new(solid_image(30, 30, [255, 0, 0], ImageFormat::Png));
    let mut handles = vec![];

    for _ in 0..3 {
        let classifier = Arc::clone(&classifier);
        let png = Arc::clone(&png);
        handles.push(thread::spawn(move || {
            let prediction = classifier.classify_bytes(&png).unwrap();
            assert_eq!(prediction.label, "OSCC");
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_missing_model_is_fatal() {
    let result = Classifier::builder().with_model("app/model/missing.onnx");
    assert!(matches!(result, Err(ClassifierError::Model(_))));
}
