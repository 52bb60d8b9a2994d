use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde::Serialize;

use super::error::ClassifierError;
use super::predictor::Predictor;
use super::preprocess::{decode_image, to_input_tensor, PreprocessConfig};
use super::utils::{argmax, round_confidence, softmax};

/// Labels the model predicts, in output-vector order.
pub const CLASS_LABELS: [&str; 3] = ["OSCC", "with_dysplasia", "without_dysplasia"];

/// Result of classifying a single image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// The winning class label
    pub label: String,
    /// Probability of the winning class, rounded to 4 decimal places
    pub confidence: f64,
    /// Softmax output for every class, in label order
    pub probabilities: Vec<f32>,
}

/// A thread-safe image classifier.
///
/// Built once with [`Classifier::builder`] and shared through an `Arc`; it
/// holds no mutable state, so concurrent calls to [`Classifier::classify_bytes`]
/// need no locking.
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use oralscan::Classifier;
///
/// let classifier = Classifier::builder()
///     .with_model("app/model/model.onnx")?
///     .build()?;
///
/// let prediction = classifier.classify_file("lesion.jpg")?;
/// println!("{} ({:.4})", prediction.label, prediction.confidence);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Classifier {
    pub model_path: Option<String>,
    pub predictor: Arc<dyn Predictor>,
    pub labels: Arc<Vec<String>>,
    pub preprocess: PreprocessConfig,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Classifier>();
    }
};

impl Classifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> super::ClassifierInfo {
        super::ClassifierInfo {
            model_path: self.model_path.clone(),
            num_classes: self.labels.len(),
            class_labels: self.labels.as_ref().clone(),
            input_shape: self.preprocess.input_shape(),
        }
    }

    /// Classifies an encoded JPEG or PNG image.
    ///
    /// Runs decode, preprocess, inference and postprocess in order; the
    /// first stage to fail determines the error variant.
    ///
    /// # Errors
    /// - `Decode` if the bytes are not a decodable image
    /// - `Preprocess` if the image cannot be resized into the input tensor
    /// - `Inference` if the forward pass fails
    /// - `ShapeMismatch` if the model returns the wrong number of scores
    /// - `Postprocess` if the scores are not finite
    pub fn classify_bytes(&self, bytes: &[u8]) -> Result<Prediction, ClassifierError> {
        let image = decode_image(bytes)?;
        debug!("Decoded {}x{} image", image.width(), image.height());

        let input = to_input_tensor(&image, &self.preprocess)?;
        let logits = self.predictor.predict(input)?;
        self.postprocess(&logits)
    }

    /// Reads an image from disk and classifies it.
    pub fn classify_file(&self, path: impl AsRef<Path>) -> Result<Prediction, ClassifierError> {
        let bytes = std::fs::read(path)?;
        self.classify_bytes(&bytes)
    }

    fn postprocess(&self, logits: &[f32]) -> Result<Prediction, ClassifierError> {
        if logits.len() != self.labels.len() {
            return Err(ClassifierError::ShapeMismatch {
                expected: self.labels.len(),
                actual: logits.len(),
            });
        }

        let probabilities = softmax(logits)?;
        let best = argmax(&probabilities)
            .ok_or_else(|| ClassifierError::Postprocess("No probabilities to rank".into()))?;

        Ok(Prediction {
            label: self.labels[best].clone(),
            confidence: round_confidence(probabilities[best]),
            probabilities,
        })
    }
}
