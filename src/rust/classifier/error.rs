use ort::Error as OrtError;

/// Represents the different types of errors that can occur while loading the
/// model or classifying an image.
///
/// Each pipeline stage reports its own variant, so callers can match on the
/// stage that failed.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// Error occurred while loading or validating the ONNX model
    #[error("Model error: {0}")]
    Model(String),
    /// Error occurred during the build phase
    #[error("Build error: {0}")]
    Build(String),
    /// The image bytes could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
    /// The decoded image could not be turned into an input tensor
    #[error("Preprocess error: {0}")]
    Preprocess(String),
    /// The forward pass failed
    #[error("Inference error: {0}")]
    Inference(String),
    /// The model returned a score vector that does not line up with the labels
    #[error("Shape mismatch: expected {expected} scores, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    /// The scores could not be turned into a probability distribution
    #[error("Postprocess error: {0}")]
    Postprocess(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<OrtError> for ClassifierError {
    fn from(err: OrtError) -> Self {
        ClassifierError::Model(err.to_string())
    }
}

impl From<image::ImageError> for ClassifierError {
    fn from(err: image::ImageError) -> Self {
        ClassifierError::Decode(err.to_string())
    }
}
