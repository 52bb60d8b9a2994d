mod error;
mod utils;
#[allow(clippy::module_inception)]
mod classifier;
pub mod builder;
pub mod predictor;
pub mod preprocess;

pub use error::ClassifierError;
pub use classifier::{Classifier, Prediction, CLASS_LABELS};
pub use builder::ClassifierBuilder;
pub use predictor::{OnnxPredictor, Predictor};
pub use preprocess::PreprocessConfig;

/// Information about the current state and configuration of a classifier
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Path to the ONNX model file, if the classifier was built from one
    pub model_path: Option<String>,
    /// Number of classes the model distinguishes
    pub num_classes: usize,
    /// Labels of the classes, in model output order
    pub class_labels: Vec<String>,
    /// Shape of the tensor fed to the model
    pub input_shape: [usize; 4],
}
