use std::path::Path;
use std::sync::Arc;

use log::info;

use super::classifier::{Classifier, CLASS_LABELS};
use super::error::ClassifierError;
use super::predictor::{OnnxPredictor, Predictor};
use super::preprocess::PreprocessConfig;
use crate::runtime::RuntimeConfig;

/// A builder for constructing a Classifier with a fluent interface.
#[derive(Default, Debug)]
pub struct ClassifierBuilder {
    model_path: Option<String>,
    predictor: Option<Arc<dyn Predictor>>,
    runtime_config: RuntimeConfig,
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance with default configuration
    pub fn new() -> Self {
        Self {
            model_path: None,
            predictor: None,
            runtime_config: RuntimeConfig::default(),
        }
    }

    /// Sets the runtime configuration for ONNX model execution.
    ///
    /// Only affects models loaded by a later call to [`with_model`](Self::with_model).
    ///
    /// # Example
    /// ```
    /// use oralscan::{ClassifierBuilder, RuntimeConfig};
    ///
    /// let config = RuntimeConfig { intra_threads: 4, ..RuntimeConfig::default() };
    /// let builder = ClassifierBuilder::new()
    ///     .with_runtime_config(config);
    /// ```
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Loads the ONNX model artifact at `model_path`.
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful, or an error if:
    ///   - The path is empty
    ///   - A model or predictor is already set
    ///   - The file doesn't exist or failed to load
    ///   - The model structure is invalid
    pub fn with_model(mut self, model_path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let model_path = model_path.as_ref();
        if model_path.as_os_str().is_empty() {
            return Err(ClassifierError::Build("Model path cannot be empty".to_string()));
        }
        if self.predictor.is_some() {
            return Err(ClassifierError::Build("Model already set".to_string()));
        }

        let predictor = OnnxPredictor::from_file(model_path, &self.runtime_config)?;
        info!("Model loaded successfully");

        self.model_path = Some(model_path.to_string_lossy().to_string());
        self.predictor = Some(Arc::new(predictor));
        Ok(self)
    }

    /// Uses an already constructed predictor instead of loading a model file.
    ///
    /// This is how alternative inference backends, and test doubles, are
    /// plugged in.
    pub fn with_predictor(mut self, predictor: Arc<dyn Predictor>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    /// Builds and returns the final Classifier instance
    ///
    /// # Returns
    /// * `Result<Classifier, ClassifierError>` - The constructed Classifier if successful, or an error if:
    ///   - No model or predictor has been set
    ///   - The predictor declares a number of outputs different from the label count
    pub fn build(self) -> Result<Classifier, ClassifierError> {
        let predictor = self
            .predictor
            .ok_or_else(|| ClassifierError::Build("A model or predictor must be set".to_string()))?;

        let labels: Vec<String> = CLASS_LABELS.iter().map(|label| label.to_string()).collect();
        if let Some(outputs) = predictor.output_len() {
            if outputs != labels.len() {
                return Err(ClassifierError::Build(format!(
                    "Model produces {} scores but there are {} class labels",
                    outputs,
                    labels.len()
                )));
            }
        }

        Ok(Classifier {
            model_path: self.model_path,
            predictor,
            labels: Arc::new(labels),
            preprocess: PreprocessConfig::default(),
        })
    }
}
