use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use log::info;
use ndarray::Array4;
use ort::session::Session;
use ort::value::Tensor;

use super::error::ClassifierError;
use super::preprocess::PreprocessConfig;
use crate::runtime::{create_session_builder, RuntimeConfig};

/// Maps a preprocessed `(1, 3, H, W)` batch to one raw score per class.
///
/// The forward pass must be a pure function of the input: implementations
/// hold no mutable state, so a single instance can serve concurrent callers.
pub trait Predictor: Send + Sync + fmt::Debug {
    /// Runs the forward pass and returns the unnormalized logits.
    fn predict(&self, input: Array4<f32>) -> Result<Vec<f32>, ClassifierError>;

    /// Number of scores the predictor produces, when known before running it.
    fn output_len(&self) -> Option<usize> {
        None
    }
}

/// A [`Predictor`] backed by an ONNX Runtime session.
///
/// The graph is expected to:
/// - Accept exactly one float input of shape `[batch, 3, 224, 224]`
/// - Produce logits of shape `[batch, num_classes]` as its first output
///
/// ONNX Runtime only ever executes in inference mode, so there is no
/// training-time behavior (dropout, batch statistics updates) to switch off.
pub struct OnnxPredictor {
    session: Session,
    input_name: String,
    output_len: Option<usize>,
    model_path: PathBuf,
}

impl fmt::Debug for OnnxPredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnnxPredictor")
            .field("model_path", &self.model_path)
            .field("input_name", &self.input_name)
            .field("output_len", &self.output_len)
            .finish()
    }
}

impl OnnxPredictor {
    /// Loads and validates the ONNX artifact at `path`.
    ///
    /// # Errors
    /// - `Model` if the file does not exist or cannot be loaded
    /// - `Model` if the graph does not take a single `[_, 3, 224, 224]` input
    /// - `Model` if the graph has no outputs
    pub fn from_file(
        path: impl AsRef<Path>,
        runtime_config: &RuntimeConfig,
    ) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ClassifierError::Model(format!(
                "Model file not found: {}",
                path.display()
            )));
        }

        info!("Loading model from {:?}", path);
        let session = create_session_builder(runtime_config)?.commit_from_file(path)?;

        let (input_name, output_len) =
            Self::validate_model(&session, &PreprocessConfig::default().input_shape())?;
        info!(
            "Model structure validated (input: {}, outputs per sample: {})",
            input_name,
            output_len.map_or_else(|| "dynamic".to_string(), |n| n.to_string())
        );

        Ok(Self {
            session,
            input_name,
            output_len,
            model_path: path.to_path_buf(),
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Checks the graph signature against the expected input shape.
    ///
    /// Dimensions reported as non-positive are dynamic and match anything.
    /// Returns the input name and the static class count, if the graph
    /// declares one.
    fn validate_model(
        session: &Session,
        expected_input: &[usize; 4],
    ) -> Result<(String, Option<usize>), ClassifierError> {
        let inputs = &session.inputs;
        if inputs.len() != 1 {
            return Err(ClassifierError::Model(format!(
                "Model must have exactly 1 input (image batch), found {}",
                inputs.len()
            )));
        }

        let input = &inputs[0];
        if let Some(dims) = input.input_type.tensor_dimensions() {
            if dims.len() != expected_input.len() {
                return Err(ClassifierError::Model(format!(
                    "Model input '{}' has rank {}, expected {}",
                    input.name,
                    dims.len(),
                    expected_input.len()
                )));
            }
            // batch dimension is allowed to differ
            for (axis, (&dim, &expected)) in dims.iter().zip(expected_input).enumerate().skip(1) {
                if dim > 0 && dim as usize != expected {
                    return Err(ClassifierError::Model(format!(
                        "Model input '{}' has size {} on axis {}, expected {}",
                        input.name, dim, axis, expected
                    )));
                }
            }
        }

        let outputs = &session.outputs;
        if outputs.is_empty() {
            return Err(ClassifierError::Model(
                "Model must have at least 1 output for class scores".to_string(),
            ));
        }
        let output_len = outputs[0]
            .output_type
            .tensor_dimensions()
            .and_then(|dims| dims.last().copied())
            .filter(|&dim| dim > 0)
            .map(|dim| dim as usize);

        Ok((input.name.clone(), output_len))
    }
}

impl Predictor for OnnxPredictor {
    fn predict(&self, input: Array4<f32>) -> Result<Vec<f32>, ClassifierError> {
        let tensor = Tensor::from_array(input)
            .map_err(|e| ClassifierError::Inference(format!("Failed to create input tensor: {}", e)))?;

        let mut input_tensors = HashMap::new();
        input_tensors.insert(self.input_name.as_str(), tensor);

        let outputs = self
            .session
            .run(input_tensors)
            .map_err(|e| ClassifierError::Inference(format!("Failed to run model: {}", e)))?;
        let scores = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::Inference(format!("Failed to extract output tensor: {}", e)))?;

        Ok(scores.iter().copied().collect())
    }

    fn output_len(&self) -> Option<usize> {
        self.output_len
    }
}
