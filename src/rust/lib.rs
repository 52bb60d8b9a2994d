//! Oral lesion image classification served over HTTP.
//!
//! A pretrained network, exported to ONNX, is loaded once into a
//! [`Classifier`] and shared by every request. Each image goes through a fixed
//! pipeline: decode to RGB, stretch to 224x224, normalize per channel, run
//! the forward pass, softmax, pick the most likely of three labels.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use oralscan::{Classifier, ModelManager};
//!
//! let manager = ModelManager::new_default();
//! let classifier = Classifier::builder()
//!     .with_model(manager.ensure_model_ready(None)?)?
//!     .build()?;
//!
//! let prediction = classifier.classify_file("lesion.png")?;
//! println!("Predicted class: {}", prediction.label);
//! # Ok(())
//! # }
//! ```
//!
//! # Serving
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use oralscan::{server, Classifier};
//!
//! let classifier = Arc::new(Classifier::builder().with_model("app/model/model.onnx")?.build()?);
//! server::serve(server::AppState::new(classifier), "127.0.0.1:8000", None).await?;
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod config;
pub mod model_manager;
mod runtime;
pub mod server;

pub use classifier::{
    Classifier, ClassifierBuilder, ClassifierError, ClassifierInfo, OnnxPredictor, Prediction,
    Predictor, PreprocessConfig, CLASS_LABELS,
};
pub use model_manager::{ModelError, ModelManager};
pub use runtime::{create_session_builder, RuntimeConfig};

/// Initializes `env_logger`, defaulting to `info` when `RUST_LOG` is unset.
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
