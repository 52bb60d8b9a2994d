use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model_manager::ModelManager;
use crate::runtime::RuntimeConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP prediction service
    Serve(ServeArgs),
    /// Classify a single image file and print the result
    Predict(PredictArgs),
}

/// Where the model lives and how ONNX Runtime should execute it.
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Path to the ONNX model artifact (defaults to $ORALSCAN_MODEL, then app/model/model.onnx)
    #[arg(long)]
    pub model_path: Option<PathBuf>,
    /// Expected SHA-256 digest of the model artifact
    #[arg(long, env = "ORALSCAN_MODEL_SHA256")]
    pub model_sha256: Option<String>,
    /// Threads used within a single operator (0 lets ONNX Runtime decide)
    #[arg(long, default_value_t = 0)]
    pub intra_threads: usize,
    /// Threads used across independent operators (0 lets ONNX Runtime decide)
    #[arg(long, default_value_t = 0)]
    pub inter_threads: usize,
}

impl ModelArgs {
    pub fn model_manager(&self) -> ModelManager {
        match &self.model_path {
            Some(path) => ModelManager::new(path),
            None => ModelManager::new_default(),
        }
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            inter_threads: self.inter_threads,
            intra_threads: self.intra_threads,
            ..RuntimeConfig::default()
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "ORALSCAN_HOST", default_value = "127.0.0.1")]
    pub host: String,
    /// Port to listen on
    #[arg(short, long, env = "ORALSCAN_PORT", default_value_t = 8000)]
    pub port: u16,
    /// Reject request bodies larger than this many bytes (no limit when unset)
    #[arg(long, env = "ORALSCAN_MAX_BODY_BYTES")]
    pub max_body_bytes: Option<usize>,
    #[command(flatten)]
    pub model: ModelArgs,
}

impl ServeArgs {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// JPEG or PNG image to classify
    pub image: PathBuf,
    #[command(flatten)]
    pub model: ModelArgs,
}
