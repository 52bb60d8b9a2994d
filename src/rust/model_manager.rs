use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Environment variable overriding the model artifact location.
pub const MODEL_PATH_ENV: &str = "ORALSCAN_MODEL";
/// Artifact location used when nothing else is configured, relative to the
/// working directory.
pub const DEFAULT_MODEL_PATH: &str = "app/model/model.onnx";

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model artifact not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Hash mismatch for {path}: expected {expected}, got {actual}")]
    HashMismatch {
        path: String,
        expected: String,
        actual: String,
    },
}

/// Locates the model artifact on disk and checks its integrity.
///
/// The manager only ever reads: it never downloads, rewrites or caches
/// anything.
#[derive(Debug, Clone)]
pub struct ModelManager {
    model_path: PathBuf,
}

impl ModelManager {
    /// Creates a ModelManager for the default artifact location
    pub fn new_default() -> Self {
        Self::new(Self::get_default_model_path())
    }

    /// Returns the default model artifact path
    pub fn get_default_model_path() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var(MODEL_PATH_ENV) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }

        // 2. Fixed location next to the service
        PathBuf::from(DEFAULT_MODEL_PATH)
    }

    pub fn new<P: AsRef<Path>>(model_path: P) -> Self {
        Self {
            model_path: model_path.as_ref().to_path_buf(),
        }
    }

    pub fn get_model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn is_model_present(&self) -> bool {
        let present = self.model_path.is_file();
        log::info!("Model path: {:?} (exists: {})", self.model_path, present);
        present
    }

    /// Computes the hex-encoded SHA-256 digest of the artifact.
    pub fn model_hash(&self) -> Result<String, ModelError> {
        if !self.is_model_present() {
            return Err(ModelError::NotFound(self.model_path.display().to_string()));
        }
        let bytes = fs::read(&self.model_path)?;
        log::debug!("Read {} bytes", bytes.len());
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Checks the artifact against an expected SHA-256 digest.
    ///
    /// The comparison ignores case so digests copied from either `sha256sum`
    /// or uppercase listings both work.
    pub fn verify_model(&self, expected_hash: &str) -> Result<(), ModelError> {
        let actual = self.model_hash()?;
        log::info!("Calculated hash: {}", actual);
        log::info!("Expected hash:   {}", expected_hash);
        if !actual.eq_ignore_ascii_case(expected_hash.trim()) {
            return Err(ModelError::HashMismatch {
                path: self.model_path.display().to_string(),
                expected: expected_hash.trim().to_string(),
                actual,
            });
        }
        Ok(())
    }

    /// Makes sure the artifact exists and, when a digest is given, matches it.
    pub fn ensure_model_ready(&self, expected_hash: Option<&str>) -> Result<&Path, ModelError> {
        match expected_hash {
            Some(hash) => self.verify_model(hash)?,
            None if !self.is_model_present() => {
                return Err(ModelError::NotFound(self.model_path.display().to_string()));
            }
            None => {}
        }
        Ok(&self.model_path)
    }
}
