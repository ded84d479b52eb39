//! Transient storage for uploaded spreadsheets
//!
//! An upload is written to the staging directory, parsed, and removed again
//! whether parsing succeeded or not. Removal failures are logged only.

use std::io::Write;
use std::path::Path;

use staku_common::db::NewRunner;
use tempfile::TempPath;
use tracing::{debug, warn};

use super::IngestError;

/// An uploaded file waiting to be parsed
#[derive(Debug)]
pub struct StagedUpload {
    path: TempPath,
}

impl StagedUpload {
    /// Write an upload payload into `dir`, keeping the original extension
    pub fn stage(dir: &Path, original_name: &str, bytes: &[u8]) -> std::io::Result<Self> {
        std::fs::create_dir_all(dir)?;

        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&extension_suffix(original_name))
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        let path = file.into_temp_path();
        debug!("Staged upload '{}' at {}", original_name, path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the staged file, then remove it regardless of the outcome
    pub fn ingest(self) -> Result<Vec<NewRunner>, IngestError> {
        let result = std::fs::read(&self.path)
            .map_err(IngestError::from)
            .and_then(|bytes| super::ingest(&bytes));
        self.discard();
        result
    }

    /// Remove the staged file, logging (not returning) any failure
    pub fn discard(self) {
        let staged_path = self.path.to_path_buf();
        if let Err(e) = self.path.close() {
            warn!("Failed to remove staged upload {}: {}", staged_path.display(), e);
        }
    }
}

/// `".xlsx"` for `"results.xlsx"`; empty when the name has no usable extension
fn extension_suffix(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}
