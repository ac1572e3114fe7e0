//! Client side of the classification backend.
//!
//! The backend owns parsing, classification and workbook generation; this
//! module only moves bytes to and from its two endpoints. [`Backend`] is the
//! seam the job runner talks to, [`HttpBackend`] the production impl.

mod http;

use std::fs;
use std::path::{Path, PathBuf};

pub use http::HttpBackend;

use crate::data::model::{ClassificationResult, ClassifiedRecord};
use crate::data::upload::{display_name, mime_for};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("backend returned HTTP {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("unexpected response content: {0}")]
    Invalid(String),
}

/// One file of the multipart `files` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPart {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl UploadPart {
    pub fn read(path: &Path) -> Result<Self, ApiError> {
        let bytes = fs::read(path).map_err(|source| ApiError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            file_name: display_name(path),
            mime: mime_for(path),
            bytes,
        })
    }
}

/// Read every queued file, failing on the first unreadable one.
pub fn read_parts(paths: &[PathBuf]) -> Result<Vec<UploadPart>, ApiError> {
    paths.iter().map(|p| UploadPart::read(p)).collect()
}

pub trait Backend: Send + Sync {
    /// `POST /api/process` with all files in a single multipart request.
    fn classify(&self, parts: Vec<UploadPart>) -> Result<ClassificationResult, ApiError>;

    /// `POST /api/export` with the full record list; returns the workbook bytes.
    fn export(&self, records: &[ClassifiedRecord]) -> Result<Vec<u8>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_its_path() {
        let missing = std::env::temp_dir().join("atc-smart-pro-missing-upload.xlsx");
        let err = read_parts(&[missing.clone()]).unwrap_err();
        assert!(matches!(err, ApiError::Read { ref path, .. } if *path == missing));
        assert!(err.to_string().contains("atc-smart-pro-missing-upload.xlsx"));
    }

    #[test]
    fn reads_name_mime_and_bytes() {
        let path = std::env::temp_dir().join(format!("atc-smart-pro-{}.csv", std::process::id()));
        fs::write(&path, b"Priority,Check Title\n1,Syntax\n").unwrap();
        let part = UploadPart::read(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(part.mime, "text/csv");
        assert!(part.file_name.ends_with(".csv"));
        assert!(part.bytes.starts_with(b"Priority"));
    }
}
