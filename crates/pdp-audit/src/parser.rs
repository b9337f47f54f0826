//! Audit file loading.
//!
//! serde_json deserialization with proper error context (file path,
//! unknown-variant reporting). Translation callers load through these
//! functions so every malformed export is reported against its file.

use std::path::Path;

use serde_json::Value;

use crate::dto::AuditDocument;
use crate::error::{AuditError, AuditResult};

/// Load an audit export into the typed document model.
///
/// # Errors
///
/// - [`AuditError::FileNotFound`] when the path does not exist.
/// - [`AuditError::JsonParse`] for malformed JSON or an unknown
///   `ruleType` tag (the error names the tag).
pub fn load_audit(path: &Path) -> AuditResult<AuditDocument> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|e| AuditError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load an audit export as an untyped `serde_json::Value`, for tooling
/// that inspects exports without translating them.
pub fn load_audit_value(path: &Path) -> AuditResult<Value> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|e| AuditError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn read_file(path: &Path) -> AuditResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AuditError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            AuditError::Io(e)
        }
    })
}
