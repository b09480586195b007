use std::fmt;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::StorageError;

/// Extension used when neither the file name nor the content type yields one.
const DEFAULT_EXTENSION: &str = "jpg";

const MAX_EXTENSION_LEN: usize = 10;

/// A validated, store-generated photo file name.
///
/// Names have the form `{unix_millis}-{random}.{ext}` and are never derived
/// from client input other than the (sanitized) extension.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PhotoRef(String);

impl PhotoRef {
    /// Generate a fresh reference with the given extension hint.
    ///
    /// The hint is sanitized with [`normalize_extension`]; anything unusable
    /// falls back to [`DEFAULT_EXTENSION`].
    pub fn generate(extension: Option<&str>) -> Self {
        let ext = extension
            .and_then(normalize_extension)
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        let millis = chrono::Utc::now().timestamp_millis();
        let nonce: u32 = rand::rng().random_range(0..1_000_000_000);
        Self(format!("{millis}-{nonce}.{ext}"))
    }

    /// Parse a stored reference, rejecting anything that is not a flat file name.
    pub fn parse(s: &str) -> Result<Self, StorageError> {
        if s.is_empty() {
            return Err(StorageError::InvalidRef("reference is empty".into()));
        }
        if s.chars().any(|c| c.is_ascii_control()) {
            return Err(StorageError::InvalidRef(
                "control characters are not allowed".into(),
            ));
        }
        if s.contains('/') || s.contains('\\') {
            return Err(StorageError::InvalidRef(
                "path separators are not allowed".into(),
            ));
        }
        if s.starts_with('.') {
            return Err(StorageError::InvalidRef(
                "hidden or relative names are not allowed".into(),
            ));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The extension part of the stored name, if any.
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.0).extension().and_then(|e| e.to_str())
    }
}

/// Pick an extension hint from an uploaded file name, then its content type.
pub fn extension_hint(file_name: Option<&str>, content_type: Option<&str>) -> Option<String> {
    let from_name = file_name
        .and_then(|n| Path::new(n).extension())
        .and_then(|e| e.to_str())
        .and_then(normalize_extension);
    if from_name.is_some() {
        return from_name;
    }

    content_type
        .and_then(mime_guess::get_mime_extensions_str)
        .and_then(|exts| exts.first())
        .and_then(|e| normalize_extension(e))
}

/// Lowercase an extension and accept it only if it is short and alphanumeric.
fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim().trim_start_matches('.');
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

impl fmt::Debug for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhotoRef({})", self.0)
    }
}

impl fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for PhotoRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PhotoRef {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
