//! Request bodies.
//!
//! A body is either JSON or, when files are attached, a multipart form
//! whose text fields are the top-level fields of the same JSON value.
//! Multipart bodies are kept as plain data and turned into a
//! [`reqwest::multipart::Form`] per attempt, since a form is consumed by
//! sending it.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Body of an outgoing request.
#[derive(Debug, Clone, Default)]
pub enum Payload {
    /// No body.
    #[default]
    Empty,
    /// `application/json`.
    Json(Value),
    /// `multipart/form-data`.
    Multipart(MultipartBody),
}

impl Payload {
    /// JSON body from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Parse` if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self, ApiError> {
        serde_json::to_value(body)
            .map(Self::Json)
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Multipart body when `files` is non-empty, JSON otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Parse` if `body` cannot be serialized.
    pub fn with_files<B: Serialize + ?Sized>(
        body: &B,
        files: Vec<FilePart>,
    ) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Parse(e.to_string()))?;
        if files.is_empty() {
            return Ok(Self::Json(value));
        }
        Ok(Self::Multipart(MultipartBody::from_value(&value, files)))
    }

    /// Whether the body is a multipart form.
    #[must_use]
    pub const fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}

/// A file attached to a multipart body.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Attachment` if the file cannot be read.
    pub async fn from_path(field: impl Into<String>, path: &Path) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(field, file_name, guess_mime(path), bytes))
    }
}

fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Text fields plus files, ready to become a multipart form.
#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl MultipartBody {
    /// Flatten the top-level fields of `value` into text fields.
    ///
    /// Strings are sent as-is, nulls are skipped, and anything else is
    /// sent as its JSON text (so arrays and objects survive the trip).
    #[must_use]
    pub fn from_value(value: &Value, files: Vec<FilePart>) -> Self {
        let fields = value
            .as_object()
            .map(|object| {
                object
                    .iter()
                    .filter_map(|(key, value)| {
                        let text = match value {
                            Value::Null => return None,
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        };
                        Some((key.clone(), text))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { fields, files }
    }

    /// Build a fresh form for one attempt.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if a file's MIME type is not valid.
    pub fn to_form(&self) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (key, value) in &self.fields {
            form = form.text(key.clone(), value.clone());
        }
        for file in &self.files {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.mime)?;
            form = form.part(file.field.clone(), part);
        }
        Ok(form)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_without_files_stays_json() {
        let payload = Payload::with_files(&json!({"title": "Sale"}), Vec::new()).unwrap();
        assert!(!payload.is_multipart());
    }

    #[test]
    fn test_multipart_fields_are_flattened() {
        let body = json!({
            "name": "Linen shirt",
            "price": 1299.5,
            "isActive": true,
            "variants": [{"name": "M"}],
            "discountPrice": null
        });
        let image = FilePart::new("images", "shirt.png", "image/png", vec![1, 2, 3]);
        let Payload::Multipart(multipart) = Payload::with_files(&body, vec![image]).unwrap() else {
            panic!("expected multipart");
        };

        let field = |k: &str| {
            multipart
                .fields
                .iter()
                .find(|(key, _)| key == k)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(field("name"), Some("Linen shirt"));
        assert_eq!(field("price"), Some("1299.5"));
        assert_eq!(field("isActive"), Some("true"));
        assert_eq!(field("variants"), Some(r#"[{"name":"M"}]"#));
        assert_eq!(field("discountPrice"), None);
        assert_eq!(multipart.files.len(), 1);
        assert!(multipart.to_form().is_ok());
    }

    #[test]
    fn test_mime_guess() {
        assert_eq!(guess_mime(Path::new("a/b/banner.JPG")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("label")), "application/octet-stream");
    }
}
