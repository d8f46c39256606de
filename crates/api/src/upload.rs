//! `multipart/form-data` handling for media resources.
//!
//! A form is buffered completely: text parts become the JSON object the
//! resource DTO is deserialized from, and the named file parts are kept
//! aside until the handler stores them in the object store.

use std::collections::HashMap;

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use lms_cloud::key::extension;
use lms_cloud::{object_key, ObjectStore};
use lms_core::error::{CoreError, FieldViolation};
use lms_core::validation::BODY_FIELD;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Image formats accepted for any media field.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// One uploaded file part.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name.
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A fully buffered multipart form.
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: Map<String, Value>,
    files: HashMap<String, UploadedFile>,
}

impl UploadForm {
    /// Read every part of `multipart`.
    ///
    /// Parts named in `file_fields` are treated as image uploads; everything
    /// else must be a text value. Repeated names are rejected.
    pub async fn read(mut multipart: Multipart, file_fields: &[&str]) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            if name.is_empty() {
                return Err(AppError::BadRequest("Multipart part without a name".into()));
            }
            if form.fields.contains_key(&name) || form.files.contains_key(&name) {
                return Err(AppError::BadRequest(format!(
                    "Multipart field '{name}' was sent more than once"
                )));
            }

            if file_fields.contains(&name.as_str()) {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                let file = UploadedFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                };
                check_image(&name, &file)?;
                form.files.insert(name, file);
            } else {
                let text = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, Value::String(text));
            }
        }

        Ok(form)
    }

    /// Deserialize the text parts into `T`. Shape errors (missing or unknown
    /// fields) become a validation error on `body`.
    pub fn parse<T: DeserializeOwned>(&self) -> AppResult<T> {
        serde_json::from_value(Value::Object(self.fields.clone())).map_err(|e| {
            AppError::Core(CoreError::InvalidFields(vec![FieldViolation::new(
                BODY_FIELD,
                e.to_string(),
            )]))
        })
    }

    /// Remove and return the file uploaded under `name`, if any.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    /// Like [`take_file`](Self::take_file) but the file is mandatory.
    pub fn require_file(&mut self, name: &str) -> AppResult<UploadedFile> {
        self.take_file(name)
            .ok_or_else(|| AppError::BadRequest(format!("Missing required file field '{name}'")))
    }
}

/// An upload whose key and public URL are fixed but whose bytes are not
/// written yet, so the record carrying the URL can be validated first.
#[derive(Debug)]
pub struct PendingUpload {
    key: String,
    url: String,
    file: UploadedFile,
}

impl PendingUpload {
    /// Assign `file` a fresh key under `resource`.
    pub fn new(state: &AppState, resource: &str, file: UploadedFile) -> Self {
        Self::for_store(
            state.object_store.as_ref(),
            &state.config.storage.key_prefix,
            resource,
            file,
        )
    }

    fn for_store(
        store: &dyn ObjectStore,
        key_prefix: &str,
        resource: &str,
        file: UploadedFile,
    ) -> Self {
        let key = object_key(key_prefix, resource, &file.file_name);
        let url = store.public_url(&key);
        Self { key, url, file }
    }

    /// Public URL the object will be served from once written.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Write the bytes to the application's object store.
    pub async fn write(self, state: &AppState) -> AppResult<()> {
        self.write_to(state.object_store.as_ref()).await
    }

    async fn write_to(self, store: &dyn ObjectStore) -> AppResult<()> {
        let size = self.file.bytes.len();
        let stored = store
            .put(&self.key, self.file.bytes, self.file.content_type.as_deref())
            .await?;

        tracing::info!(
            key = %stored.key,
            size,
            backend = store.backend(),
            "Upload stored",
        );

        Ok(())
    }
}

fn check_image(field: &str, file: &UploadedFile) -> AppResult<()> {
    if file.bytes.is_empty() {
        return Err(AppError::BadRequest(format!(
            "File field '{field}' is empty"
        )));
    }
    let ext = extension(&file.file_name).unwrap_or_default();
    if !SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unsupported image format '.{ext}' for field '{field}'. Supported: {}",
            SUPPORTED_IMAGE_EXTENSIONS
                .iter()
                .map(|e| format!(".{e}"))
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }
    Ok(())
}

fn multipart_error(err: MultipartError) -> AppError {
    match err.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(err.body_text()),
        _ => AppError::BadRequest(err.body_text()),
    }
}
