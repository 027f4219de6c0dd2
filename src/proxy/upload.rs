// src/proxy/upload.rs
//! Receives a browser upload and relays it to the backend's `/documents`.
//!
//! The file is spooled to a temporary file while the multipart body is read,
//! then streamed from disk into a fresh multipart request. The temporary file
//! is removed once the backend call returns, whatever its outcome.

use actix_multipart::Multipart;
use futures::StreamExt;
use regex::Regex;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::Path;
use std::sync::LazyLock;
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use uuid::Uuid;

use crate::backend::BackendClient;
use crate::errors::{PortalError, Result};

/// Name of the multipart field carrying the document.
pub const FILE_FIELD: &str = "file";
const FALLBACK_FILENAME: &str = "upload.bin";

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\x00-\x1f\x7f"]"#).unwrap());

/// An uploaded file held on disk until it has been forwarded.
#[derive(Debug)]
pub struct SpooledUpload {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub size: u64,
    path: TempPath,
}

impl SpooledUpload {
    #[cfg(test)]
    pub(crate) async fn from_bytes(
        spool_dir: &Path,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<Self> {
        let (mut file, path) = create_spool_file(spool_dir).await?;
        file.write_all(data).await?;
        file.flush().await?;
        Ok(Self {
            id: Uuid::new_v4(),
            filename: sanitize_filename(filename),
            content_type: content_type.to_string(),
            size: data.len() as u64,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn create_spool_file(spool_dir: &Path) -> Result<(tokio::fs::File, TempPath)> {
    tokio::fs::create_dir_all(spool_dir).await?;
    let named = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(".part")
        .tempfile_in(spool_dir)?;
    let (file, path) = named.into_parts();
    Ok((tokio::fs::File::from_std(file), path))
}

/// Strips directory components and characters that would break a
/// `Content-Disposition` header from a client-supplied filename.
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned = UNSAFE_CHARS.replace_all(base, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        FALLBACK_FILENAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Reads the multipart payload and spools the `file` field.
///
/// Returns `None` when no file was sent, including the empty part browsers
/// submit for a file input with nothing selected. Other fields are drained.
pub async fn receive_file(mut payload: Multipart, spool_dir: &Path) -> Result<Option<SpooledUpload>> {
    let mut spooled: Option<SpooledUpload> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| PortalError::Multipart(e.to_string()))?;

        let is_file = field.name() == Some(FILE_FIELD) && spooled.is_none();
        if !is_file {
            while let Some(chunk) = field.next().await {
                chunk.map_err(|e| PortalError::Multipart(e.to_string()))?;
            }
            continue;
        }

        let raw_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();
        let content_type = field
            .content_type()
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| {
                mime_guess::from_path(&raw_name)
                    .first_or_octet_stream()
                    .to_string()
            });

        let (mut file, path) = create_spool_file(spool_dir).await?;
        let mut size: u64 = 0;
        while let Some(chunk) = field.next().await {
            let bytes = chunk.map_err(|e| PortalError::Multipart(e.to_string()))?;
            size += bytes.len() as u64;
            file.write_all(&bytes).await?;
        }
        file.flush().await?;
        drop(file);

        if raw_name.is_empty() && size == 0 {
            // Nothing selected in the form; the temp file goes with `path`.
            continue;
        }

        let upload = SpooledUpload {
            id: Uuid::new_v4(),
            filename: sanitize_filename(&raw_name),
            content_type,
            size,
            path,
        };
        log::info!(
            "Upload {}: spooled {} bytes of {} ({})",
            upload.id,
            upload.size,
            upload.filename,
            upload.content_type
        );
        spooled = Some(upload);
    }

    Ok(spooled)
}

/// Streams a spooled upload to the backend and removes the temp file afterwards.
pub async fn forward(backend: &BackendClient, upload: SpooledUpload) -> Result<Value> {
    let SpooledUpload {
        id,
        filename,
        content_type,
        size,
        path,
    } = upload;

    let result = send(backend, &path, filename, &content_type, size).await;

    match &result {
        Ok(_) => log::info!("Upload {}: forwarded to {}", id, backend.base_url()),
        Err(e) => log::error!("Upload {}: forwarding failed: {}", id, e),
    }
    if let Err(e) = path.close() {
        log::warn!("Upload {}: could not remove spool file: {}", id, e);
    }

    result
}

async fn send(
    backend: &BackendClient,
    path: &Path,
    filename: String,
    content_type: &str,
    size: u64,
) -> Result<Value> {
    let file = tokio::fs::File::open(path).await?;
    let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
    let part = Part::stream_with_length(body, size)
        .file_name(filename)
        .mime_str(content_type)?;
    backend.post_document(Form::new().part(FILE_FIELD, part)).await
}

/// Full pipeline used by both the JSON route and the HTML form.
pub async fn proxy_upload(backend: &BackendClient, spool_dir: &Path, payload: Multipart) -> Result<Value> {
    let upload = receive_file(payload, spool_dir)
        .await?
        .ok_or(PortalError::MissingFile)?;
    forward(backend, upload).await
}
