// src/ui/upload_form.rs

use serde_json::Value;

use super::html_escape;
use crate::backend::BackendClient;
use crate::errors::PortalError;
use crate::proxy::{self, SpooledUpload};

pub const CHOOSE_A_FILE: &str = "Choose a file";

/// State of the upload form: just the status message shown next to the button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub message: Option<String>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Handles a form submission. Without a file nothing is sent to the backend.
    pub async fn submit(backend: &BackendClient, selection: Option<SpooledUpload>) -> Self {
        let Some(upload) = selection else {
            return Self::with_message(CHOOSE_A_FILE);
        };
        match proxy::forward(backend, upload).await {
            Ok(response) => Self::uploaded(&response),
            Err(e) => Self::failed(&e),
        }
    }

    pub fn uploaded(response: &Value) -> Self {
        let id = match response.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Null) | None => "unknown".to_string(),
            Some(other) => other.to_string(),
        };
        Self::with_message(format!("Uploaded, job id: {}", id))
    }

    pub fn failed(err: &PortalError) -> Self {
        Self::with_message(format!("Upload error: {}", err))
    }

    pub fn render(&self) -> String {
        let message = self.message.as_deref().map(html_escape).unwrap_or_default();
        format!(
            r#"<form class="upload" method="post" action="/upload" enctype="multipart/form-data">
    <input type="file" name="file">
    <button type="submit">Upload &amp; Queue</button>
    <div class="message">{}</div>
</form>"#,
            message
        )
    }
}
