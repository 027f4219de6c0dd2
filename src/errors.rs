// src/errors.rs
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("File I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("Malformed multipart body: {0}")]
    Multipart(String),

    #[error("No file provided")]
    MissingFile,

    #[error("Backend responded with status {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PortalError>;

/// JSON body returned for every failed API call.
#[derive(Serialize, Debug)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ResponseError for PortalError {
    fn status_code(&self) -> StatusCode {
        match self {
            PortalError::MissingFile => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorEnvelope {
            error: self.to_string(),
        })
    }
}
