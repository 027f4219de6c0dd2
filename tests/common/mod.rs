// tests/common/mod.rs
#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use ocr_portal::api::AppState;
use ocr_portal::config::AppConfig;

pub const BOUNDARY: &str = "----ocrportaltestboundary";

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

/// Builds a multipart body with a `file` part, or an empty one as sent by a
/// browser when nothing was selected.
pub fn file_body(filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            BOUNDARY, filename, content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn text_body(name: &str, value: &str) -> Vec<u8> {
    format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{n}\"\r\n\r\n{v}\r\n--{b}--\r\n",
        b = BOUNDARY,
        n = name,
        v = value
    )
    .into_bytes()
}

pub fn state_for(backend_url: &str, spool_dir: &Path) -> AppState {
    AppState::new(AppConfig {
        backend_url: backend_url.trim_end_matches('/').to_string(),
        backend_token: None,
        bind: "127.0.0.1:0".to_string(),
        jobs_poll_interval: Duration::from_secs(4),
        spool_dir: spool_dir.to_path_buf(),
    })
}

pub fn spool_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}
