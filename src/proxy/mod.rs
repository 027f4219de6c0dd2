// src/proxy/mod.rs
pub mod upload;

pub use upload::{forward, proxy_upload, receive_file, sanitize_filename, SpooledUpload};
