// src/api/handlers/result.rs
use actix_web::{http::header, web, HttpResponse, Result};

use super::relay_error;
use crate::api::AppState;

/// `GET /api/result/{id}`: streams the backend's result file through.
pub async fn download_result(state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse> {
    let id = path.into_inner();
    let resp = match state.backend.fetch_result(id).await {
        Ok(resp) => resp,
        Err(e) => {
            log::warn!("Result {} unavailable: {}", id, e);
            return Ok(relay_error(e));
        }
    };

    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json")
        .to_string();
    let disposition = resp
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| format!("attachment; filename=\"{}.json\"", id));

    Ok(HttpResponse::Ok()
        .content_type(content_type)
        .insert_header((header::CONTENT_DISPOSITION, disposition))
        .streaming(resp.bytes_stream()))
}
