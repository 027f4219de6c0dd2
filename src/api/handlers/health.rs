// src/api/handlers/health.rs
use actix_web::{web, HttpResponse, Result};
use serde_json::json;

use crate::api::AppState;

pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    let snapshot = state.jobs.snapshot().await;
    let backend_reachable = snapshot.last_success.is_some() && !snapshot.is_stale();

    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "ocr-portal",
        "version": env!("CARGO_PKG_VERSION"),
        "backend": {
            "url": state.backend.base_url(),
            "reachable": backend_reachable,
            "last_poll": snapshot.last_success.map(|t| t.to_rfc3339()),
            "last_error": snapshot.last_error,
        }
    })))
}
