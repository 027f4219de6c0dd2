// src/api/handlers/jobs.rs
use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use super::relay_error;
use crate::api::AppState;
use crate::backend::DEFAULT_PROMPT;

#[derive(Deserialize)]
pub struct EnqueueRequest {
    pub prompt: Option<String>,
}

/// `GET /api/jobs`: rows from the most recent successful poll.
pub async fn list_jobs(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.jobs.jobs().await))
}

pub async fn get_job(state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse> {
    match state.backend.get_document(path.into_inner()).await {
        Ok(doc) => Ok(HttpResponse::Ok().json(doc)),
        Err(e) => Ok(relay_error(e)),
    }
}

pub async fn enqueue_job(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    form: Option<web::Form<EnqueueRequest>>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let prompt = form
        .and_then(|f| f.into_inner().prompt)
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PROMPT.to_string());

    log::info!("Queueing document {} for processing", id);
    match state.backend.enqueue(id, &prompt).await {
        Ok(answer) => Ok(HttpResponse::Ok().json(answer)),
        Err(e) => Ok(relay_error(e)),
    }
}
