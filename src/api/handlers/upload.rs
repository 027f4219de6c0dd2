// src/api/handlers/upload.rs
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};

use crate::api::AppState;
use crate::errors::PortalError;
use crate::proxy;

/// `POST /api/upload`: relays the backend's JSON answer verbatim.
pub async fn upload_document(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, PortalError> {
    let response = proxy::proxy_upload(&state.backend, &state.config.spool_dir, payload).await?;
    Ok(HttpResponse::Ok().json(response))
}
