// src/api/handlers/pages.rs
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Result};

use crate::api::AppState;
use crate::proxy;
use crate::ui::{jobs_panel, render_page, UploadForm};

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub async fn index(state: web::Data<AppState>) -> Result<HttpResponse> {
    let jobs = state.jobs.jobs().await;
    Ok(html(render_page(&UploadForm::new(), &jobs)))
}

/// Form submission without JavaScript. Always answers with the page; the
/// outcome is shown as the form message.
pub async fn submit_upload(state: web::Data<AppState>, payload: Multipart) -> Result<HttpResponse> {
    let form = match proxy::receive_file(payload, &state.config.spool_dir).await {
        Ok(selection) => UploadForm::submit(&state.backend, selection).await,
        Err(e) => {
            log::warn!("Rejected form upload: {}", e);
            UploadForm::failed(&e)
        }
    };
    let jobs = state.jobs.jobs().await;
    Ok(html(render_page(&form, &jobs)))
}

pub async fn jobs_fragment(state: web::Data<AppState>) -> Result<HttpResponse> {
    let jobs = state.jobs.jobs().await;
    Ok(html(jobs_panel::render_table(&jobs)))
}
