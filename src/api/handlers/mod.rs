// src/api/handlers/mod.rs
mod assets;
mod health;
mod jobs;
mod pages;
mod result;
mod upload;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::errors::{ErrorEnvelope, PortalError};

pub use assets::static_asset;
pub use health::health_check;
pub use jobs::{enqueue_job, get_job, list_jobs};
pub use pages::{index, jobs_fragment, submit_upload};
pub use result::download_result;
pub use upload::upload_document;

/// Maps a backend failure onto a response for pass-through routes: the
/// backend's own status is kept, transport failures become 502.
pub(crate) fn relay_error(err: PortalError) -> HttpResponse {
    let status = match &err {
        PortalError::Backend { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        PortalError::Request(_) => StatusCode::BAD_GATEWAY,
        _ => return err.error_response(),
    };
    HttpResponse::build(status).json(ErrorEnvelope {
        error: err.to_string(),
    })
}
