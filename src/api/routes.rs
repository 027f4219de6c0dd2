// src/api/routes.rs
use actix_web::web;
use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/upload", web::post().to(handlers::submit_upload))
        .route("/ui/jobs", web::get().to(handlers::jobs_fragment))
        .route("/static/{path:.*}", web::get().to(handlers::static_asset))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health_check))
                .route("/upload", web::post().to(handlers::upload_document))
                .route("/result/{id}", web::get().to(handlers::download_result))
                .service(
                    web::scope("/jobs")
                        .route("", web::get().to(handlers::list_jobs))
                        .route("/{id}", web::get().to(handlers::get_job))
                        .route("/{id}/enqueue", web::post().to(handlers::enqueue_job))
                )
        );
}
