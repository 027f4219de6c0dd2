// tests/frontend.rs
mod common;

use std::time::Duration;

use actix_web::{http::header, test, web, App};
use ocr_portal::api::{configure_routes, AppState};
use ocr_portal::ui::JobsPanel;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{file_body, multipart_content_type, spool_entries, state_for};

async fn wait_for_first_poll(panel: &JobsPanel) {
    for _ in 0..100 {
        if panel.snapshot().await.polls > 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("jobs panel never polled");
}

async fn read_text(resp: actix_web::dev::ServiceResponse) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[actix_web::test]
async fn test_form_without_file_never_contacts_backend() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(0)
        .mount(&backend)
        .await;

    let spool = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(&backend.uri(), spool.path())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/upload")
        .insert_header((header::CONTENT_TYPE, multipart_content_type()))
        .set_payload(file_body("", "application/octet-stream", b""))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let html = read_text(resp).await;
    assert!(html.contains("Choose a file"));

    assert_eq!(spool_entries(spool.path()), 0);
    backend.verify().await;
}

#[actix_web::test]
async fn test_form_shows_new_job_id() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42, "filename": "page.png"})))
        .expect(1)
        .mount(&backend)
        .await;

    let spool = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(&backend.uri(), spool.path())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/upload")
        .insert_header((header::CONTENT_TYPE, multipart_content_type()))
        .set_payload(file_body("page.png", "image/png", b"\x89PNG"))
        .to_request();
    let html = read_text(test::call_service(&app, req).await).await;
    assert!(html.contains("Uploaded, job id: 42"));
    assert_eq!(spool_entries(spool.path()), 0);
}

#[actix_web::test]
async fn test_form_reports_upload_error() {
    let spool = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for("http://127.0.0.1:9", spool.path())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/upload")
        .insert_header((header::CONTENT_TYPE, multipart_content_type()))
        .set_payload(file_body("page.png", "image/png", b"png"))
        .to_request();
    let html = read_text(test::call_service(&app, req).await).await;
    assert!(html.contains("Upload error: "));
    assert_eq!(spool_entries(spool.path()), 0);
}

#[actix_web::test]
async fn test_jobs_routes_serve_polled_rows() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "filename": "a.pdf", "status": "done"},
            {"id": 2, "filename": "b.pdf", "status": "Done"},
            {"id": 3, "filename": "c.pdf", "status": "processing"}
        ])))
        .mount(&backend)
        .await;

    let spool = tempfile::tempdir().unwrap();
    let mut state: AppState = state_for(&backend.uri(), spool.path());
    let handle = state.mount_jobs_panel();
    wait_for_first_poll(&handle.panel()).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/jobs").to_request();
    let jobs: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(jobs.as_array().unwrap().len(), 3);
    assert_eq!(jobs[1]["status"], "Done");

    let req = test::TestRequest::get().uri("/ui/jobs").to_request();
    let fragment = read_text(test::call_service(&app, req).await).await;
    assert!(fragment.contains("/api/result/1"));
    assert!(!fragment.contains("/api/result/2"));
    assert!(!fragment.contains("/api/result/3"));

    let req = test::TestRequest::get().uri("/").to_request();
    let page = read_text(test::call_service(&app, req).await).await;
    assert!(page.contains("<h1>OCR Service</h1>"));
    assert!(page.contains("c.pdf"));

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let health: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["backend"]["reachable"], true);

    handle.unmount().await;
}

#[actix_web::test]
async fn test_result_download_is_streamed_through() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/result/7"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"text":"hello"}"#, "application/json"))
        .mount(&backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/result/8"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&backend)
        .await;

    let spool = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(&backend.uri(), spool.path())))
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/result/7").to_request()).await;
    assert_eq!(resp.status(), 200);
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(disposition, "attachment; filename=\"7.json\"");
    assert_eq!(read_text(resp).await, r#"{"text":"hello"}"#);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/result/8").to_request()).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("404"));
}

#[actix_web::test]
async fn test_enqueue_uses_default_prompt() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents/3/enqueue"))
        .and(body_string_contains("Extract OCR JSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"job_id": "abc", "status": "queued"})))
        .expect(1)
        .mount(&backend)
        .await;

    let spool = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(&backend.uri(), spool.path())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post().uri("/api/jobs/3/enqueue").to_request();
    let answer: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(answer["status"], "queued");
    backend.verify().await;
}

#[actix_web::test]
async fn test_static_script_is_embedded() {
    let spool = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for("http://127.0.0.1:9", spool.path())))
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/static/app.js").to_request()).await;
    assert_eq!(resp.status(), 200);
    let script = read_text(resp).await;
    assert!(script.contains("setInterval(load, 4000)"));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/static/missing.js").to_request()).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_static_script_blocks_empty_form_submission() {
    let spool = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for("http://127.0.0.1:9", spool.path())))
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/static/app.js").to_request()).await;
    let script = read_text(resp).await;
    assert!(script.contains("addEventListener('submit'"));
    assert!(script.contains("files.length === 0"));
    assert!(script.contains("preventDefault()"));
    assert!(script.contains("'Choose a file'"));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let page = read_text(resp).await;
    assert!(page.contains(r#"<form class="upload""#));
    assert!(page.contains(r#"<input type="file" name="file">"#));
    assert!(page.contains(r#"<div class="message">"#));
}

#[actix_web::test]
async fn test_job_detail_relays_backend_status() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/documents/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 4, "filename": "d.pdf", "status": "queued"})))
        .mount(&backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/documents/5"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not Found"})))
        .mount(&backend)
        .await;

    let spool = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(&backend.uri(), spool.path())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/jobs/4").to_request();
    let job: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(job["status"], "queued");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/jobs/5").to_request()).await;
    assert_eq!(resp.status(), 404);
}
