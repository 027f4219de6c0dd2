use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use ocr_portal::api::{configure_routes, AppState};
use ocr_portal::{banner, config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    banner::print_banner();

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  No .env file loaded ({}), using the process environment", e);
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let app_config = config::AppConfig::from_env().map_err(|e| {
        log::error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    std::fs::create_dir_all(&app_config.spool_dir)?;
    log::info!("Forwarding uploads to {}", app_config.backend_url);
    log::info!("Spooling uploads in {}", app_config.spool_dir.display());

    let bind = app_config.bind.clone();
    let mut state = AppState::new(app_config);
    let jobs_panel = state.mount_jobs_panel();

    println!("🚀 Starting server...");
    println!("📄 Frontend available at http://{}", bind);

    let served = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind(bind.as_str())?
    .run()
    .await;

    jobs_panel.unmount().await;
    served
}
