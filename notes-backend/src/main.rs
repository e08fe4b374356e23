use actix_cors::Cors;
use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use std::time::Instant;

mod config;
mod controllers;
mod notes;

use config::Config;
use notes::NoteStore;

pub struct AppState {
    /// Sole owner of the notes document on disk
    pub store: Arc<NoteStore>,
    pub config: Config,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: Arc::new(NoteStore::new(config.data_file.clone())),
            config,
            started_at: Instant::now(),
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    log::info!("Notes v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    let port = config.port;
    let bind_host = config.bind_host.clone();

    let state = web::Data::new(AppState::new(config));

    // Create the document up front so a bad path or corrupt file shows at boot
    log::info!("Using notes document: {}", state.store.data_file().display());
    match state.store.load() {
        Ok(doc) => log::info!("[NOTES] Loaded {} notes", doc.notes.len()),
        Err(e) => log::error!("[NOTES] Failed to load notes document: {}", e),
    }

    let public_dir = state.config.public_dir.clone();
    let serve_static = public_dir.is_dir();
    if serve_static {
        log::info!("Serving static files from: {}", public_dir.display());
    } else {
        log::warn!(
            "Public directory {} not found, static files disabled",
            public_dir.display()
        );
    }

    let app_state = state.clone();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let mut app = App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::notes::config);

        if serve_static {
            app = app.service(Files::new("/", public_dir.clone()).index_file("index.html"));
        }

        app
    })
    .bind((bind_host.as_str(), port))?
    .run();

    log::info!("Notes app listening on http://{}:{}", bind_host, port);

    let server_handle = server.handle();

    // Spawn Ctrl+C handler
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        log::info!("Received Ctrl+C, shutting down...");

        let server_stop = server_handle.stop(true);
        if tokio::time::timeout(std::time::Duration::from_secs(5), server_stop)
            .await
            .is_err()
        {
            log::warn!("Timeout waiting for HTTP server to stop, forcing exit...");
        }

        log::info!("Shutdown complete");
    });

    server.await
}
