#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the hotspot map application.
//!
//! Loads the hotspot CSV once at startup into an immutable
//! [`RecordStore`](hotspot_map_store::RecordStore) and serves filter, trend
//! and totals queries against it. `POST /api/reload` re-reads the file and
//! swaps the new store in atomically; requests already running keep the
//! snapshot they started with.

mod handlers;
pub mod interactive;

use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use hotspot_map_store::{RecordStore, StoreHandle, hotspots_file_from_env};

/// Default port when `PORT` is unset or unparseable.
pub const DEFAULT_PORT: u16 = 24804;

/// Default bind address when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Shared application state.
pub struct AppState {
    /// The currently published record store.
    pub store: StoreHandle,
    /// CSV file the store was loaded from, re-read on reload.
    pub path: PathBuf,
}

impl AppState {
    /// Creates state serving `store`, reloadable from `path`.
    #[must_use]
    pub fn new(store: RecordStore, path: PathBuf) -> Self {
        Self {
            store: StoreHandle::new(store),
            path,
        }
    }
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(handlers::query_config())
            .route("/health", web::get().to(handlers::health))
            .route("/metadata", web::get().to(handlers::metadata))
            .route("/hotspots", web::get().to(handlers::hotspots))
            .route("/trend", web::get().to(handlers::trend))
            .route("/totals", web::get().to(handlers::totals))
            .route("/reload", web::post().to(handlers::reload)),
    );
}

/// Starts the hotspot map API server.
///
/// Loads the CSV named by `HOTSPOTS_FILE` and binds to `BIND_ADDR`:`PORT`.
/// This is a regular async function; the caller provides the runtime (e.g.
/// via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the dataset cannot be loaded, or
/// if the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let path = hotspots_file_from_env();
    let store = RecordStore::load(&path).map_err(std::io::Error::other)?;
    let state = web::Data::new(AppState::new(store, path));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
