// src/delivery/api_server.rs
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use log::info;

use crate::application::storage::SummaryRepository;
use crate::config::Settings;

/// Shared handler state. The repository is the only cross-request state.
pub struct AppState {
    pub repo: Arc<dyn SummaryRepository>,
}

pub async fn run_server(
    settings: Settings,
    repo: Arc<dyn SummaryRepository>,
) -> std::io::Result<()> {
    let data = web::Data::new(AppState { repo });
    let server_config = settings.server.clone();

    info!(
        "listening on {}:{}",
        server_config.host, server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(crate::delivery::router::configure)
    })
    .bind((server_config.host.clone(), server_config.port))?
    .run()
    .await
}
