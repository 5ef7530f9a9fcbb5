// src/main.rs
use actix_web::{App, HttpServer, middleware, web};
use adsmith::AppState;
use adsmith::config::AppConfig;
use adsmith::handlers;
use adsmith::services::{GeminiClient, GenerationClient};
use log::{error, info};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Adsmith service...");

    let config = AppConfig::from_env().map_err(|e| {
        error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let gemini = Arc::new(GeminiClient::new(config.api_key.clone(), config.base_url.clone()));
    let generation_client = Arc::new(
        GenerationClient::new(gemini, config.text_model.clone(), config.image_model.clone())
            .with_retry_policy(config.retry_policy()),
    );

    let app_state = AppState { generation_client };

    info!(
        "Using text model {} and image model {}",
        config.text_model, config.image_model
    );
    info!("Starting HTTP server on {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().limit(64 * 1024 * 1024))
            .wrap(middleware::Logger::default())
            .configure(handlers::configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
