// src/handlers.rs
use crate::catalog;
use crate::models::{CreativeOptions, EncodedImage, ReferenceImages};
use crate::services::prompt_composer::{build_generation_request, compose_from_options};
use crate::AppState;
use actix_web::{Error, HttpResponse, web};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreativeBody {
    #[serde(default)]
    pub options: CreativeOptions,
    #[serde(default)]
    pub images: ReferenceImages,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
    pub image: EncodedImage,
    #[serde(default)]
    pub extra_context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GeneratedCreative {
    pub id: Uuid,
    pub image: String,
    pub prompt_used: String,
    pub aspect_ratio: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/catalog", web::get().to(get_catalog))
            .route("/prompt", web::post().to(preview_prompt))
            .route("/analyze", web::post().to(analyze_marketing))
            .route("/generate", web::post().to(generate_creative)),
    )
    .route("/health", web::get().to(health_check));
}

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "adsmith",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn get_catalog() -> HttpResponse {
    HttpResponse::Ok().json(catalog::catalog())
}

pub async fn preview_prompt(body: web::Json<CreativeBody>) -> Result<HttpResponse, Error> {
    let (prompt, size) = compose_from_options(&body.options, &body.images)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "prompt": prompt,
        "aspect_ratio": size.ratio
    })))
}

pub async fn analyze_marketing(
    body: web::Json<AnalyzeBody>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let body = body.into_inner();
    let context = body.extra_context.unwrap_or_default();

    let draft = data
        .generation_client
        .analyze_marketing(&body.image, &context)
        .await?;

    Ok(HttpResponse::Ok().json(draft))
}

pub async fn generate_creative(
    body: web::Json<CreativeBody>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let request = build_generation_request(&body.options, &body.images)?;
    info!(
        "Generating creative for mode {} with {} images",
        body.options.mode_id,
        request.images.len()
    );

    let image = data.generation_client.generate_creative(&request).await?;

    Ok(HttpResponse::Ok().json(GeneratedCreative {
        id: Uuid::new_v4(),
        image,
        prompt_used: request.prompt,
        aspect_ratio: request.aspect_ratio,
        created_at: Utc::now(),
    }))
}
