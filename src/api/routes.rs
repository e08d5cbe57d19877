// API routes configuration
// Author: Gabriel Demetrios Lafis

use actix_web::{web, HttpResponse, Responder};

use super::handlers;

/// Configure API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // Health check
            .route("/health", web::get().to(health_check))

            // Blocks
            .service(
                web::scope("/blocks")
                    .route("/preview", web::post().to(handlers::preview_blocks))
                    .route("/detect", web::post().to(handlers::detect_columns))
                    .route("/apply-auth", web::post().to(handlers::apply_saved_auth))
            )
            .route("/mapping", web::post().to(handlers::generate_mapping))

            // Saved auth presets
            .service(
                web::scope("/presets")
                    .route("", web::get().to(handlers::list_presets))
                    .route("", web::post().to(handlers::create_preset))
                    .route("/{id}", web::delete().to(handlers::delete_preset))
            )

            // Demo request
            .route("/send", web::post().to(handlers::send_request))
    );
}

/// Health check handler
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
