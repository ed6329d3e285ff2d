//! HTTP handlers and route configuration.

mod ads;
mod health;

use actix_web::web;

use crate::middleware::error::{json_error_handler, path_error_handler};

/// Configure all application routes.
///
/// Paths are registered without a trailing slash; the server trims it.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/ad")
                .route("", web::get().to(ads::list_ads))
                .route("/create", web::post().to(ads::create_ad))
                .route("/{id}", web::get().to(ads::get_ad))
                .route("/{id}/update", web::patch().to(ads::update_ad))
                .route("/{id}/delete", web::delete().to(ads::delete_ad))
                .route("/{id}/upload_image", web::post().to(ads::upload_image)),
        );
}
