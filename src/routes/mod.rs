// Route exports
pub mod ai;
pub mod catalog;
pub mod recommendations;

use actix_web::{error, http::StatusCode, web, HttpResponse};
use std::sync::Arc;
use crate::models::ErrorResponse;
use crate::services::{GeminiClient, RecommendationService};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RecommendationService>,
    pub gemini: Arc<GeminiClient>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(recommendations::configure)
            .configure(catalog::configure)
            .configure(ai::configure),
    );
}

pub(crate) fn bad_request(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(400, error, message))
}

pub(crate) fn not_found(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(404, error, message))
}

pub(crate) fn internal_error(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(500, error, message))
}

impl error::ResponseError for ErrorResponse {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ErrorResponse::new(400, "invalid_json", format!("Invalid JSON: {}", err)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    ErrorResponse::new(400, "invalid_query", format!("Invalid query: {}", err)).into()
}
