use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{CreateProfileRequest, HealthResponse, UpdateProfileRequest};
use crate::routes::{bad_request, internal_error, not_found, AppState};

/// Configure health, profile, recommendation and impact routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/user-profile", web::post().to(create_profile))
        .route("/user-profile/{user_id}", web::get().to(get_profile))
        .route("/user-profile/{user_id}", web::put().to(update_profile))
        .route("/recommendations/{user_id}", web::get().to(get_recommendations))
        .route("/recommendations/{user_id}/generate", web::post().to(generate_recommendations))
        .route("/impact/{user_id}", web::get().to(get_impact));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.service.store().health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Create profile endpoint
///
/// POST /api/v1/user-profile
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "dailyCalories": 2000,
///   "proteinTarget": 120,
///   "maxMealPrice": 15.0,
///   "dietaryRestrictions": ["vegan"]
/// }
/// ```
///
/// Responds with the stored profile and its freshly generated recommendations.
async fn create_profile(
    state: web::Data<AppState>,
    req: web::Json<CreateProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_profile: {:?}", errors);
        return bad_request("Invalid profile data", errors.to_string());
    }

    match state.service.create_profile(req.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            tracing::error!("Failed to create profile: {}", e);
            internal_error("Failed to create profile", e.to_string())
        }
    }
}

async fn get_profile(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();

    match state.service.get_profile(&user_id).await {
        Ok(Some(profile)) => HttpResponse::Ok().json(profile),
        Ok(None) => not_found("Profile not found", format!("No profile for user {}", user_id)),
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", user_id, e);
            internal_error("Internal server error", e.to_string())
        }
    }
}

/// Partial profile update; regenerates recommendations
///
/// PUT /api/v1/user-profile/{userId}
async fn update_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateProfileRequest>,
) -> impl Responder {
    let user_id = path.into_inner();

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for update_profile {}: {:?}", user_id, errors);
        return bad_request("Invalid profile data", errors.to_string());
    }

    match state.service.update_profile(&user_id, req.into_inner()).await {
        Ok(Some(response)) => HttpResponse::Ok().json(response),
        Ok(None) => not_found("Profile not found", format!("No profile for user {}", user_id)),
        Err(e) => {
            tracing::error!("Failed to update profile for {}: {}", user_id, e);
            internal_error("Failed to update profile", e.to_string())
        }
    }
}

async fn get_recommendations(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();

    match state.service.get_recommendations(&user_id).await {
        Ok(recommendations) => HttpResponse::Ok().json(recommendations),
        Err(e) => {
            tracing::error!("Failed to fetch recommendations for {}: {}", user_id, e);
            internal_error("Internal server error", e.to_string())
        }
    }
}

/// Regenerate and return recommendations
///
/// POST /api/v1/recommendations/{userId}/generate
///
/// A user without a profile gets `[]`.
async fn generate_recommendations(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();
    tracing::info!("Generating recommendations for user: {}", user_id);

    match state.service.generate_recommendations(&user_id).await {
        Ok(recommendations) => HttpResponse::Ok().json(recommendations),
        Err(e) => {
            tracing::error!("Failed to generate recommendations for {}: {}", user_id, e);
            internal_error("Internal server error", e.to_string())
        }
    }
}

/// Community impact of the user's current recommendations
///
/// GET /api/v1/impact/{userId}
async fn get_impact(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();

    match state.service.get_impact(&user_id).await {
        Ok(impact) => HttpResponse::Ok().json(impact),
        Err(e) => {
            tracing::error!("Failed to build impact summary for {}: {}", user_id, e);
            internal_error("Internal server error", e.to_string())
        }
    }
}
