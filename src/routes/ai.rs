use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    DocumentMealRequest, MealIdeasResponse, MealPreferences, VenueRequest, VenueSuggestionsResponse,
};
use crate::routes::{bad_request, internal_error, AppState};
use crate::services::LlmError;

/// Configure LLM-backed routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/ai/meal-recommendations", web::post().to(document_meal_ideas))
        .route("/ai/personalized-meals", web::post().to(personalized_meals))
        .route("/ai/restaurants", web::post().to(venue_suggestions));
}

/// Meal ideas from health-document text
///
/// POST /api/v1/ai/meal-recommendations
///
/// Request body:
/// ```json
/// {
///   "documentText": "string",
///   "preferences": {
///     "dietaryGoals": "weight-loss",
///     "restrictions": "vegetarian",
///     "budget": "$10-15",
///     "cuisinePreference": "Mediterranean"
///   }
/// }
/// ```
async fn document_meal_ideas(
    state: web::Data<AppState>,
    req: web::Json<DocumentMealRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Missing required preferences", errors.to_string());
    }

    match state
        .gemini
        .document_meal_ideas(&req.document_text, &req.preferences)
        .await
    {
        Ok(recommendations) => HttpResponse::Ok().json(MealIdeasResponse { recommendations }),
        Err(LlmError::MissingApiKey) => {
            tracing::error!("Meal ideas requested but no Gemini API key is configured");
            internal_error("AI service configuration error", LlmError::MissingApiKey.to_string())
        }
        Err(e) => {
            tracing::error!("Failed to generate meal ideas: {}", e);
            internal_error("Failed to process document and generate recommendations", e.to_string())
        }
    }
}

/// POST /api/v1/ai/personalized-meals
async fn personalized_meals(
    state: web::Data<AppState>,
    req: web::Json<MealPreferences>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Missing required preferences", errors.to_string());
    }

    let recommendations = state.gemini.personalized_meal_ideas(&req).await;
    HttpResponse::Ok().json(MealIdeasResponse { recommendations })
}

/// POST /api/v1/ai/restaurants
async fn venue_suggestions(state: web::Data<AppState>, req: web::Json<VenueRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Invalid location", errors.to_string());
    }

    let restaurants = state
        .gemini
        .venue_suggestions(req.lat, req.lng, req.preferences.as_ref())
        .await;
    tracing::debug!("Returning {} venue suggestions", restaurants.len());
    HttpResponse::Ok().json(VenueSuggestionsResponse { restaurants })
}
