// HTTP tests for the /api/v1 routes, backed by the in-memory store

use actix_web::{test, web, App};
use meal_match::core::Recommender;
use meal_match::models::{
    ErrorResponse, HealthResponse, ImpactSummary, MealIdeasResponse, ProfileResponse, RecommendationWithDetails,
    Restaurant, VenueSuggestionsResponse,
};
use meal_match::routes::{configure_routes, handle_json_payload_error, AppState};
use meal_match::services::{GeminiClient, MemoryStore, RecommendationService};
use serde_json::{json, Value};
use std::sync::Arc;

fn create_test_state() -> AppState {
    let service = RecommendationService::new(Arc::new(MemoryStore::seeded()), Recommender::default(), None);
    // No API key: AI routes exercise their fallback paths without the network
    let gemini = GeminiClient::new("http://127.0.0.1:9", "gemini-2.5-pro", None, 1).unwrap();
    AppState {
        service: Arc::new(service),
        gemini: Arc::new(gemini),
    }
}

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(create_test_state()))
                .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
                .configure(configure_routes),
        )
        .await
    };
}

fn vegan_profile(user_id: &str) -> Value {
    json!({
        "userId": user_id,
        "dailyCalories": 2000,
        "proteinTarget": 120,
        "maxMealPrice": 15.0,
        "dietaryRestrictions": ["Vegan"]
    })
}

#[actix_web::test]
async fn test_health() {
    let app = test_app!();
    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.status, "healthy");
}

#[actix_web::test]
async fn test_create_profile_returns_recommendations() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/user-profile")
        .set_json(vegan_profile("user-1"))
        .to_request();
    let body: ProfileResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.profile.user_id, "user-1");
    assert!(!body.recommendations.is_empty());
    assert!(body.recommendations.iter().all(|r| r.menu_item.is_vegan));

    let req = test::TestRequest::get().uri("/api/v1/recommendations/user-1").to_request();
    let stored: Vec<RecommendationWithDetails> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stored.len(), body.recommendations.len());
}

#[actix_web::test]
async fn test_recommendation_json_shape() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/user-profile")
        .set_json(vegan_profile("user-1"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let first = &body["recommendations"][0];
    assert!(first["matchScore"].is_i64());
    assert!(first["reasonTags"].is_array());
    assert!(first["menuItem"]["isVegan"].as_bool().unwrap());
    assert!(first["restaurant"]["name"].is_string());
}

#[actix_web::test]
async fn test_invalid_profile_rejected() {
    let app = test_app!();
    let mut profile = vegan_profile("user-1");
    profile["dailyCalories"] = json!(0);

    let req = test::TestRequest::post()
        .uri("/api/v1/user-profile")
        .set_json(profile)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.status_code, 400);
}

#[actix_web::test]
async fn test_malformed_json_rejected() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/user-profile")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "invalid_json");
    assert_eq!(body.status_code, 400);
}

#[actix_web::test]
async fn test_missing_profile_is_404() {
    let app = test_app!();
    let req = test::TestRequest::get().uri("/api/v1/user-profile/ghost").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let req = test::TestRequest::put()
        .uri("/api/v1/user-profile/ghost")
        .set_json(json!({ "maxMealPrice": 10.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_update_profile_partial() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/user-profile")
        .set_json(vegan_profile("user-1"))
        .to_request();
    let _: ProfileResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::put()
        .uri("/api/v1/user-profile/user-1")
        .set_json(json!({ "dietaryRestrictions": ["keto"] }))
        .to_request();
    let body: ProfileResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.profile.daily_calories, 2000);
    assert_eq!(body.profile.dietary_restrictions, vec!["keto"]);
    assert!(body.recommendations.iter().all(|r| r.menu_item.is_keto));
}

#[actix_web::test]
async fn test_update_profile_null_clears_target() {
    let app = test_app!();
    let mut profile = vegan_profile("user-1");
    profile["carbLimit"] = json!(150);
    profile["monthlyBudget"] = json!(400.0);
    let req = test::TestRequest::post()
        .uri("/api/v1/user-profile")
        .set_json(profile)
        .to_request();
    let created: ProfileResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created.profile.carb_limit, Some(150));

    let req = test::TestRequest::put()
        .uri("/api/v1/user-profile/user-1")
        .set_json(json!({ "carbLimit": null }))
        .to_request();
    let body: ProfileResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.profile.carb_limit, None);
    assert_eq!(body.profile.monthly_budget, Some(400.0));
}

#[actix_web::test]
async fn test_impact_summary() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/user-profile")
        .set_json(vegan_profile("user-1"))
        .to_request();
    let _: ProfileResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get().uri("/api/v1/impact/user-1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["businessesSupported"], 2);
    assert_eq!(body["achievements"].as_array().map(Vec::len), Some(3));

    let req = test::TestRequest::get().uri("/api/v1/impact/ghost").to_request();
    let empty: ImpactSummary = test::call_and_read_body_json(&app, req).await;
    assert_eq!(empty.meals_donated, 0);
    assert!(empty.achievements.iter().all(|a| !a.earned));
}

#[actix_web::test]
async fn test_generate_without_profile_is_empty() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations/ghost/generate")
        .to_request();
    let body: Vec<RecommendationWithDetails> = test::call_and_read_body_json(&app, req).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn test_catalog_routes() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/api/v1/restaurants").to_request();
    let restaurants: Vec<Restaurant> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(restaurants.len(), 3);

    let req = test::TestRequest::get().uri("/api/v1/restaurants/rest-1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["name"], "Green Garden Bistro");
    assert_eq!(body["menuItems"].as_array().map(Vec::len), Some(2));

    let req = test::TestRequest::get()
        .uri("/api/v1/menu-items?restaurantId=rest-2")
        .to_request();
    let items: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(items.len(), 2);

    let req = test::TestRequest::get().uri("/api/v1/menu-items/item-3").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["restaurant"]["id"], "rest-3");

    let req = test::TestRequest::get().uri("/api/v1/restaurants/nope").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::get().uri("/api/v1/menu-items/nope").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn test_document_meal_ideas_without_key() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/ai/meal-recommendations")
        .set_json(json!({
            "documentText": "Cholesterol slightly elevated",
            "preferences": { "dietaryGoals": "weight-loss", "budget": "$10-15" }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "AI service configuration error");
}

#[actix_web::test]
async fn test_document_meal_ideas_require_preferences() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/ai/meal-recommendations")
        .set_json(json!({
            "documentText": "Notes",
            "preferences": { "dietaryGoals": "", "budget": "" }
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}

#[actix_web::test]
async fn test_personalized_meals_fall_back() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/ai/personalized-meals")
        .set_json(json!({ "dietaryGoals": "muscle-gain", "budget": "$15-25" }))
        .to_request();
    let body: MealIdeasResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.recommendations.len(), 3);
    assert!(body.recommendations[0].benefits.contains(&"supports muscle building".to_string()));
}

#[actix_web::test]
async fn test_venue_suggestions_fall_back() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/ai/restaurants")
        .set_json(json!({ "lat": 40.7128, "lng": -74.0060 }))
        .to_request();
    let body: VenueSuggestionsResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.restaurants.len(), 4);
    assert_eq!(body.restaurants[0].name, "Green Bowl Co.");

    let req = test::TestRequest::post()
        .uri("/api/v1/ai/restaurants")
        .set_json(json!({ "lat": 123.0, "lng": 0.0 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}
