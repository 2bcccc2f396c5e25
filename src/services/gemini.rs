use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use crate::core::{distance_miles, round_miles};
use crate::models::{
    MealIdea, MealIdeasResponse, MealPreferences, VenueSuggestion, VenueSuggestionsResponse,
};
use crate::services::fallback::{fallback_meal_ideas, fallback_venues};

/// Errors that can occur when calling the Gemini API
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Gemini API key not configured")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Gemini API overloaded")]
    Overloaded,

    #[error("API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid JSON from model: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Empty response from model")]
    EmptyContent,
}

const DOCUMENT_PROMPT: &str = "You are a nutrition expert AI that analyzes health documents and provides personalized meal recommendations.
Suggest 5 healthy meals that align with any health conditions or nutritional needs in the document, match the user's goals and restrictions, fit the budget and consider the cuisine preference.
Respond with JSON: {\"recommendations\":[{\"name\":\"\",\"description\":\"\",\"nutritionInfo\":\"\",\"ingredients\":[],\"benefits\":[]}]}";

const PERSONALIZED_PROMPT: &str = "You are a nutrition expert AI that creates personalized meal recommendations based on user profiles.
Create 6 healthy meals that could be found at local restaurants and food trucks and that match the profile below.
Respond with JSON: {\"recommendations\":[{\"name\":\"\",\"description\":\"\",\"nutritionInfo\":\"\",\"ingredients\":[],\"benefits\":[]}]}";

const VENUE_PROMPT: &str = "You are a local restaurant expert AI that recommends healthy restaurants and food trucks.
Suggest 8 venues (4-5 restaurants, 3-4 food trucks) within 0.01 degrees of the given location, rated 4.2-4.9, with a price range of Budget, Moderate or Premium.
Respond with JSON: {\"restaurants\":[{\"id\":\"\",\"name\":\"\",\"type\":\"restaurant|food_truck\",\"cuisine\":\"\",\"rating\":4.5,\"lat\":0.0,\"lng\":0.0,\"distance\":0.3,\"description\":\"\",\"healthyOptions\":[],\"priceRange\":\"\"}]}";

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Gemini `generateContent` client for meal ideas and venue suggestions
///
/// The API key is optional so the service can start without it; calls then
/// fail with `MissingApiKey` or use the canned fallback data.
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send one prompt and return the model's raw text output
    async fn generate(&self, system_prompt: &str, contents: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint.trim_end_matches('/'),
            self.model,
            urlencoding::encode(api_key)
        );

        let body = json!({
            "systemInstruction": { "parts": [{ "text": system_prompt }] },
            "contents": [{ "role": "user", "parts": [{ "text": contents }] }],
            "generationConfig": { "responseMimeType": "application/json" },
        });

        tracing::debug!("Calling Gemini model {}", self.model);

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(LlmError::Overloaded);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or(LlmError::EmptyContent)
    }

    /// Meal ideas drawn from a health document
    ///
    /// Only an overloaded API degrades to the fallback set; every other
    /// failure is returned to the caller.
    pub async fn document_meal_ideas(
        &self,
        document_text: &str,
        preferences: &MealPreferences,
    ) -> Result<Vec<MealIdea>, LlmError> {
        let contents = format!(
            "{}\n\nDocument to analyze:\n{}",
            describe_preferences(preferences),
            document_text
        );

        match self.generate(DOCUMENT_PROMPT, &contents).await {
            Ok(text) => Ok(serde_json::from_str::<MealIdeasResponse>(&text)?.recommendations),
            Err(LlmError::Overloaded) => {
                tracing::warn!("Gemini API overloaded, serving fallback meal ideas");
                Ok(fallback_meal_ideas(preferences))
            }
            Err(e) => Err(e),
        }
    }

    /// Meal ideas for a user profile; any failure serves the fallback set
    pub async fn personalized_meal_ideas(&self, preferences: &MealPreferences) -> Vec<MealIdea> {
        let result = match self.generate(PERSONALIZED_PROMPT, &describe_preferences(preferences)).await {
            Ok(text) => serde_json::from_str::<MealIdeasResponse>(&text)
                .map(|r| r.recommendations)
                .map_err(LlmError::from),
            Err(e) => Err(e),
        };

        result.unwrap_or_else(|e| {
            tracing::warn!("Personalized meal ideas unavailable ({}), serving fallback", e);
            fallback_meal_ideas(preferences)
        })
    }

    /// Healthy venues near a location; any failure serves the fallback set
    ///
    /// Distances are recomputed from the returned coordinates.
    pub async fn venue_suggestions(
        &self,
        lat: f64,
        lng: f64,
        preferences: Option<&MealPreferences>,
    ) -> Vec<VenueSuggestion> {
        let mut contents = format!("Location: lat {}, lng {}", lat, lng);
        if let Some(preferences) = preferences {
            contents.push('\n');
            contents.push_str(&describe_preferences(preferences));
        }

        let result = match self.generate(VENUE_PROMPT, &contents).await {
            Ok(text) => serde_json::from_str::<VenueSuggestionsResponse>(&text)
                .map(|r| r.restaurants)
                .map_err(LlmError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(mut venues) => {
                for venue in &mut venues {
                    venue.distance = round_miles(distance_miles(lat, lng, venue.lat, venue.lng));
                }
                venues
            }
            Err(e) => {
                tracing::warn!("Venue suggestions unavailable ({}), serving fallback", e);
                fallback_venues(lat, lng)
            }
        }
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

/// Render preferences as the user-profile block of a prompt
fn describe_preferences(preferences: &MealPreferences) -> String {
    format!(
        "User Profile:\n- Dietary Goals: {}\n- Dietary Restrictions: {}\n- Budget: {}\n- Cuisine Preference: {}\n- Activity Level: {}\n- Health Conditions: {}",
        or_default(&preferences.dietary_goals, "General health"),
        or_default(&preferences.restrictions, "None"),
        or_default(&preferences.budget, "Any"),
        or_default(&preferences.cuisine_preference, "Any"),
        preferences.activity_level.as_deref().unwrap_or("Moderate"),
        preferences.health_conditions.as_deref().unwrap_or("None"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn preferences() -> MealPreferences {
        MealPreferences {
            dietary_goals: "muscle-gain".to_string(),
            restrictions: "vegetarian".to_string(),
            budget: "$10-15".to_string(),
            ..Default::default()
        }
    }

    fn gemini_body(text: &str) -> String {
        json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        })
        .to_string()
    }

    fn client_for(url: &str, api_key: Option<&str>) -> GeminiClient {
        GeminiClient::new(url, "gemini-2.5-flash", api_key.map(String::from), 5).unwrap()
    }

    #[tokio::test]
    async fn test_document_ideas_parsed_from_model_text() {
        let mut server = mockito::Server::new_async().await;
        let ideas = json!({
            "recommendations": [{
                "name": "Lentil Soup",
                "description": "Hearty soup",
                "nutritionInfo": "350 calories",
                "ingredients": ["lentils"],
                "benefits": ["fiber"]
            }]
        });
        let mock = server
            .mock("POST", Matcher::Regex("generateContent".to_string()))
            .match_query(Matcher::UrlEncoded("key".to_string(), "test key".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(gemini_body(&ideas.to_string()))
            .create_async()
            .await;

        let client = client_for(&server.url(), Some("test key"));
        let result = client.document_meal_ideas("Iron is low", &preferences()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Lentil Soup");
        assert_eq!(result[0].nutrition_info, "350 calories");
    }

    #[tokio::test]
    async fn test_document_ideas_fallback_only_when_overloaded() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Regex("generateContent".to_string()))
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = client_for(&server.url(), Some("k"));
        let result = client.document_meal_ideas("doc", &preferences()).await.unwrap();
        assert_eq!(result, fallback_meal_ideas(&preferences()));
    }

    #[tokio::test]
    async fn test_document_ideas_surface_other_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Regex("generateContent".to_string()))
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body("bad request")
            .create_async()
            .await;

        let client = client_for(&server.url(), Some("k"));
        let err = client.document_meal_ideas("doc", &preferences()).await.unwrap_err();
        assert!(matches!(err, LlmError::ApiError { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_document_ideas_require_api_key() {
        let client = client_for("http://127.0.0.1:9", None);
        let err = client.document_meal_ideas("doc", &preferences()).await.unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_personalized_ideas_fall_back_on_bad_json() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Regex("generateContent".to_string()))
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(gemini_body("not json"))
            .create_async()
            .await;

        let client = client_for(&server.url(), Some("k"));
        let ideas = client.personalized_meal_ideas(&preferences()).await;
        assert_eq!(ideas, fallback_meal_ideas(&preferences()));
    }

    #[tokio::test]
    async fn test_venue_distances_recomputed() {
        let mut server = mockito::Server::new_async().await;
        let venues = json!({
            "restaurants": [{
                "id": "v1",
                "name": "Kale Cart",
                "type": "food_truck",
                "cuisine": "Salads",
                "rating": 4.6,
                "lat": 40.7128,
                "lng": -74.0060,
                "distance": 1.9,
                "description": "Salads on wheels",
                "healthyOptions": ["Kale Bowl"],
                "priceRange": "Budget"
            }]
        });
        server
            .mock("POST", Matcher::Regex("generateContent".to_string()))
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(gemini_body(&venues.to_string()))
            .create_async()
            .await;

        let client = client_for(&server.url(), Some("k"));
        let result = client.venue_suggestions(40.7128, -74.0060, None).await;

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].venue_type, crate::models::VenueType::FoodTruck);
        assert_eq!(result[0].distance, 0.0);
    }

    #[tokio::test]
    async fn test_venues_without_key_use_fallback() {
        let client = client_for("http://127.0.0.1:9", None);
        let venues = client.venue_suggestions(40.0, -74.0, Some(&preferences())).await;
        assert_eq!(venues, fallback_venues(40.0, -74.0));
    }

    #[test]
    fn test_describe_preferences_defaults() {
        let text = describe_preferences(&MealPreferences {
            dietary_goals: "weight-loss".to_string(),
            budget: "$".to_string(),
            ..Default::default()
        });
        assert!(text.contains("Dietary Restrictions: None"));
        assert!(text.contains("Activity Level: Moderate"));
        assert!(text.contains("Cuisine Preference: Any"));
    }
}
