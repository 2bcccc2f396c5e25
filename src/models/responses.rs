use serde::{Deserialize, Serialize};
use crate::models::domain::{MealIdea, RecommendationWithDetails, UserProfile, VenueSuggestion};

/// Response for profile create/update: the stored profile plus its fresh recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: UserProfile,
    pub recommendations: Vec<RecommendationWithDetails>,
}

/// Community impact of a user's current recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactSummary {
    /// Distinct woman-, minority- or family-owned restaurants
    #[serde(rename = "businessesSupported")]
    pub businesses_supported: usize,
    #[serde(rename = "localFarmPartners")]
    pub local_farm_partners: i32,
    #[serde(rename = "mealsDonated")]
    pub meals_donated: i32,
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub earned: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(status_code: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for ErrorResponse {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealIdeasResponse {
    pub recommendations: Vec<MealIdea>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueSuggestionsResponse {
    pub restaurants: Vec<VenueSuggestion>,
}
