use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Request to create a nutrition profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(range(min = 1))]
    #[serde(rename = "dailyCalories")]
    pub daily_calories: i32,
    #[validate(range(min = 0))]
    #[serde(rename = "proteinTarget")]
    pub protein_target: i32,
    #[validate(range(min = 0))]
    #[serde(rename = "carbLimit", default)]
    pub carb_limit: Option<i32>,
    #[validate(range(min = 0))]
    #[serde(rename = "fatTarget", default)]
    pub fat_target: Option<i32>,
    #[validate(range(min = 0.0))]
    #[serde(rename = "maxMealPrice")]
    pub max_meal_price: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "monthlyBudget", default)]
    pub monthly_budget: Option<f64>,
    #[serde(rename = "dietaryRestrictions", default)]
    pub dietary_restrictions: Vec<String>,
}

/// Partial profile update; absent fields keep their stored value
///
/// The optional targets (`carbLimit`, `fatTarget`, `monthlyBudget`) take an
/// explicit `null` to clear them, which is why they are `Option<Option<_>>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "dailyCalories", default)]
    pub daily_calories: Option<i32>,
    #[validate(range(min = 0))]
    #[serde(rename = "proteinTarget", default)]
    pub protein_target: Option<i32>,
    #[validate(range(min = 0))]
    #[serde(
        rename = "carbLimit",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub carb_limit: Option<Option<i32>>,
    #[validate(range(min = 0))]
    #[serde(
        rename = "fatTarget",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub fat_target: Option<Option<i32>>,
    #[validate(range(min = 0.0))]
    #[serde(rename = "maxMealPrice", default)]
    pub max_meal_price: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(
        rename = "monthlyBudget",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub monthly_budget: Option<Option<f64>>,
    #[serde(rename = "dietaryRestrictions", default)]
    pub dietary_restrictions: Option<Vec<String>>,
}

/// A present key becomes `Some`, so `null` reads as `Some(None)` and an
/// absent key falls back to the field default
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query parameters for listing menu items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemQuery {
    #[serde(rename = "restaurantId", default)]
    pub restaurant_id: Option<String>,
}

/// Free-text preferences sent alongside AI meal requests
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MealPreferences {
    #[validate(length(min = 1, message = "Dietary goals are required"))]
    #[serde(rename = "dietaryGoals")]
    pub dietary_goals: String,
    #[serde(default)]
    pub restrictions: String,
    #[validate(length(min = 1, message = "Budget range is required"))]
    pub budget: String,
    #[serde(rename = "cuisinePreference", default)]
    pub cuisine_preference: String,
    #[serde(rename = "activityLevel", default)]
    pub activity_level: Option<String>,
    #[serde(rename = "healthConditions", default)]
    pub health_conditions: Option<String>,
}

/// Request for meal ideas drawn from a health document
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DocumentMealRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "documentText")]
    pub document_text: String,
    #[validate(nested)]
    pub preferences: MealPreferences,
}

/// Request for restaurant suggestions near a location
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VenueRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    #[serde(default)]
    pub preferences: Option<MealPreferences>,
}
