use serde::{Deserialize, Serialize};

/// Nutrition and budget profile for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "dailyCalories")]
    pub daily_calories: i32,
    #[serde(rename = "proteinTarget")]
    pub protein_target: i32,
    #[serde(rename = "carbLimit", default)]
    pub carb_limit: Option<i32>,
    #[serde(rename = "fatTarget", default)]
    pub fat_target: Option<i32>,
    #[serde(rename = "maxMealPrice")]
    pub max_meal_price: f64,
    #[serde(rename = "monthlyBudget", default)]
    pub monthly_budget: Option<f64>,
    #[serde(rename = "dietaryRestrictions", default)]
    pub dietary_restrictions: Vec<String>,
}

/// Restaurant with ownership badges and community stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub rating: f64,
    #[serde(rename = "reviewCount", default)]
    pub review_count: i32,
    #[serde(rename = "priceLevel")]
    pub price_level: i32,
    #[serde(rename = "cuisineType")]
    pub cuisine_type: String,
    #[serde(rename = "isWomanOwned", default)]
    pub is_woman_owned: bool,
    #[serde(rename = "isMinorityOwned", default)]
    pub is_minority_owned: bool,
    #[serde(rename = "isFamilyOwned", default)]
    pub is_family_owned: bool,
    #[serde(rename = "localFarmCount", default)]
    pub local_farm_count: i32,
    #[serde(rename = "employeeCount", default)]
    pub employee_count: i32,
    #[serde(rename = "mealsDonatedThisYear", default)]
    pub meals_donated_this_year: i32,
}

impl Restaurant {
    /// True when the restaurant carries any local ownership badge
    pub fn is_local_business(&self) -> bool {
        self.is_woman_owned || self.is_minority_owned || self.is_family_owned
    }
}

/// Menu item with nutrition facts and dietary flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    #[serde(rename = "restaurantId")]
    pub restaurant_id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(rename = "isVegan", default)]
    pub is_vegan: bool,
    #[serde(rename = "isVegetarian", default)]
    pub is_vegetarian: bool,
    #[serde(rename = "isGlutenFree", default)]
    pub is_gluten_free: bool,
    #[serde(rename = "isKeto", default)]
    pub is_keto: bool,
    #[serde(rename = "isDairyFree", default)]
    pub is_dairy_free: bool,
    #[serde(rename = "isNutFree", default)]
    pub is_nut_free: bool,
    #[serde(rename = "isHalal", default)]
    pub is_halal: bool,
    #[serde(rename = "isKosher", default)]
    pub is_kosher: bool,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

/// A scored menu item persisted for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "menuItemId")]
    pub menu_item_id: String,
    #[serde(rename = "matchScore")]
    pub match_score: i32,
    #[serde(rename = "reasonTags")]
    pub reason_tags: Vec<String>,
}

/// Recommendation joined with the item and restaurant it points at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationWithDetails {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    #[serde(rename = "menuItem")]
    pub menu_item: MenuItem,
    pub restaurant: Restaurant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantWithMenuItems {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    #[serde(rename = "menuItems")]
    pub menu_items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemWithRestaurant {
    #[serde(flatten)]
    pub menu_item: MenuItem,
    pub restaurant: Restaurant,
}

/// A catalog entry: a menu item already joined with its restaurant
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub menu_item: MenuItem,
    pub restaurant: Restaurant,
}

/// Point values and ratios used by the scorer
///
/// Defaults reproduce the production rule set; every field can be
/// overridden from the `[scoring]` config section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringRules {
    pub within_budget_points: i32,
    pub budget_friendly_points: i32,
    pub budget_friendly_ratio: f64,
    pub over_budget_penalty: i32,
    pub meals_per_day: f64,
    pub perfect_portion_points: i32,
    pub perfect_portion_tolerance: f64,
    pub close_portion_points: i32,
    pub close_portion_tolerance: f64,
    pub protein_points: i32,
    pub protein_min_ratio: f64,
    pub high_protein_ratio: f64,
    pub restriction_points: i32,
    pub local_business_points: i32,
    pub min_match_score: i32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            within_budget_points: 40,
            budget_friendly_points: 10,
            budget_friendly_ratio: 0.8,
            over_budget_penalty: 20,
            meals_per_day: 3.0,
            perfect_portion_points: 20,
            perfect_portion_tolerance: 0.2,
            close_portion_points: 10,
            close_portion_tolerance: 0.4,
            protein_points: 20,
            protein_min_ratio: 0.8,
            high_protein_ratio: 1.2,
            restriction_points: 5,
            local_business_points: 5,
            min_match_score: 30,
        }
    }
}

/// Meal idea produced by the LLM generator (or its fallback)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealIdea {
    pub name: String,
    pub description: String,
    #[serde(rename = "nutritionInfo")]
    pub nutrition_info: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VenueType {
    Restaurant,
    FoodTruck,
}

/// Nearby restaurant or food truck suggested by the LLM generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueSuggestion {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub venue_type: VenueType,
    pub cuisine: String,
    pub rating: f64,
    pub lat: f64,
    pub lng: f64,
    /// Distance in miles
    pub distance: f64,
    pub description: String,
    #[serde(rename = "healthyOptions", default)]
    pub healthy_options: Vec<String>,
    #[serde(rename = "priceRange")]
    pub price_range: String,
}
