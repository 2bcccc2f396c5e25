use async_trait::async_trait;
use thiserror::Error;
use crate::models::{
    CatalogEntry, CreateProfileRequest, MenuItem, MenuItemWithRestaurant, Recommendation,
    RecommendationWithDetails, Restaurant, RestaurantWithMenuItems, UpdateProfileRequest,
    UserProfile,
};

/// Errors that can occur when reading or writing meal data
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Persistence seam for profiles, the restaurant catalog and stored recommendations
///
/// Both the PostgreSQL and the in-memory backend implement this trait, so the
/// scoring pipeline runs unchanged on either.
#[async_trait]
pub trait MealStore: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError>;

    /// Create the profile for `request.user_id`, replacing any existing one
    async fn create_profile(&self, request: CreateProfileRequest) -> Result<UserProfile, StoreError>;

    /// Apply a partial update. Returns `None` when the user has no profile.
    async fn update_profile(
        &self,
        user_id: &str,
        updates: UpdateProfileRequest,
    ) -> Result<Option<UserProfile>, StoreError>;

    async fn get_restaurants(&self) -> Result<Vec<Restaurant>, StoreError>;

    async fn get_restaurant_with_menu_items(
        &self,
        id: &str,
    ) -> Result<Option<RestaurantWithMenuItems>, StoreError>;

    async fn create_restaurant(&self, restaurant: Restaurant) -> Result<Restaurant, StoreError>;

    async fn get_menu_items(&self, restaurant_id: Option<&str>) -> Result<Vec<MenuItem>, StoreError>;

    async fn get_menu_item_with_restaurant(
        &self,
        id: &str,
    ) -> Result<Option<MenuItemWithRestaurant>, StoreError>;

    async fn create_menu_item(&self, item: MenuItem) -> Result<MenuItem, StoreError>;

    /// Every menu item joined with its restaurant, in a stable order
    async fn get_catalog(&self) -> Result<Vec<CatalogEntry>, StoreError>;

    /// Atomically swap the user's stored recommendations for `recommendations`
    ///
    /// Slice order is the ranking order and is preserved on read for equal scores.
    async fn replace_recommendations(
        &self,
        user_id: &str,
        recommendations: &[Recommendation],
    ) -> Result<(), StoreError>;

    /// Stored recommendations joined with item and restaurant, best first
    async fn get_recommendations(
        &self,
        user_id: &str,
    ) -> Result<Vec<RecommendationWithDetails>, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}

/// Build a stored profile from a create request
pub fn profile_from_request(request: CreateProfileRequest) -> UserProfile {
    UserProfile {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: request.user_id,
        daily_calories: request.daily_calories,
        protein_target: request.protein_target,
        carb_limit: request.carb_limit,
        fat_target: request.fat_target,
        max_meal_price: request.max_meal_price,
        monthly_budget: request.monthly_budget,
        dietary_restrictions: request.dietary_restrictions,
    }
}

/// Merge a partial update into a stored profile; absent fields are kept and
/// an explicit `null` clears an optional target
pub fn apply_profile_update(profile: &mut UserProfile, updates: UpdateProfileRequest) {
    if let Some(daily_calories) = updates.daily_calories {
        profile.daily_calories = daily_calories;
    }
    if let Some(protein_target) = updates.protein_target {
        profile.protein_target = protein_target;
    }
    if let Some(carb_limit) = updates.carb_limit {
        profile.carb_limit = carb_limit;
    }
    if let Some(fat_target) = updates.fat_target {
        profile.fat_target = fat_target;
    }
    if let Some(max_meal_price) = updates.max_meal_price {
        profile.max_meal_price = max_meal_price;
    }
    if let Some(monthly_budget) = updates.monthly_budget {
        profile.monthly_budget = monthly_budget;
    }
    if let Some(restrictions) = updates.dietary_restrictions {
        profile.dietary_restrictions = restrictions;
    }
}
