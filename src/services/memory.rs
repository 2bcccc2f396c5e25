use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use crate::models::{
    CatalogEntry, CreateProfileRequest, MenuItem, MenuItemWithRestaurant, Recommendation,
    RecommendationWithDetails, Restaurant, RestaurantWithMenuItems, UpdateProfileRequest,
    UserProfile,
};
use crate::services::seed::{demo_menu_items, demo_restaurants};
use crate::services::store::{apply_profile_update, profile_from_request, MealStore, StoreError};

#[derive(Debug, Default)]
struct MemoryState {
    profiles: HashMap<String, UserProfile>,
    // Vecs keep insertion order, which is the catalog order
    restaurants: Vec<Restaurant>,
    menu_items: Vec<MenuItem>,
    recommendations: HashMap<String, Vec<Recommendation>>,
}

impl MemoryState {
    fn restaurant(&self, id: &str) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id == id)
    }
}

/// In-process store used for local runs and tests
///
/// All state sits behind one lock, so a recommendation replace is never
/// observed half-done.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with the demo catalog
    pub fn seeded() -> Self {
        Self::with_catalog(demo_restaurants(), demo_menu_items())
    }

    pub fn with_catalog(restaurants: Vec<Restaurant>, menu_items: Vec<MenuItem>) -> Self {
        Self {
            state: RwLock::new(MemoryState {
                restaurants,
                menu_items,
                ..Default::default()
            }),
        }
    }
}

#[async_trait]
impl MealStore for MemoryStore {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.state.read().await.profiles.get(user_id).cloned())
    }

    async fn create_profile(&self, request: CreateProfileRequest) -> Result<UserProfile, StoreError> {
        let profile = profile_from_request(request);
        self.state
            .write()
            .await
            .profiles
            .insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }

    async fn update_profile(
        &self,
        user_id: &str,
        updates: UpdateProfileRequest,
    ) -> Result<Option<UserProfile>, StoreError> {
        let mut state = self.state.write().await;
        Ok(state.profiles.get_mut(user_id).map(|profile| {
            apply_profile_update(profile, updates);
            profile.clone()
        }))
    }

    async fn get_restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        Ok(self.state.read().await.restaurants.clone())
    }

    async fn get_restaurant_with_menu_items(
        &self,
        id: &str,
    ) -> Result<Option<RestaurantWithMenuItems>, StoreError> {
        let state = self.state.read().await;
        Ok(state.restaurant(id).map(|restaurant| RestaurantWithMenuItems {
            restaurant: restaurant.clone(),
            menu_items: state
                .menu_items
                .iter()
                .filter(|item| item.restaurant_id == id)
                .cloned()
                .collect(),
        }))
    }

    async fn create_restaurant(&self, restaurant: Restaurant) -> Result<Restaurant, StoreError> {
        let mut state = self.state.write().await;
        if state.restaurant(&restaurant.id).is_some() {
            return Err(StoreError::InvalidInput(format!(
                "Restaurant {} already exists",
                restaurant.id
            )));
        }
        state.restaurants.push(restaurant.clone());
        Ok(restaurant)
    }

    async fn get_menu_items(&self, restaurant_id: Option<&str>) -> Result<Vec<MenuItem>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .menu_items
            .iter()
            .filter(|item| restaurant_id.map_or(true, |id| item.restaurant_id == id))
            .cloned()
            .collect())
    }

    async fn get_menu_item_with_restaurant(
        &self,
        id: &str,
    ) -> Result<Option<MenuItemWithRestaurant>, StoreError> {
        let state = self.state.read().await;
        let Some(menu_item) = state.menu_items.iter().find(|item| item.id == id) else {
            return Ok(None);
        };

        Ok(state
            .restaurant(&menu_item.restaurant_id)
            .map(|restaurant| MenuItemWithRestaurant {
                menu_item: menu_item.clone(),
                restaurant: restaurant.clone(),
            }))
    }

    async fn create_menu_item(&self, item: MenuItem) -> Result<MenuItem, StoreError> {
        let mut state = self.state.write().await;
        if state.restaurant(&item.restaurant_id).is_none() {
            return Err(StoreError::NotFound(format!(
                "Restaurant {} for menu item {}",
                item.restaurant_id, item.id
            )));
        }
        state.menu_items.push(item.clone());
        Ok(item)
    }

    async fn get_catalog(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        let state = self.state.read().await;
        // Items whose restaurant is gone are skipped, like an inner join
        Ok(state
            .menu_items
            .iter()
            .filter_map(|item| {
                state.restaurant(&item.restaurant_id).map(|restaurant| CatalogEntry {
                    menu_item: item.clone(),
                    restaurant: restaurant.clone(),
                })
            })
            .collect())
    }

    async fn replace_recommendations(
        &self,
        user_id: &str,
        recommendations: &[Recommendation],
    ) -> Result<(), StoreError> {
        self.state
            .write()
            .await
            .recommendations
            .insert(user_id.to_string(), recommendations.to_vec());
        Ok(())
    }

    async fn get_recommendations(
        &self,
        user_id: &str,
    ) -> Result<Vec<RecommendationWithDetails>, StoreError> {
        let state = self.state.read().await;
        let Some(stored) = state.recommendations.get(user_id) else {
            return Ok(Vec::new());
        };

        let mut results: Vec<RecommendationWithDetails> = stored
            .iter()
            .filter_map(|rec| {
                let menu_item = state.menu_items.iter().find(|item| item.id == rec.menu_item_id)?;
                let restaurant = state.restaurant(&menu_item.restaurant_id)?;
                Some(RecommendationWithDetails {
                    recommendation: rec.clone(),
                    menu_item: menu_item.clone(),
                    restaurant: restaurant.clone(),
                })
            })
            .collect();

        results.sort_by(|a, b| b.recommendation.match_score.cmp(&a.recommendation.match_score));
        Ok(results)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
