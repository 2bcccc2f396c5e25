use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OwnedMutexGuard;
use crate::core::{summarize_impact, Recommender};
use crate::models::{
    CreateProfileRequest, ImpactSummary, ProfileResponse, Recommendation, RecommendationWithDetails,
    UpdateProfileRequest, UserProfile,
};
use crate::services::cache::{CacheKey, CacheManager};
use crate::services::store::{MealStore, StoreError};

/// Per-user async locks, dropped again once nobody holds them
#[derive(Default)]
struct UserLocks {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl UserLocks {
    fn acquire(&self, user_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(user_id.to_string()).or_default().clone()
    }

    fn release(&self, user_id: &str) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if locks.get(user_id).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(user_id);
        }
    }

    async fn lock(&self, user_id: &str) -> UserGuard<'_> {
        let guard = self.acquire(user_id).lock_owned().await;
        UserGuard {
            locks: self,
            user_id: user_id.to_string(),
            guard: Some(guard),
        }
    }
}

/// Holds one user's lock; unlocks and prunes the map entry on drop
struct UserGuard<'a> {
    locks: &'a UserLocks,
    user_id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for UserGuard<'_> {
    fn drop(&mut self) {
        // The guard owns a clone of the Arc, so it must go before the count check
        self.guard.take();
        self.locks.release(&self.user_id);
    }
}

/// Profile and recommendation workflows over a `MealStore`
///
/// Everything that writes a user's profile, their recommendations, or the
/// cached copies of either runs under that user's lock. Profile writes and
/// regeneration therefore never interleave, and a cache fill from an older
/// store read cannot land after a newer write. Different users run in
/// parallel.
pub struct RecommendationService {
    store: Arc<dyn MealStore>,
    recommender: Recommender,
    cache: Option<Arc<CacheManager>>,
    user_locks: UserLocks,
}

impl RecommendationService {
    pub fn new(store: Arc<dyn MealStore>, recommender: Recommender, cache: Option<Arc<CacheManager>>) -> Self {
        Self {
            store,
            recommender,
            cache,
            user_locks: UserLocks::default(),
        }
    }

    pub fn store(&self) -> &Arc<dyn MealStore> {
        &self.store
    }

    /// Score the whole catalog for `user_id` and persist the result
    ///
    /// A user without a profile gets an empty list and any previously stored
    /// recommendations are left as they are.
    pub async fn generate_recommendations(
        &self,
        user_id: &str,
    ) -> Result<Vec<RecommendationWithDetails>, StoreError> {
        let _guard = self.user_locks.lock(user_id).await;

        // Always the stored profile, never the cached one
        let Some(profile) = self.store.get_profile(user_id).await? else {
            tracing::debug!("No profile for user {}, skipping generation", user_id);
            return Ok(Vec::new());
        };
        self.cache_profile(&profile).await;

        self.rank_and_store(&profile).await
    }

    /// Caller holds the user's lock
    async fn rank_and_store(&self, profile: &UserProfile) -> Result<Vec<RecommendationWithDetails>, StoreError> {
        let user_id = profile.user_id.as_str();
        let catalog = self.store.get_catalog().await?;
        let ranked = self.recommender.rank(profile, catalog);
        tracing::info!(
            "Generated {} recommendations for user {} ({} candidates, {} excluded, {} below threshold)",
            ranked.items.len(),
            user_id,
            ranked.total_candidates,
            ranked.excluded,
            ranked.below_threshold
        );

        let results = ranked.into_recommendations(user_id);
        let stored: Vec<Recommendation> = results.iter().map(|r| r.recommendation.clone()).collect();
        self.store.replace_recommendations(user_id, &stored).await?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.set(&CacheKey::recommendations(user_id), &results).await {
                tracing::warn!("Failed to cache recommendations for {}: {}", user_id, e);
            }
        }

        Ok(results)
    }

    /// Stored recommendations, best first; read through the cache when configured
    pub async fn get_recommendations(
        &self,
        user_id: &str,
    ) -> Result<Vec<RecommendationWithDetails>, StoreError> {
        let Some(cache) = &self.cache else {
            return self.store.get_recommendations(user_id).await;
        };

        let key = CacheKey::recommendations(user_id);
        if let Ok(cached) = cache.get::<Vec<RecommendationWithDetails>>(&key).await {
            return Ok(cached);
        }

        let _guard = self.user_locks.lock(user_id).await;
        let results = self.store.get_recommendations(user_id).await?;
        if !results.is_empty() {
            if let Err(e) = cache.set(&key, &results).await {
                tracing::warn!("Failed to cache recommendations for {}: {}", user_id, e);
            }
        }

        Ok(results)
    }

    /// Impact summary over the user's stored recommendations
    pub async fn get_impact(&self, user_id: &str) -> Result<ImpactSummary, StoreError> {
        let recommendations = self.get_recommendations(user_id).await?;
        Ok(summarize_impact(&recommendations))
    }

    /// Stored profile; read through the cache when configured
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let Some(cache) = &self.cache else {
            return self.store.get_profile(user_id).await;
        };

        if let Ok(profile) = cache.get::<UserProfile>(&CacheKey::profile(user_id)).await {
            return Ok(Some(profile));
        }

        let _guard = self.user_locks.lock(user_id).await;
        let profile = self.store.get_profile(user_id).await?;
        if let Some(profile) = &profile {
            self.cache_profile(profile).await;
        }

        Ok(profile)
    }

    /// Create (or replace) a profile and regenerate its recommendations
    pub async fn create_profile(&self, request: CreateProfileRequest) -> Result<ProfileResponse, StoreError> {
        let _guard = self.user_locks.lock(&request.user_id).await;

        let profile = self.store.create_profile(request).await?;
        self.cache_profile(&profile).await;
        tracing::info!("Created profile for user {}", profile.user_id);

        let recommendations = self.rank_and_store(&profile).await?;
        Ok(ProfileResponse {
            profile,
            recommendations,
        })
    }

    /// Apply a partial update and regenerate; `None` when the user has no profile
    pub async fn update_profile(
        &self,
        user_id: &str,
        updates: UpdateProfileRequest,
    ) -> Result<Option<ProfileResponse>, StoreError> {
        let _guard = self.user_locks.lock(user_id).await;

        let Some(profile) = self.store.update_profile(user_id, updates).await? else {
            return Ok(None);
        };
        self.cache_profile(&profile).await;
        tracing::info!("Updated profile for user {}", user_id);

        let recommendations = self.rank_and_store(&profile).await?;
        Ok(Some(ProfileResponse {
            profile,
            recommendations,
        }))
    }

    async fn cache_profile(&self, profile: &UserProfile) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.set(&CacheKey::profile(&profile.user_id), profile).await {
                tracing::warn!("Failed to cache profile for {}: {}", profile.user_id, e);
            }
        }
    }
}
