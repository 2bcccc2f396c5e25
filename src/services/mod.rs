// Service exports
pub mod cache;
pub mod fallback;
pub mod gemini;
pub mod memory;
pub mod postgres;
pub mod recommendations;
pub mod seed;
pub mod store;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use fallback::{fallback_meal_ideas, fallback_venues};
pub use gemini::{GeminiClient, LlmError};
pub use memory::MemoryStore;
pub use postgres::PostgresClient;
pub use recommendations::RecommendationService;
pub use seed::{demo_menu_items, demo_restaurants, seed_demo_catalog};
pub use store::{MealStore, StoreError};
