// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CatalogEntry, MealIdea, MenuItem, MenuItemWithRestaurant, Recommendation,
    RecommendationWithDetails, Restaurant, RestaurantWithMenuItems, ScoringRules, UserProfile,
    VenueSuggestion, VenueType,
};
pub use requests::{CreateProfileRequest, DocumentMealRequest, MealPreferences, MenuItemQuery, UpdateProfileRequest, VenueRequest};
pub use responses::{
    Achievement, ErrorResponse, HealthResponse, ImpactSummary, MealIdeasResponse, ProfileResponse, VenueSuggestionsResponse,
};
