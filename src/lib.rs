//! Meal Match - personalized meal recommendations from local restaurants
//!
//! Scores every menu item in the catalog against a user's nutrition profile
//! (budget, calorie and protein targets, dietary restrictions) and keeps the
//! best matches, with reasons, for each user.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_match_score, Recommender, ScoreOutcome};
pub use models::{MenuItem, Restaurant, ScoringRules, UserProfile};
