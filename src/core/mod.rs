// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod impact;
pub mod recommender;
pub mod restrictions;
pub mod scoring;

pub use distance::{distance_miles, round_miles};
pub use filters::{evaluate_restrictions, meets_threshold, passes_restrictions, RestrictionOutcome};
pub use impact::summarize_impact;
pub use recommender::{RankResult, RankedItem, Recommender};
pub use restrictions::{DietaryRestriction, RestrictionRule, RESTRICTION_RULES};
pub use scoring::{calculate_match_score, MatchScore, ScoreOutcome};
