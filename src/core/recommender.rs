use crate::models::{
    CatalogEntry, MenuItem, Recommendation, RecommendationWithDetails, Restaurant, ScoringRules,
    UserProfile,
};
use crate::core::{
    filters::meets_threshold,
    scoring::{calculate_match_score, ScoreOutcome},
};
use rayon::prelude::*;

/// A catalog entry that survived filtering, with its score
#[derive(Debug, Clone)]
pub struct RankedItem {
    pub menu_item: MenuItem,
    pub restaurant: Restaurant,
    pub match_score: i32,
    pub reason_tags: Vec<String>,
}

/// Result of ranking a catalog for one profile
#[derive(Debug)]
pub struct RankResult {
    pub items: Vec<RankedItem>,
    pub total_candidates: usize,
    /// Dropped by a dietary restriction
    pub excluded: usize,
    /// Dropped for scoring below the inclusion threshold
    pub below_threshold: usize,
}

impl RankResult {
    /// Turn ranked items into fresh recommendation records for `user_id`
    pub fn into_recommendations(self, user_id: &str) -> Vec<RecommendationWithDetails> {
        self.items
            .into_iter()
            .map(|item| RecommendationWithDetails {
                recommendation: Recommendation {
                    id: uuid::Uuid::new_v4().to_string(),
                    user_id: user_id.to_string(),
                    menu_item_id: item.menu_item.id.clone(),
                    match_score: item.match_score,
                    reason_tags: item.reason_tags,
                },
                menu_item: item.menu_item,
                restaurant: item.restaurant,
            })
            .collect()
    }
}

/// Ranks a restaurant catalog against a user profile
///
/// # Pipeline Stages
/// 1. Score every entry in parallel (dietary restrictions exclude here)
/// 2. Drop entries below the inclusion threshold
/// 3. Stable sort by score, descending
#[derive(Debug, Clone)]
pub struct Recommender {
    rules: ScoringRules,
}

impl Recommender {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Self {
        Self {
            rules: ScoringRules::default(),
        }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Score, filter and rank the catalog for a profile
    ///
    /// Entries with equal scores keep their catalog order, so the output is
    /// fully determined by the inputs.
    pub fn rank(&self, profile: &UserProfile, catalog: Vec<CatalogEntry>) -> RankResult {
        let total_candidates = catalog.len();

        // Indexed parallel collect keeps catalog order
        let outcomes: Vec<(CatalogEntry, ScoreOutcome)> = catalog
            .into_par_iter()
            .map(|entry| {
                let outcome = calculate_match_score(
                    profile,
                    &entry.menu_item,
                    &entry.restaurant,
                    &self.rules,
                );
                (entry, outcome)
            })
            .collect();

        let mut excluded = 0;
        let mut below_threshold = 0;
        let mut items = Vec::with_capacity(outcomes.len());

        for (entry, outcome) in outcomes {
            match outcome {
                ScoreOutcome::Excluded => excluded += 1,
                ScoreOutcome::Scored(score) if !meets_threshold(score.match_score, &self.rules) => {
                    below_threshold += 1
                }
                ScoreOutcome::Scored(score) => items.push(RankedItem {
                    menu_item: entry.menu_item,
                    restaurant: entry.restaurant,
                    match_score: score.match_score,
                    reason_tags: score.reason_tags,
                }),
            }
        }

        // sort_by is stable
        items.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        tracing::debug!(
            "Ranked {} of {} catalog entries for {} ({} excluded, {} below threshold)",
            items.len(),
            total_candidates,
            profile.user_id,
            excluded,
            below_threshold
        );

        RankResult {
            items,
            total_candidates,
            excluded,
            below_threshold,
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_rules()
    }
}
