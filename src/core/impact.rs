//! Community impact of a user's current recommendation set.
//!
//! Each restaurant is counted once no matter how many of its items were
//! recommended.

use std::collections::HashSet;
use crate::core::scoring::{TAG_HIGH_PROTEIN, TAG_PERFECT_PORTIONS};
use crate::models::{Achievement, ImpactSummary, RecommendationWithDetails};

pub const COMMUNITY_CHAMPION_BUSINESSES: usize = 5;
pub const FARM_FRIEND_FARMS: i32 = 10;

/// Summarize the restaurants behind `recommendations`
pub fn summarize_impact(recommendations: &[RecommendationWithDetails]) -> ImpactSummary {
    let mut seen = HashSet::new();
    let mut businesses_supported = 0;
    let mut local_farm_partners = 0;
    let mut meals_donated = 0;

    for entry in recommendations {
        let restaurant = &entry.restaurant;
        if !seen.insert(restaurant.id.as_str()) {
            continue;
        }
        if restaurant.is_local_business() {
            businesses_supported += 1;
        }
        local_farm_partners += restaurant.local_farm_count;
        meals_donated += restaurant.meals_donated_this_year;
    }

    let meets_nutrition_goals = recommendations.iter().any(|entry| {
        entry
            .recommendation
            .reason_tags
            .iter()
            .any(|tag| tag == TAG_PERFECT_PORTIONS || tag == TAG_HIGH_PROTEIN)
    });

    let achievements = vec![
        achievement(
            "community-champion",
            "Community Champion",
            "Matched with 5+ local businesses",
            "medal",
            businesses_supported >= COMMUNITY_CHAMPION_BUSINESSES,
        ),
        achievement(
            "farm-friend",
            "Farm Friend",
            "Your restaurants work with 10+ local farms",
            "sprout",
            local_farm_partners >= FARM_FRIEND_FARMS,
        ),
        achievement(
            "health-hero",
            "Health Hero",
            "Found meals that fit your nutrition goals",
            "heart",
            meets_nutrition_goals,
        ),
    ];

    ImpactSummary {
        businesses_supported,
        local_farm_partners,
        meals_donated,
        achievements,
    }
}

fn achievement(id: &str, name: &str, description: &str, icon: &str, earned: bool) -> Achievement {
    Achievement {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        earned,
    }
}
