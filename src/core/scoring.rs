use crate::models::{MenuItem, Restaurant, ScoringRules, UserProfile};
use crate::core::filters::{evaluate_restrictions, RestrictionOutcome};

pub const TAG_BUDGET_FRIENDLY: &str = "Budget Friendly";
pub const TAG_PERFECT_PORTIONS: &str = "Perfect Portions";
pub const TAG_HIGH_PROTEIN: &str = "High Protein";
pub const TAG_LOCAL_BUSINESS: &str = "Local Business";

/// Score and reason tags earned by a menu item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchScore {
    pub match_score: i32,
    pub reason_tags: Vec<String>,
}

/// Outcome of scoring one (profile, item, restaurant) triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreOutcome {
    Scored(MatchScore),
    /// Failed a dietary restriction; never surfaced
    Excluded,
}

/// Points earned by a single factor plus the tag it contributes, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Factor {
    points: i32,
    tag: Option<&'static str>,
}

impl Factor {
    fn points(points: i32) -> Self {
        Self { points, tag: None }
    }

    fn tagged(points: i32, tag: &'static str) -> Self {
        Self { points, tag: Some(tag) }
    }
}

/// Calculate a match score (0-100) for a menu item against a user profile
///
/// Factors, in tag order:
/// - price: +40 within budget, +10 more at <= 80% of budget, -20 over budget
/// - calories: +20 within 20% of the per-meal target, +10 within 40%
/// - protein: +20 at >= 80% of the per-meal target
/// - restrictions: +5 per met restriction, any unmet one excludes the item
/// - local business: +5 for woman/minority/family-owned restaurants
///
/// The raw sum is clamped to [0, 100] only at the end. The inclusion
/// threshold is applied by the caller.
pub fn calculate_match_score(
    profile: &UserProfile,
    item: &MenuItem,
    restaurant: &Restaurant,
    rules: &ScoringRules,
) -> ScoreOutcome {
    let (restriction_points, restriction_tags) =
        match evaluate_restrictions(&profile.dietary_restrictions, item, rules) {
            RestrictionOutcome::Satisfied { points, tags } => (points, tags),
            RestrictionOutcome::Violated(_) => return ScoreOutcome::Excluded,
        };

    let mut raw_score = 0;
    let mut reason_tags = Vec::new();

    let mut apply = |factor: Factor| {
        raw_score += factor.points;
        if let Some(tag) = factor.tag {
            reason_tags.push(tag.to_string());
        }
    };

    apply(price_factor(item.price, profile.max_meal_price, rules));
    apply(calorie_factor(item.calories, profile.daily_calories, rules));
    apply(protein_factor(item.protein, profile.protein_target, rules));

    raw_score += restriction_points;
    reason_tags.extend(restriction_tags.into_iter().map(String::from));

    let local = local_business_factor(restaurant, rules);
    raw_score += local.points;
    reason_tags.extend(local.tag.map(String::from));

    ScoreOutcome::Scored(MatchScore {
        match_score: raw_score.clamp(0, 100),
        reason_tags,
    })
}

#[inline]
fn price_factor(price: f64, max_meal_price: f64, rules: &ScoringRules) -> Factor {
    if price > max_meal_price {
        return Factor::points(-rules.over_budget_penalty);
    }

    if price <= max_meal_price * rules.budget_friendly_ratio {
        Factor::tagged(
            rules.within_budget_points + rules.budget_friendly_points,
            TAG_BUDGET_FRIENDLY,
        )
    } else {
        Factor::points(rules.within_budget_points)
    }
}

/// A zero calorie goal has no per-meal target, so the factor awards nothing
#[inline]
fn calorie_factor(calories: i32, daily_calories: i32, rules: &ScoringRules) -> Factor {
    if daily_calories <= 0 || rules.meals_per_day <= 0.0 {
        return Factor::default();
    }

    let target = daily_calories as f64 / rules.meals_per_day;
    let diff = (calories as f64 - target).abs() / target;

    if diff < rules.perfect_portion_tolerance {
        Factor::tagged(rules.perfect_portion_points, TAG_PERFECT_PORTIONS)
    } else if diff < rules.close_portion_tolerance {
        Factor::points(rules.close_portion_points)
    } else {
        Factor::default()
    }
}

/// Same zero-target convention as calories
#[inline]
fn protein_factor(protein: f64, protein_target: i32, rules: &ScoringRules) -> Factor {
    if protein_target <= 0 || rules.meals_per_day <= 0.0 {
        return Factor::default();
    }

    let target = protein_target as f64 / rules.meals_per_day;
    if protein < target * rules.protein_min_ratio {
        return Factor::default();
    }

    if protein >= target * rules.high_protein_ratio {
        Factor::tagged(rules.protein_points, TAG_HIGH_PROTEIN)
    } else {
        Factor::points(rules.protein_points)
    }
}

#[inline]
fn local_business_factor(restaurant: &Restaurant, rules: &ScoringRules) -> Factor {
    if restaurant.is_local_business() {
        Factor::tagged(rules.local_business_points, TAG_LOCAL_BUSINESS)
    } else {
        Factor::default()
    }
}
