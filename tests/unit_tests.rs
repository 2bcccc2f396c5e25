// Unit tests for Meal Match scoring

use meal_match::core::{
    calculate_match_score, distance_miles, evaluate_restrictions, DietaryRestriction,
    RestrictionOutcome, ScoreOutcome,
};
use meal_match::models::{CatalogEntry, MenuItem, Restaurant, ScoringRules, UserProfile};
use meal_match::Recommender;

fn create_test_profile(
    daily_calories: i32,
    protein_target: i32,
    max_meal_price: f64,
    restrictions: &[&str],
) -> UserProfile {
    UserProfile {
        id: "profile-1".to_string(),
        user_id: "user-1".to_string(),
        daily_calories,
        protein_target,
        carb_limit: None,
        fat_target: None,
        max_meal_price,
        monthly_budget: None,
        dietary_restrictions: restrictions.iter().map(|s| s.to_string()).collect(),
    }
}

fn create_test_restaurant(id: &str, family_owned: bool) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        name: format!("Restaurant {}", id),
        description: "Test kitchen".to_string(),
        address: "1 Test St".to_string(),
        phone: None,
        latitude: None,
        longitude: None,
        rating: 4.5,
        review_count: 10,
        price_level: 2,
        cuisine_type: "Test".to_string(),
        is_woman_owned: false,
        is_minority_owned: false,
        is_family_owned: family_owned,
        local_farm_count: 0,
        employee_count: 5,
        meals_donated_this_year: 0,
    }
}

fn create_test_item(id: &str, restaurant_id: &str, price: f64, calories: i32, protein: f64) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        restaurant_id: restaurant_id.to_string(),
        name: format!("Item {}", id),
        description: "Test dish".to_string(),
        price,
        calories,
        protein,
        carbs: 40.0,
        fat: 15.0,
        is_vegan: false,
        is_vegetarian: false,
        is_gluten_free: false,
        is_keto: false,
        is_dairy_free: false,
        is_nut_free: false,
        is_halal: false,
        is_kosher: false,
        image_url: None,
    }
}

fn scored(outcome: ScoreOutcome) -> (i32, Vec<String>) {
    match outcome {
        ScoreOutcome::Scored(score) => (score.match_score, score.reason_tags),
        ScoreOutcome::Excluded => panic!("expected a scored outcome"),
    }
}

#[test]
fn test_vegan_budget_item_at_family_restaurant() {
    let profile = create_test_profile(2000, 120, 15.0, &["Vegan"]);
    let mut item = create_test_item("m1", "r1", 11.50, 485, 32.0);
    item.is_vegan = true;
    let restaurant = create_test_restaurant("r1", true);

    let (score, tags) = scored(calculate_match_score(&profile, &item, &restaurant, &ScoringRules::default()));

    assert_eq!(score, 90);
    assert_eq!(tags, vec!["Budget Friendly", "Vegan", "Local Business"]);
}

#[test]
fn test_over_budget_item_failing_restriction_is_excluded() {
    let profile = create_test_profile(2000, 120, 10.0, &["vegetarian"]);
    let item = create_test_item("m1", "r1", 25.0, 700, 40.0);
    let restaurant = create_test_restaurant("r1", true);

    let outcome = calculate_match_score(&profile, &item, &restaurant, &ScoringRules::default());
    assert_eq!(outcome, ScoreOutcome::Excluded);

    let result = Recommender::default().rank(
        &profile,
        vec![CatalogEntry { menu_item: item, restaurant }],
    );
    assert!(result.items.is_empty());
    assert_eq!(result.excluded, 1);
}

#[test]
fn test_perfect_match_without_badges() {
    let profile = create_test_profile(1800, 90, 20.0, &[]);
    let item = create_test_item("m1", "r1", 10.0, 600, 30.0);
    let restaurant = create_test_restaurant("r1", false);

    let (score, tags) = scored(calculate_match_score(&profile, &item, &restaurant, &ScoringRules::default()));

    assert!((80..=90).contains(&score), "score was {}", score);
    assert!(tags.contains(&"Perfect Portions".to_string()));
    assert!(!tags.contains(&"Local Business".to_string()));
}

#[test]
fn test_unknown_restriction_is_ignored() {
    let item = create_test_item("m1", "r1", 10.0, 600, 30.0);
    let restaurant = create_test_restaurant("r1", false);
    let rules = ScoringRules::default();

    let with_paleo = calculate_match_score(
        &create_test_profile(1800, 90, 20.0, &["Paleo"]),
        &item,
        &restaurant,
        &rules,
    );
    let without = calculate_match_score(&create_test_profile(1800, 90, 20.0, &[]), &item, &restaurant, &rules);

    assert_eq!(with_paleo, without);
}

#[test]
fn test_restriction_labels_case_insensitive() {
    assert_eq!(DietaryRestriction::parse("GLUTEN-FREE"), Some(DietaryRestriction::GlutenFree));
    assert_eq!(DietaryRestriction::parse("Dairy-Free"), Some(DietaryRestriction::DairyFree));
    assert_eq!(DietaryRestriction::parse("paleo"), None);
}

#[test]
fn test_restrictions_award_tags_in_profile_order() {
    let mut item = create_test_item("m1", "r1", 10.0, 600, 30.0);
    item.is_halal = true;
    item.is_gluten_free = true;

    let labels = vec!["halal".to_string(), "gluten-free".to_string()];
    match evaluate_restrictions(&labels, &item, &ScoringRules::default()) {
        RestrictionOutcome::Satisfied { points, tags } => {
            assert_eq!(points, 10);
            assert_eq!(tags, vec!["Halal", "Gluten-Free"]);
        }
        RestrictionOutcome::Violated(r) => panic!("unexpected violation of {}", r),
    }
}

#[test]
fn test_zero_targets_do_not_panic() {
    let profile = create_test_profile(0, 0, 15.0, &[]);
    let item = create_test_item("m1", "r1", 14.0, 500, 30.0);
    let restaurant = create_test_restaurant("r1", false);

    let (score, tags) = scored(calculate_match_score(&profile, &item, &restaurant, &ScoringRules::default()));

    assert_eq!(score, 40);
    assert!(tags.is_empty());
}

#[test]
fn test_score_always_in_range() {
    let rules = ScoringRules::default();
    let restaurant = create_test_restaurant("r1", true);

    for price in [0.0, 5.0, 15.0, 50.0, 500.0] {
        for calories in [0, 200, 666, 2000] {
            for protein in [0.0, 20.0, 60.0] {
                let item = create_test_item("m", "r1", price, calories, protein);
                let profile = create_test_profile(2000, 120, 15.0, &[]);
                let (score, _) = scored(calculate_match_score(&profile, &item, &restaurant, &rules));
                assert!((0..=100).contains(&score), "score {} out of range", score);
            }
        }
    }
}

#[test]
fn test_ranking_is_monotonic_and_thresholded() {
    let profile = create_test_profile(1800, 90, 15.0, &[]);
    let restaurant = create_test_restaurant("r1", false);
    let catalog: Vec<CatalogEntry> = [
        ("cheap", 9.0, 600, 30.0),
        ("pricey", 30.0, 100, 5.0),
        ("ok", 14.0, 800, 25.0),
        ("great", 10.0, 590, 40.0),
    ]
    .into_iter()
    .map(|(id, price, calories, protein)| CatalogEntry {
        menu_item: create_test_item(id, "r1", price, calories, protein),
        restaurant: restaurant.clone(),
    })
    .collect();

    let result = Recommender::default().rank(&profile, catalog);

    assert_eq!(result.total_candidates, 4);
    assert_eq!(result.below_threshold, 1);
    assert!(result.items.iter().all(|i| i.match_score >= 30));
    assert!(result.items.windows(2).all(|w| w[0].match_score >= w[1].match_score));
    assert!(result.items.iter().all(|i| i.menu_item.id != "pricey"));
}

#[test]
fn test_equal_scores_keep_catalog_order() {
    let profile = create_test_profile(1800, 90, 20.0, &[]);
    let restaurant = create_test_restaurant("r1", false);
    let catalog: Vec<CatalogEntry> = ["a", "b", "c", "d"]
        .into_iter()
        .map(|id| CatalogEntry {
            menu_item: create_test_item(id, "r1", 10.0, 600, 30.0),
            restaurant: restaurant.clone(),
        })
        .collect();

    let recommender = Recommender::default();
    let first: Vec<_> = recommender.rank(&profile, catalog.clone()).items.into_iter().map(|i| i.menu_item.id).collect();
    let second: Vec<_> = recommender.rank(&profile, catalog).items.into_iter().map(|i| i.menu_item.id).collect();

    assert_eq!(first, vec!["a", "b", "c", "d"]);
    assert_eq!(first, second);
}

#[test]
fn test_distance_miles_manhattan_to_brooklyn() {
    // Roughly 6 miles
    let distance = distance_miles(40.7580, -73.9855, 40.6782, -73.9442);
    assert!(distance > 4.0 && distance < 8.0);
}
