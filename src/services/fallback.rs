//! Canned meal ideas and venues served when the LLM is unavailable.

use crate::core::{distance_miles, round_miles};
use crate::models::{MealIdea, MealPreferences, VenueSuggestion, VenueType};

fn idea(name: &str, description: &str, nutrition_info: &str, ingredients: &[&str], benefits: &[&str]) -> MealIdea {
    MealIdea {
        name: name.to_string(),
        description: description.to_string(),
        nutrition_info: nutrition_info.to_string(),
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        benefits: benefits.iter().map(|s| s.to_string()).collect(),
    }
}

fn base_meal_ideas() -> Vec<MealIdea> {
    vec![
        idea(
            "Mediterranean Quinoa Bowl",
            "A nutrient-rich bowl with quinoa, fresh vegetables, and healthy fats",
            "450 calories, 15g protein, 8g fiber, rich in omega-3s",
            &["quinoa", "chickpeas", "cucumber", "tomatoes", "olive oil", "feta cheese"],
            &["heart healthy", "high protein", "anti-inflammatory", "supports weight management"],
        ),
        idea(
            "Grilled Salmon Salad",
            "Fresh greens with grilled salmon and avocado",
            "380 calories, 28g protein, rich in omega-3 fatty acids",
            &["wild salmon", "mixed greens", "avocado", "cherry tomatoes", "lemon dressing"],
            &["brain health", "heart healthy", "high quality protein", "nutrient dense"],
        ),
        idea(
            "Vegetable Stir-Fry with Tofu",
            "Colorful vegetables stir-fried with protein-rich tofu",
            "320 calories, 18g protein, high in vitamins and minerals",
            &["firm tofu", "broccoli", "bell peppers", "snap peas", "ginger", "brown rice"],
            &["plant-based protein", "high fiber", "antioxidant rich", "supports digestion"],
        ),
    ]
}

/// Fallback meal ideas, adjusted for the `weight-loss` and `muscle-gain` goals
pub fn fallback_meal_ideas(preferences: &MealPreferences) -> Vec<MealIdea> {
    let adjustment = match preferences.dietary_goals.as_str() {
        "weight-loss" => Some((" - optimized for weight management", "supports weight loss")),
        "muscle-gain" => Some((" - enhanced with extra protein", "supports muscle building")),
        _ => None,
    };

    let mut ideas = base_meal_ideas();
    if let Some((suffix, benefit)) = adjustment {
        for idea in &mut ideas {
            idea.description.push_str(suffix);
            idea.benefits.push(benefit.to_string());
        }
    }
    ideas
}

#[allow(clippy::too_many_arguments)]
fn venue(
    id: &str,
    name: &str,
    venue_type: VenueType,
    cuisine: &str,
    rating: f64,
    origin: (f64, f64),
    offset: (f64, f64),
    description: &str,
    healthy_options: &[&str],
    price_range: &str,
) -> VenueSuggestion {
    let (lat, lng) = (origin.0 + offset.0, origin.1 + offset.1);
    VenueSuggestion {
        id: id.to_string(),
        name: name.to_string(),
        venue_type,
        cuisine: cuisine.to_string(),
        rating,
        lat,
        lng,
        distance: round_miles(distance_miles(origin.0, origin.1, lat, lng)),
        description: description.to_string(),
        healthy_options: healthy_options.iter().map(|s| s.to_string()).collect(),
        price_range: price_range.to_string(),
    }
}

/// Four fixed venues placed a few hundred feet around `(lat, lng)`
pub fn fallback_venues(lat: f64, lng: f64) -> Vec<VenueSuggestion> {
    let origin = (lat, lng);
    vec![
        venue(
            "1",
            "Green Bowl Co.",
            VenueType::Restaurant,
            "Healthy Bowls",
            4.8,
            origin,
            (0.001, 0.001),
            "Fresh, customizable bowls with organic ingredients and superfoods",
            &["Quinoa Power Bowl", "Kale Caesar Salad", "Protein Smoothie Bowls"],
            "Moderate",
        ),
        venue(
            "2",
            "Sunshine Food Truck",
            VenueType::FoodTruck,
            "Organic Wraps",
            4.6,
            origin,
            (-0.002, 0.002),
            "Mobile organic wrap truck with locally-sourced ingredients",
            &["Avocado Veggie Wrap", "Grilled Chicken & Hummus", "Fresh Fruit Bowls"],
            "Budget",
        ),
        venue(
            "3",
            "Fresh Start Cafe",
            VenueType::Restaurant,
            "Plant-Based",
            4.7,
            origin,
            (0.003, -0.001),
            "All-plant cafe specializing in nutrient-dense meals and cold-pressed juices",
            &["Buddha Bowl", "Raw Zucchini Noodles", "Green Goddess Smoothie"],
            "Moderate",
        ),
        venue(
            "4",
            "Protein Power Truck",
            VenueType::FoodTruck,
            "High Protein",
            4.5,
            origin,
            (-0.001, -0.003),
            "Fitness-focused food truck with lean proteins and performance nutrition",
            &["Grilled Salmon Plate", "Turkey & Sweet Potato", "Protein Power Bowls"],
            "Moderate",
        ),
    ]
}
