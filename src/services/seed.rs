//! Demo catalog: three local restaurants and six menu items.
//!
//! Loaded by the in-memory store and, when `database.seed_demo_data` is set,
//! written into an empty PostgreSQL catalog on startup.

use crate::models::{MenuItem, Restaurant};
use crate::services::store::{MealStore, StoreError};

pub fn demo_restaurants() -> Vec<Restaurant> {
    vec![
        Restaurant {
            id: "rest-1".to_string(),
            name: "Green Garden Bistro".to_string(),
            description: "Family-owned Mediterranean restaurant focusing on fresh, locally-sourced ingredients with extensive vegan and vegetarian options.".to_string(),
            address: "123 Health St, Wellness City, WC 12345".to_string(),
            phone: Some("(555) 123-4567".to_string()),
            latitude: Some(40.7128),
            longitude: Some(-74.0060),
            rating: 4.8,
            review_count: 124,
            price_level: 2,
            cuisine_type: "Mediterranean".to_string(),
            is_woman_owned: true,
            is_minority_owned: false,
            is_family_owned: true,
            local_farm_count: 5,
            employee_count: 12,
            meals_donated_this_year: 500,
        },
        Restaurant {
            id: "rest-2".to_string(),
            name: "Coastal Kitchen".to_string(),
            description: "Fresh seafood and sustainable dishes from local fishermen, specializing in healthy preparations.".to_string(),
            address: "456 Ocean Ave, Coastal City, CC 67890".to_string(),
            phone: Some("(555) 987-6543".to_string()),
            latitude: Some(40.7589),
            longitude: Some(-73.9851),
            rating: 4.9,
            review_count: 89,
            price_level: 3,
            cuisine_type: "Seafood".to_string(),
            is_woman_owned: false,
            is_minority_owned: false,
            is_family_owned: true,
            local_farm_count: 3,
            employee_count: 15,
            meals_donated_this_year: 200,
        },
        Restaurant {
            id: "rest-3".to_string(),
            name: "Mindful Eats".to_string(),
            description: "Plant-based restaurant committed to organic, locally-sourced ingredients and zero-waste practices.".to_string(),
            address: "789 Zen Blvd, Mindful City, MC 54321".to_string(),
            phone: Some("(555) 456-7890".to_string()),
            latitude: Some(40.7282),
            longitude: Some(-73.9942),
            rating: 4.7,
            review_count: 156,
            price_level: 1,
            cuisine_type: "Plant-Based".to_string(),
            is_woman_owned: false,
            is_minority_owned: true,
            is_family_owned: false,
            local_farm_count: 8,
            employee_count: 10,
            meals_donated_this_year: 750,
        },
    ]
}

/// Dietary flags in table order: vegan, vegetarian, gluten-free, keto,
/// dairy-free, nut-free, halal, kosher
type Flags = [bool; 8];

#[allow(clippy::too_many_arguments)]
fn menu_item(
    id: &str,
    restaurant_id: &str,
    name: &str,
    description: &str,
    price: f64,
    calories: i32,
    macros: (f64, f64, f64),
    flags: Flags,
) -> MenuItem {
    let (protein, carbs, fat) = macros;
    let [is_vegan, is_vegetarian, is_gluten_free, is_keto, is_dairy_free, is_nut_free, is_halal, is_kosher] = flags;
    MenuItem {
        id: id.to_string(),
        restaurant_id: restaurant_id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        calories,
        protein,
        carbs,
        fat,
        is_vegan,
        is_vegetarian,
        is_gluten_free,
        is_keto,
        is_dairy_free,
        is_nut_free,
        is_halal,
        is_kosher,
        image_url: None,
    }
}

pub fn demo_menu_items() -> Vec<MenuItem> {
    vec![
        menu_item(
            "item-1",
            "rest-1",
            "Mediterranean Quinoa Bowl",
            "Organic quinoa, roasted vegetables, chickpeas, tahini dressing, fresh herbs",
            11.50,
            485,
            (32.0, 58.0, 18.0),
            [true, true, true, false, true, false, true, true],
        ),
        menu_item(
            "item-2",
            "rest-2",
            "Grilled Salmon Power Salad",
            "Wild-caught salmon, mixed greens, avocado, cherry tomatoes, olive oil dressing",
            14.75,
            420,
            (38.0, 12.0, 24.0),
            [false, false, true, true, true, true, false, false],
        ),
        menu_item(
            "item-3",
            "rest-3",
            "Rainbow Buddha Bowl",
            "Colorful mix of roasted vegetables, hemp seeds, tahini dressing, microgreens",
            9.95,
            395,
            (24.0, 45.0, 16.0),
            [true, true, true, false, true, false, true, true],
        ),
        menu_item(
            "item-4",
            "rest-1",
            "Greek Chicken Wrap",
            "Grilled chicken, tzatziki, cucumber, tomato, red onion in whole wheat wrap",
            12.25,
            520,
            (35.0, 42.0, 20.0),
            [false, false, false, false, false, true, false, false],
        ),
        menu_item(
            "item-5",
            "rest-2",
            "Seared Tuna Poke Bowl",
            "Seared ahi tuna, brown rice, edamame, cucumber, seaweed salad",
            16.50,
            445,
            (42.0, 35.0, 15.0),
            [false, false, true, false, true, true, false, false],
        ),
        menu_item(
            "item-6",
            "rest-3",
            "Lentil Power Curry",
            "Red lentils, coconut milk, spinach, spices, served with quinoa",
            10.75,
            380,
            (28.0, 52.0, 12.0),
            [true, true, true, false, true, true, true, true],
        ),
    ]
}

/// Write the demo catalog into `store` when it has no restaurants yet
///
/// Returns the number of menu items written.
pub async fn seed_demo_catalog(store: &dyn MealStore) -> Result<usize, StoreError> {
    if !store.get_restaurants().await?.is_empty() {
        tracing::debug!("Catalog already populated, skipping demo seed");
        return Ok(0);
    }

    for restaurant in demo_restaurants() {
        store.create_restaurant(restaurant).await?;
    }

    let items = demo_menu_items();
    let count = items.len();
    for item in items {
        store.create_menu_item(item).await?;
    }

    tracing::info!("Seeded demo catalog with {} menu items", count);
    Ok(count)
}
