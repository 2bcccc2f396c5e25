use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;
use crate::models::{
    CatalogEntry, CreateProfileRequest, MenuItem, MenuItemWithRestaurant, Recommendation,
    RecommendationWithDetails, Restaurant, RestaurantWithMenuItems, UpdateProfileRequest,
    UserProfile,
};
use crate::services::store::{apply_profile_update, profile_from_request, MealStore, StoreError};

const PROFILE_COLUMNS: &str = r#"
    id, user_id, daily_calories, protein_target, carb_limit, fat_target,
    max_meal_price, monthly_budget, dietary_restrictions
"#;

const RESTAURANT_COLUMNS: &str = r#"
    r.id AS r_id, r.name AS r_name, r.description AS r_description, r.address, r.phone,
    r.latitude, r.longitude, r.rating, r.review_count, r.price_level, r.cuisine_type,
    r.is_woman_owned, r.is_minority_owned, r.is_family_owned, r.local_farm_count,
    r.employee_count, r.meals_donated_this_year
"#;

const MENU_ITEM_COLUMNS: &str = r#"
    m.id AS m_id, m.restaurant_id, m.name AS m_name, m.description AS m_description, m.price,
    m.calories, m.protein, m.carbs, m.fat, m.is_vegan, m.is_vegetarian, m.is_gluten_free,
    m.is_keto, m.is_dairy_free, m.is_nut_free, m.is_halal, m.is_kosher, m.image_url
"#;

/// PostgreSQL-backed meal store
///
/// Holds user profiles, the restaurant catalog and each user's current
/// recommendation set. Migrations run on connect.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO user_profiles (
                id, user_id, daily_calories, protein_target, carb_limit, fat_target,
                max_meal_price, monthly_budget, dietary_restrictions
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id)
            DO UPDATE SET
                daily_calories = EXCLUDED.daily_calories,
                protein_target = EXCLUDED.protein_target,
                carb_limit = EXCLUDED.carb_limit,
                fat_target = EXCLUDED.fat_target,
                max_meal_price = EXCLUDED.max_meal_price,
                monthly_budget = EXCLUDED.monthly_budget,
                dietary_restrictions = EXCLUDED.dietary_restrictions
        "#;

        sqlx::query(query)
            .bind(&profile.id)
            .bind(&profile.user_id)
            .bind(profile.daily_calories)
            .bind(profile.protein_target)
            .bind(profile.carb_limit)
            .bind(profile.fat_target)
            .bind(profile.max_meal_price)
            .bind(profile.monthly_budget)
            .bind(Json(&profile.dietary_restrictions))
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn profile_from_row(row: &PgRow) -> Result<UserProfile, sqlx::Error> {
    let restrictions: Option<Json<Vec<String>>> = row.try_get("dietary_restrictions")?;
    Ok(UserProfile {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        daily_calories: row.try_get("daily_calories")?,
        protein_target: row.try_get("protein_target")?,
        carb_limit: row.try_get("carb_limit")?,
        fat_target: row.try_get("fat_target")?,
        max_meal_price: row.try_get("max_meal_price")?,
        monthly_budget: row.try_get("monthly_budget")?,
        dietary_restrictions: restrictions.map(|json| json.0).unwrap_or_default(),
    })
}

fn restaurant_from_row(row: &PgRow) -> Result<Restaurant, sqlx::Error> {
    Ok(Restaurant {
        id: row.try_get("r_id")?,
        name: row.try_get("r_name")?,
        description: row.try_get("r_description")?,
        address: row.try_get("address")?,
        phone: row.try_get("phone")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        rating: row.try_get("rating")?,
        review_count: row.try_get("review_count")?,
        price_level: row.try_get("price_level")?,
        cuisine_type: row.try_get("cuisine_type")?,
        is_woman_owned: row.try_get("is_woman_owned")?,
        is_minority_owned: row.try_get("is_minority_owned")?,
        is_family_owned: row.try_get("is_family_owned")?,
        local_farm_count: row.try_get("local_farm_count")?,
        employee_count: row.try_get("employee_count")?,
        meals_donated_this_year: row.try_get("meals_donated_this_year")?,
    })
}

fn menu_item_from_row(row: &PgRow) -> Result<MenuItem, sqlx::Error> {
    Ok(MenuItem {
        id: row.try_get("m_id")?,
        restaurant_id: row.try_get("restaurant_id")?,
        name: row.try_get("m_name")?,
        description: row.try_get("m_description")?,
        price: row.try_get("price")?,
        calories: row.try_get("calories")?,
        protein: row.try_get("protein")?,
        carbs: row.try_get("carbs")?,
        fat: row.try_get("fat")?,
        is_vegan: row.try_get("is_vegan")?,
        is_vegetarian: row.try_get("is_vegetarian")?,
        is_gluten_free: row.try_get("is_gluten_free")?,
        is_keto: row.try_get("is_keto")?,
        is_dairy_free: row.try_get("is_dairy_free")?,
        is_nut_free: row.try_get("is_nut_free")?,
        is_halal: row.try_get("is_halal")?,
        is_kosher: row.try_get("is_kosher")?,
        image_url: row.try_get("image_url")?,
    })
}

#[async_trait]
impl MealStore for PostgresClient {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let query = format!("SELECT {} FROM user_profiles WHERE user_id = $1", PROFILE_COLUMNS);

        let row = sqlx::query(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(profile_from_row).transpose()?)
    }

    async fn create_profile(&self, request: CreateProfileRequest) -> Result<UserProfile, StoreError> {
        let mut profile = profile_from_request(request);
        self.upsert_profile(&profile).await?;

        // On conflict the original row id is kept
        if let Some(stored) = self.get_profile(&profile.user_id).await? {
            profile = stored;
        }

        tracing::debug!("Stored profile for {}", profile.user_id);
        Ok(profile)
    }

    /// Read-merge-write under a row lock, so concurrent partial updates of
    /// different fields all land
    async fn update_profile(
        &self,
        user_id: &str,
        updates: UpdateProfileRequest,
    ) -> Result<Option<UserProfile>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let select = format!(
            "SELECT {} FROM user_profiles WHERE user_id = $1 FOR UPDATE",
            PROFILE_COLUMNS
        );
        let Some(row) = sqlx::query(&select)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let mut profile = profile_from_row(&row)?;
        apply_profile_update(&mut profile, updates);

        let update = r#"
            UPDATE user_profiles SET
                daily_calories = $2,
                protein_target = $3,
                carb_limit = $4,
                fat_target = $5,
                max_meal_price = $6,
                monthly_budget = $7,
                dietary_restrictions = $8
            WHERE user_id = $1
        "#;

        sqlx::query(update)
            .bind(user_id)
            .bind(profile.daily_calories)
            .bind(profile.protein_target)
            .bind(profile.carb_limit)
            .bind(profile.fat_target)
            .bind(profile.max_meal_price)
            .bind(profile.monthly_budget)
            .bind(Json(&profile.dietary_restrictions))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(profile))
    }

    async fn get_restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        let query = format!("SELECT {} FROM restaurants r ORDER BY r.position", RESTAURANT_COLUMNS);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(restaurant_from_row).collect::<Result<_, _>>()?)
    }

    async fn get_restaurant_with_menu_items(
        &self,
        id: &str,
    ) -> Result<Option<RestaurantWithMenuItems>, StoreError> {
        let query = format!("SELECT {} FROM restaurants r WHERE r.id = $1", RESTAURANT_COLUMNS);

        let Some(row) = sqlx::query(&query).bind(id).fetch_optional(&self.pool).await? else {
            return Ok(None);
        };

        let restaurant = restaurant_from_row(&row)?;
        let menu_items = self.get_menu_items(Some(id)).await?;

        Ok(Some(RestaurantWithMenuItems {
            restaurant,
            menu_items,
        }))
    }

    async fn create_restaurant(&self, restaurant: Restaurant) -> Result<Restaurant, StoreError> {
        let query = r#"
            INSERT INTO restaurants (
                id, name, description, address, phone, latitude, longitude, rating,
                review_count, price_level, cuisine_type, is_woman_owned, is_minority_owned,
                is_family_owned, local_farm_count, employee_count, meals_donated_this_year
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        "#;

        sqlx::query(query)
            .bind(&restaurant.id)
            .bind(&restaurant.name)
            .bind(&restaurant.description)
            .bind(&restaurant.address)
            .bind(&restaurant.phone)
            .bind(restaurant.latitude)
            .bind(restaurant.longitude)
            .bind(restaurant.rating)
            .bind(restaurant.review_count)
            .bind(restaurant.price_level)
            .bind(&restaurant.cuisine_type)
            .bind(restaurant.is_woman_owned)
            .bind(restaurant.is_minority_owned)
            .bind(restaurant.is_family_owned)
            .bind(restaurant.local_farm_count)
            .bind(restaurant.employee_count)
            .bind(restaurant.meals_donated_this_year)
            .execute(&self.pool)
            .await?;

        Ok(restaurant)
    }

    async fn get_menu_items(&self, restaurant_id: Option<&str>) -> Result<Vec<MenuItem>, StoreError> {
        let query = format!(
            "SELECT {} FROM menu_items m WHERE ($1::TEXT IS NULL OR m.restaurant_id = $1) ORDER BY m.position",
            MENU_ITEM_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(restaurant_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(menu_item_from_row).collect::<Result<_, _>>()?)
    }

    async fn get_menu_item_with_restaurant(
        &self,
        id: &str,
    ) -> Result<Option<MenuItemWithRestaurant>, StoreError> {
        let query = format!(
            "SELECT {}, {} FROM menu_items m INNER JOIN restaurants r ON m.restaurant_id = r.id WHERE m.id = $1",
            MENU_ITEM_COLUMNS, RESTAURANT_COLUMNS
        );

        let row = sqlx::query(&query).bind(id).fetch_optional(&self.pool).await?;

        Ok(row
            .map(|row| -> Result<_, sqlx::Error> {
                Ok(MenuItemWithRestaurant {
                    menu_item: menu_item_from_row(&row)?,
                    restaurant: restaurant_from_row(&row)?,
                })
            })
            .transpose()?)
    }

    async fn create_menu_item(&self, item: MenuItem) -> Result<MenuItem, StoreError> {
        let query = r#"
            INSERT INTO menu_items (
                id, restaurant_id, name, description, price, calories, protein, carbs, fat,
                is_vegan, is_vegetarian, is_gluten_free, is_keto, is_dairy_free, is_nut_free,
                is_halal, is_kosher, image_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
        "#;

        sqlx::query(query)
            .bind(&item.id)
            .bind(&item.restaurant_id)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.price)
            .bind(item.calories)
            .bind(item.protein)
            .bind(item.carbs)
            .bind(item.fat)
            .bind(item.is_vegan)
            .bind(item.is_vegetarian)
            .bind(item.is_gluten_free)
            .bind(item.is_keto)
            .bind(item.is_dairy_free)
            .bind(item.is_nut_free)
            .bind(item.is_halal)
            .bind(item.is_kosher)
            .bind(&item.image_url)
            .execute(&self.pool)
            .await?;

        Ok(item)
    }

    async fn get_catalog(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        let query = format!(
            "SELECT {}, {} FROM menu_items m INNER JOIN restaurants r ON m.restaurant_id = r.id ORDER BY m.position",
            MENU_ITEM_COLUMNS, RESTAURANT_COLUMNS
        );

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        let catalog = rows
            .iter()
            .map(|row| -> Result<_, sqlx::Error> {
                Ok(CatalogEntry {
                    menu_item: menu_item_from_row(row)?,
                    restaurant: restaurant_from_row(row)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Loaded catalog with {} entries", catalog.len());
        Ok(catalog)
    }

    /// Delete-then-insert inside one transaction
    async fn replace_recommendations(
        &self,
        user_id: &str,
        recommendations: &[Recommendation],
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM user_recommendations WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let insert = r#"
            INSERT INTO user_recommendations (id, user_id, menu_item_id, match_score, reason_tags, position)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#;

        for (position, rec) in recommendations.iter().enumerate() {
            sqlx::query(insert)
                .bind(&rec.id)
                .bind(&rec.user_id)
                .bind(&rec.menu_item_id)
                .bind(rec.match_score)
                .bind(Json(&rec.reason_tags))
                .bind(position as i32)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::debug!(
            "Replaced {} recommendations with {} for user {}",
            deleted,
            recommendations.len(),
            user_id
        );

        Ok(())
    }

    async fn get_recommendations(
        &self,
        user_id: &str,
    ) -> Result<Vec<RecommendationWithDetails>, StoreError> {
        let query = format!(
            r#"
            SELECT ur.id AS ur_id, ur.user_id, ur.menu_item_id, ur.match_score, ur.reason_tags, {}, {}
            FROM user_recommendations ur
            INNER JOIN menu_items m ON ur.menu_item_id = m.id
            INNER JOIN restaurants r ON m.restaurant_id = r.id
            WHERE ur.user_id = $1
            ORDER BY ur.match_score DESC, ur.position ASC
            "#,
            MENU_ITEM_COLUMNS, RESTAURANT_COLUMNS
        );

        let rows = sqlx::query(&query).bind(user_id).fetch_all(&self.pool).await?;

        let results = rows
            .iter()
            .map(|row| -> Result<_, sqlx::Error> {
                let tags: Option<Json<Vec<String>>> = row.try_get("reason_tags")?;
                Ok(RecommendationWithDetails {
                    recommendation: Recommendation {
                        id: row.try_get("ur_id")?,
                        user_id: row.try_get("user_id")?,
                        menu_item_id: row.try_get("menu_item_id")?,
                        match_score: row.try_get("match_score")?,
                        reason_tags: tags.map(|json| json.0).unwrap_or_default(),
                    },
                    menu_item: menu_item_from_row(row)?,
                    restaurant: restaurant_from_row(row)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(results)
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
