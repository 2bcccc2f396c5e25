use actix_web::{web, HttpResponse, Responder};
use crate::models::MenuItemQuery;
use crate::routes::{internal_error, not_found, AppState};

/// Configure read-only catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/restaurants", web::get().to(list_restaurants))
        .route("/restaurants/{id}", web::get().to(get_restaurant))
        .route("/menu-items", web::get().to(list_menu_items))
        .route("/menu-items/{id}", web::get().to(get_menu_item));
}

async fn list_restaurants(state: web::Data<AppState>) -> impl Responder {
    match state.service.store().get_restaurants().await {
        Ok(restaurants) => HttpResponse::Ok().json(restaurants),
        Err(e) => {
            tracing::error!("Failed to list restaurants: {}", e);
            internal_error("Internal server error", e.to_string())
        }
    }
}

/// Restaurant with its menu items
async fn get_restaurant(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.service.store().get_restaurant_with_menu_items(&id).await {
        Ok(Some(restaurant)) => HttpResponse::Ok().json(restaurant),
        Ok(None) => not_found("Restaurant not found", format!("No restaurant with id {}", id)),
        Err(e) => {
            tracing::error!("Failed to fetch restaurant {}: {}", id, e);
            internal_error("Internal server error", e.to_string())
        }
    }
}

/// GET /api/v1/menu-items?restaurantId=...
async fn list_menu_items(state: web::Data<AppState>, query: web::Query<MenuItemQuery>) -> impl Responder {
    let restaurant_id = query.restaurant_id.as_deref();

    match state.service.store().get_menu_items(restaurant_id).await {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(e) => {
            tracing::error!("Failed to list menu items: {}", e);
            internal_error("Internal server error", e.to_string())
        }
    }
}

async fn get_menu_item(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.service.store().get_menu_item_with_restaurant(&id).await {
        Ok(Some(item)) => HttpResponse::Ok().json(item),
        Ok(None) => not_found("Menu item not found", format!("No menu item with id {}", id)),
        Err(e) => {
            tracing::error!("Failed to fetch menu item {}: {}", id, e);
            internal_error("Internal server error", e.to_string())
        }
    }
}
