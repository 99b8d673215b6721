use axum::{
    Json, Router,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::models::shared::MessageResponse;
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .nest("/api/auth", auth_routes())
        .nest("/api/food", food_routes())
}

async fn health() -> Json<MessageResponse> {
    Json(MessageResponse::new("Zero Hunger API is running"))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
}

fn food_routes() -> Router<AppState> {
    Router::new()
        // Donor
        .route("/my-foods", get(handlers::food::my_foods))
        .route("/add", post(handlers::food::add_food))
        .route("/update/{id}", put(handlers::food::update_food))
        .route("/delete/{id}", delete(handlers::food::delete_food))
        .route("/donor-stats", get(handlers::stats::donor_stats))
        .route("/donor/profile", get(handlers::stats::donor_profile))
        // Volunteer
        .route("/available", get(handlers::food::available_food))
        .route("/reserve/{id}", post(handlers::food::reserve_food))
        .route("/pick/{id}", post(handlers::food::pick_food))
        .route("/unreserve/{id}", post(handlers::food::unreserve_food))
        .route("/deliver/{id}", post(handlers::food::deliver_food))
        .route("/my-cart", get(handlers::food::my_cart))
        .route("/volunteer/profile", get(handlers::stats::volunteer_profile))
        .route(
            "/volunteer/deliveries",
            get(handlers::food::volunteer_deliveries),
        )
        // Any authenticated user
        .route("/platform/stats", get(handlers::stats::platform_stats))
        // Unauthenticated
        .route("/public/stats", get(handlers::stats::public_stats))
        .route("/public/donors", get(handlers::stats::public_donors))
        .route("/public/deliveries", get(handlers::stats::public_deliveries))
        .route("/public/volunteers", get(handlers::stats::public_volunteers))
}
