pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod lifecycle;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod sweeper;
pub mod utils;

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Zero Hunger API",
        version = "1.0.0",
        description = "API for coordinating surplus-food donations between donors and volunteers"
    ),
    paths(
        handlers::food::my_foods,
        handlers::food::add_food,
        handlers::food::update_food,
        handlers::food::delete_food,
        handlers::food::available_food,
        handlers::food::reserve_food,
        handlers::food::pick_food,
        handlers::food::unreserve_food,
        handlers::food::deliver_food,
        handlers::food::my_cart,
        handlers::food::volunteer_deliveries,
        handlers::stats::donor_stats,
        handlers::stats::donor_profile,
        handlers::stats::volunteer_profile,
        handlers::stats::platform_stats,
        handlers::stats::public_stats,
        handlers::stats::public_donors,
        handlers::stats::public_deliveries,
        handlers::stats::public_volunteers,
    ),
    tags(
        (name = "Food", description = "Donor listings and volunteer views"),
        (name = "Lifecycle", description = "Guarded food state transitions"),
        (name = "Stats", description = "Dashboards and profiles"),
        (name = "Public", description = "Unauthenticated projections"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.max_age))
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);
    let api = ApiDoc::openapi();

    routes::api_routes()
        .layer(cors)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}
