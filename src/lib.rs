//! Recipes Gateway
//!
//! A REST gateway for recipes, ingredients, steps and techniques with SQLite
//! persistence and Tantivy full-text search, plus the client side that consumes
//! it: a typed HTTP client, per-entity state slices and view-models.

pub mod actions;
pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod menu;
pub mod models;
pub mod routes;
pub mod search;
pub mod store;
pub mod views;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use db::Repository;
use search::SearchIndex;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub search: Arc<SearchIndex>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Ingredients
        .route(
            "/ingredients",
            get(api::list_ingredients).post(api::create_ingredient),
        )
        .route(
            "/ingredients/{id}",
            get(api::get_ingredient)
                .put(api::update_ingredient)
                .patch(api::partial_update_ingredient)
                .delete(api::delete_ingredient),
        )
        // Recipes
        .route("/recipes", get(api::list_recipes).post(api::create_recipe))
        .route(
            "/recipes/{id}",
            get(api::get_recipe)
                .put(api::update_recipe)
                .patch(api::partial_update_recipe)
                .delete(api::delete_recipe),
        )
        // Steps
        .route("/steps", get(api::list_steps).post(api::create_step))
        .route(
            "/steps/{id}",
            get(api::get_step)
                .put(api::update_step)
                .patch(api::partial_update_step)
                .delete(api::delete_step),
        )
        // Techniques
        .route(
            "/techniques",
            get(api::list_techniques).post(api::create_technique),
        )
        .route(
            "/techniques/{id}",
            get(api::get_technique)
                .put(api::update_technique)
                .patch(api::partial_update_technique)
                .delete(api::delete_technique),
        )
        // Search
        .route("/_search/ingredients", get(api::search_ingredients))
        .route("/_search/recipes", get(api::search_recipes))
        .route("/_search/steps", get(api::search_steps))
        .route("/_search/techniques", get(api::search_techniques));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
