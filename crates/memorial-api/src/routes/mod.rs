//! Route definitions
//!
//! Records live under `/sepultados`, accounts under `/users`; uploaded
//! images are served statically from `/images`.

use std::path::Path;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers::{health, memorials, search, users};
use crate::state::AppState;

/// Create the API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/sepultados", memorial_routes())
        .nest("/users", user_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Static files written by the image store
pub fn image_routes(upload_dir: &Path) -> Router<AppState> {
    Router::new().nest_service("/images", ServeDir::new(upload_dir))
}

/// Memorial record routes
fn memorial_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(memorials::list_records))
        .route("/create", post(memorials::create_record))
        .route("/meussepultados", get(memorials::list_owned_records))
        // Search
        .route("/pesquisa", get(search::search_records))
        .route("/search", get(search::search_records))
        .route("/sugestoes", get(search::suggestions))
        .route("/autocomplete", get(search::autocomplete))
        // Adoption
        .route("/schedule/:id", patch(memorials::schedule_adoption))
        .route("/conclude/:id", patch(memorials::conclude_adoption))
        // Single record
        .route(
            "/:id",
            get(memorials::get_record)
                .patch(memorials::update_record)
                .delete(memorials::delete_record),
        )
        .route("/:id/comentario", post(memorials::add_comment))
}

/// User account routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/checkuser", get(users::check_user))
        .route("/:id", get(users::get_user).patch(users::edit_user))
}
