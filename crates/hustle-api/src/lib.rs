pub mod auth;
pub mod blog;
pub mod categories;
pub mod error;
pub mod middleware;
pub mod reviews;
pub mod sitemap;
pub mod state;
pub mod verification;
pub mod websites;

use axum::{
    Json, Router,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;

pub use error::ApiError;
pub use state::{ApiConfig, AppState, AppStateInner};

use crate::middleware::require_auth;

/// Every route, with the session layer applied to the protected half.
/// Cross-cutting layers (CORS, tracing) are added by the binary.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/websites", get(websites::list_websites))
        .route("/websites/search", get(websites::search_websites))
        .route("/websites/featured", get(websites::featured_websites))
        .route("/websites/{slug}", get(websites::website_detail))
        .route("/categories/payout-methods", get(categories::payout_methods))
        .route("/categories/ways-to-earn", get(categories::ways_to_earn))
        .route("/embed-code", get(verification::embed_code))
        .route("/embed-code-verify", get(verification::embed_code_verify))
        .route("/manual-verification", post(verification::manual_verification))
        .route("/blog", get(blog::list_posts))
        .route("/blog/{slug}", get(blog::get_post))
        .route("/revalidate", post(blog::revalidate_post).get(blog::revalidate_get))
        .route("/sitemap.xml", get(sitemap::sitemap))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/websites/update", put(websites::update_website))
        .route("/reviews", post(reviews::create_review))
        .route("/replies", post(reviews::create_reply))
        .route("/approve-ownership", post(verification::approve_ownership))
        .route("/admin/verification/{id}", get(verification::verification_detail))
        .layer(from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new().merge(public_routes).merge(protected_routes)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
