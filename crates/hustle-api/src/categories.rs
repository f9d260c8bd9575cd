use axum::{Json, extract::State, response::IntoResponse};

use hustle_catalog::category::CategoryKind;

use crate::state::AppState;
use crate::websites::load_catalog;

pub async fn payout_methods(State(state): State<AppState>) -> impl IntoResponse {
    let sites = load_catalog(&state).await;
    Json(CategoryKind::PayoutMethod.summaries(&sites))
}

pub async fn ways_to_earn(State(state): State<AppState>) -> impl IntoResponse {
    let sites = load_catalog(&state).await;
    Json(CategoryKind::WayToEarn.summaries(&sites))
}
