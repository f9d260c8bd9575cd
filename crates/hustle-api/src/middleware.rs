use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};

use hustle_types::api::Claims;

use crate::error::ApiError;
use crate::state::AppState;

/// Extract and validate the bearer JWT, then expose its `Claims` to handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let unauthorized = || ApiError::unauthorized("Unauthorized");

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(unauthorized)?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(unauthorized)?;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.config.auth_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| unauthorized())?;

    req.extensions_mut().insert(token_data.claims);
    Ok(next.run(req).await)
}

/// Admin gate used inside admin handlers, after `require_auth`.
pub fn require_admin(claims: &Claims) -> Result<(), ApiError> {
    if claims.is_admin() {
        Ok(())
    } else {
        Err(ApiError::unauthorized("Unauthorized - Admin access required"))
    }
}
