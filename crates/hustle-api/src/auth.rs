use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::{SaltString, rand_core::OsRng}};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::info;
use uuid::Uuid;

use hustle_types::api::{Claims, LoginRequest, LoginResponse, SignupRequest, SignupResponse};

use crate::error::ApiError;
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;
const TOKEN_DAYS: i64 = 30;
const MEMBER_ROLE: i64 = 0;

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::bad_request("A valid email is required"));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request("Password must be at least 8 characters"));
    }
    let name = req
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| email.clone());

    let lookup = email.clone();
    if state.blocking(move |db| db.get_user_by_email(&lookup)).await?.is_some() {
        return Err(ApiError::Conflict("An account with this email already exists".into()));
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?
        .to_string();

    let user_id = Uuid::new_v4();
    {
        let (id, email, name) = (user_id.to_string(), email.clone(), name.clone());
        state
            .blocking(move |db| db.create_user(&id, &email, &name, &password_hash, MEMBER_ROLE))
            .await?;
    }
    info!("New account {} ({})", user_id, email);

    let token = create_token(&state.config.auth_secret, user_id, &email, &name, MEMBER_ROLE)?;

    Ok((StatusCode::CREATED, Json(SignupResponse { user_id, token })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = req.email.trim().to_lowercase();
    let user = state
        .blocking(move |db| db.get_user_by_email(&email))
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    // Verify password
    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|e| anyhow::anyhow!("stored password hash is unreadable: {e}"))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::unauthorized("Invalid email or password"))?;

    let user_id: Uuid = user
        .id
        .parse()
        .map_err(|e| anyhow::anyhow!("stored user id {} is not a uuid: {e}", user.id))?;

    let token = create_token(&state.config.auth_secret, user_id, &user.email, &user.name, user.role)?;

    Ok(Json(LoginResponse {
        user_id,
        email: user.email,
        name: user.name,
        token,
    }))
}

pub fn create_token(
    secret: &str,
    user_id: Uuid,
    email: &str,
    name: &str,
    role: i64,
) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        name: name.to_string(),
        role,
        exp: (chrono::Utc::now() + chrono::Duration::days(TOKEN_DAYS)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
