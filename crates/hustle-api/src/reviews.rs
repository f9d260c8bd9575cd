use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;
use uuid::Uuid;

use hustle_catalog::text::display_name;
use hustle_types::api::{Claims, CreateReplyRequest, CreateReviewRequest};

use crate::error::ApiError;
use crate::state::AppState;
use crate::websites::public_names;

/// Present, non-blank text.
fn required(content: Option<String>) -> Option<String> {
    content.map(|c| c.trim().to_string()).filter(|c| !c.is_empty())
}

fn star_rating(rating: Option<i64>) -> Result<Option<u8>, ApiError> {
    match rating {
        None => Ok(None),
        Some(r @ 1..=5) => Ok(Some(r as u8)),
        Some(_) => Err(ApiError::bad_request("Rating must be between 1 and 5")),
    }
}

/// The session user must still exist in the datastore.
async fn ensure_user(state: &AppState, claims: &Claims) -> Result<String, ApiError> {
    let user_id = claims.sub.to_string();
    let lookup = user_id.clone();
    state
        .blocking(move |db| db.get_user_by_id(&lookup))
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(user_id)
}

pub async fn create_review(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(content), Some(website_id)) = (required(req.content), req.website_id) else {
        return Err(ApiError::bad_request("Content and websiteId are required"));
    };
    let rating = star_rating(req.rating)?;

    let user_id = ensure_user(&state, &claims).await?;

    state
        .blocking(move |db| db.get_website(website_id))
        .await?
        .ok_or_else(|| ApiError::not_found("Website not found"))?;

    let review_id = Uuid::new_v4().to_string();
    let id = review_id.clone();
    let mut review = state
        .blocking(move |db| {
            db.create_review(&id, website_id, &user_id, &content, rating)?;
            db.get_review(&id)
        })
        .await?
        .ok_or_else(|| anyhow::anyhow!("review {review_id} vanished after insert"))?;
    public_names(&mut review);

    info!("Review {} posted on website {} by {}", review.id, website_id, display_name(&claims.name));
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn create_reply(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateReplyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(content), Some(review_id)) = (required(req.content), req.review_id) else {
        return Err(ApiError::bad_request("Content and reviewId are required"));
    };

    let user_id = ensure_user(&state, &claims).await?;

    let review_key = review_id.to_string();
    state
        .blocking(move |db| db.get_review(&review_key))
        .await?
        .ok_or_else(|| ApiError::not_found("Review not found"))?;

    let reply_id = Uuid::new_v4().to_string();
    let (id, review_key) = (reply_id.clone(), review_id.to_string());
    let mut reply = state
        .blocking(move |db| {
            db.create_reply(&id, &review_key, &user_id, &content)?;
            db.get_reply(&id)
        })
        .await?
        .ok_or_else(|| anyhow::anyhow!("reply {reply_id} vanished after insert"))?;
    reply.author_name = reply.author_name.as_deref().map(|n| display_name(n).to_string());

    Ok((StatusCode::CREATED, Json(reply)))
}
