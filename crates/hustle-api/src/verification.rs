//! Ownership claims: the embed snippet, its automated check, manual
//! requests to the admin and the admin's approval.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use tracing::{info, warn};
use uuid::Uuid;

use hustle_types::api::{
    ApproveOwnershipRequest, ApproveOwnershipResponse, ApprovedWebsite, Claims, EmbedCodeQuery,
    EmbedCodeResponse, EmbedVerifyQuery, EmbedVerifyResponse, ManualVerificationRequest,
    ManualVerificationResponse,
};
use hustle_verify::embed::{self, review_path_segment};
use hustle_verify::fetch::parse_target;
use hustle_verify::templates::{self, ManualRequest, OwnershipApproved};

use crate::error::ApiError;
use crate::middleware::require_admin;
use crate::state::AppState;

const VERIFIED_MESSAGE: &str = "Website is verified";
const NOT_FOUND_MESSAGE: &str = "Sorry something went wrong. Please request manual verification.";

fn present(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub async fn embed_code(Query(query): Query<EmbedCodeQuery>) -> impl IntoResponse {
    let name = query.website_name.as_deref();
    Json(EmbedCodeResponse {
        embed_code: embed::embed_code(name),
        review_url: embed::review_url(name),
    })
}

/// Render the claimed page and look for the snippet verbatim. The result is
/// reported only; ownership is recorded by admin approval.
pub async fn embed_code_verify(
    State(state): State<AppState>,
    Query(query): Query<EmbedVerifyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let raw = present(query.url).ok_or_else(|| ApiError::bad_request("Missing ?url parameter"))?;
    let target = parse_target(&raw).map_err(|e| ApiError::bad_request(e.to_string()))?;
    let name = query.website_name.as_deref();

    let found = match state.fetcher.fetch_html(&target).await {
        Ok(html) => embed::contains_embed(&html, name),
        Err(e) => {
            warn!("Could not render {} for embed check: {}", target, e);
            false
        }
    };

    let outcome = if found {
        info!("Embed code found on {}", target);
        EmbedVerifyResponse::Verified {
            message: VERIFIED_MESSAGE.into(),
            redirect: format!("/reviews/{}", review_path_segment(name)),
        }
    } else {
        EmbedVerifyResponse::NotFound {
            message: NOT_FOUND_MESSAGE.into(),
            fallback: "manual".into(),
        }
    };
    Ok(Json(outcome))
}

pub async fn manual_verification(
    State(state): State<AppState>,
    Json(req): Json<ManualVerificationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(user_email), Some(website_name), Some(domain)) =
        (present(req.user_email), present(req.website_name), present(req.domain))
    else {
        return Err(ApiError::bad_request("Missing required fields"));
    };

    let email = user_email.to_lowercase();
    let user = state
        .blocking(move |db| db.get_user_by_email(&email))
        .await?
        .ok_or_else(|| ApiError::not_found("User not found. Please sign up first."))?;

    let (name, host) = (website_name.clone(), domain.clone());
    let website = state
        .blocking(move |db| db.find_website_for_claim(&name, &host))
        .await?
        .ok_or_else(|| ApiError::not_found("Website not found in our database"))?;

    let new_id = Uuid::new_v4().to_string();
    let user_id = user.id.clone();
    let s_no = website.s_no;
    let request = state
        .blocking(move |db| db.find_or_create_verification_request(&new_id, &user_id, s_no))
        .await?
        .into_model();
    info!("Verification request {} for website {} by {}", request.id, s_no, user.email);

    match &state.config.admin_email {
        Some(admin_email) => {
            let request_id = request.id.to_string();
            let email = templates::manual_request(&ManualRequest {
                admin_email,
                user_name: &user.name,
                user_email: &user_email,
                website_name: &website_name,
                domain: &domain,
                request_id: &request_id,
                base_url: &state.config.base_url,
                requested_at: chrono::Utc::now(),
            });
            state.notify(email).await;
        }
        None => warn!("No admin email configured, request {} was not announced", request.id),
    }

    Ok(Json(ManualVerificationResponse {
        message: "Manual verification request sent successfully".into(),
        verification_request_id: request.id,
        website_id: s_no,
    }))
}

/// Admin approval. Re-approving a processed request applies the same owner
/// again.
pub async fn approve_ownership(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ApproveOwnershipRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&claims)?;
    let id = present(req.verification_request_id)
        .ok_or_else(|| ApiError::bad_request("Verification request ID is required"))?;

    let detail = state
        .blocking(move |db| db.get_verification_detail(&id))
        .await?
        .ok_or_else(|| ApiError::not_found("Verification request not found"))?;

    let s_no = detail.website.s_no;
    let owner = detail.user.id.to_string();
    let website = state
        .blocking(move |db| db.set_verified_owner(s_no, &owner))
        .await?
        .ok_or_else(|| ApiError::not_found("Website not found"))?;
    info!("Website {} now owned by {}", s_no, detail.user.id);

    let email = templates::ownership_approved(&OwnershipApproved {
        user_email: &detail.user.email,
        user_name: &detail.user.name,
        website_name: detail.website.website_name.as_deref().unwrap_or("Your Website"),
        website_url: detail.website.url.as_deref(),
    });
    state.notify(email).await;

    Ok(Json(ApproveOwnershipResponse {
        success: true,
        message: "Ownership approved successfully and confirmation email sent".into(),
        website: ApprovedWebsite {
            id: website.s_no,
            name: website.website_name,
            is_verified: website.is_verified,
            verified_owner: website.verified_owner,
        },
    }))
}

/// The request with its claimant and website, for the admin review page.
pub async fn verification_detail(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&claims)?;
    let detail = state
        .blocking(move |db| db.get_verification_detail(&id))
        .await?
        .ok_or_else(|| ApiError::not_found("Verification request not found"))?;
    Ok(Json(detail))
}
