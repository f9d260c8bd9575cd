use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ADMIN_ROLE;

// -- JWT Claims --

/// Session claims shared by the auth handlers and the request middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: i64,
    pub exp: usize,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub token: String,
}

// -- Reviews --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CreateReviewRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub website_id: Option<i64>,
    #[serde(default)]
    pub rating: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CreateReplyRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub review_id: Option<Uuid>,
}

// -- Owner edits --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct UpdateWebsiteRequest {
    #[serde(default)]
    pub website_id: Option<i64>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub ways_to_earn: Option<String>,
    #[serde(default)]
    pub expert_tips: Option<String>,
    #[serde(default)]
    pub payout_methods: Option<String>,
    #[serde(default)]
    pub payout_frequency: Option<String>,
}

/// The owner-editable subset of a website, echoed back after an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditableWebsite {
    pub s_no: i64,
    pub website_name: Option<String>,
    pub about: Option<String>,
    pub ways_to_earn: Option<String>,
    pub expert_tips: Option<String>,
    pub payout_methods: Option<String>,
    pub payout_frequency: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateWebsiteResponse {
    pub success: bool,
    pub message: String,
    pub website: EditableWebsite,
}

// -- Ownership verification --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedCodeQuery {
    #[serde(default)]
    pub website_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedCodeResponse {
    pub embed_code: String,
    pub review_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedVerifyQuery {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub website_name: Option<String>,
}

/// Outcome of the automated embed-code check.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EmbedVerifyResponse {
    /// The snippet was found verbatim on the page.
    Verified { message: String, redirect: String },
    /// The snippet was absent; the claimant should request manual review.
    NotFound { message: String, fallback: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualVerificationRequest {
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub website_name: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualVerificationResponse {
    pub message: String,
    pub verification_request_id: Uuid,
    pub website_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveOwnershipRequest {
    #[serde(default)]
    pub verification_request_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedWebsite {
    pub id: i64,
    pub name: Option<String>,
    pub is_verified: bool,
    pub verified_owner: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApproveOwnershipResponse {
    pub success: bool,
    pub message: String,
    pub website: ApprovedWebsite,
}

// -- Blog revalidation --

/// Webhook payload; the CMS sends more fields than these, all ignored.
#[derive(Debug, Default, Deserialize)]
pub struct RevalidateBody {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RevalidateResponse {
    pub revalidated: bool,
    pub now: i64,
    pub paths: Vec<String>,
}

// -- Categories --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub slug: String,
    pub name: String,
    pub count: usize,
}
