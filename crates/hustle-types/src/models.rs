use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role value carried by administrators.
pub const ADMIN_ROLE: i64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: i64,
    pub created_at: DateTime<Utc>,
}

/// A catalog entry for a reviewed money-making platform.
///
/// Most descriptive fields are free text exactly as entered by the editors
/// ("$25", "4.5 out of 5", "PayPal, Gift Cards"). Numeric interpretation
/// happens in `hustle-catalog`, never here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Website {
    /// Legacy rows may predate the identifier column.
    pub id: Option<String>,
    pub s_no: i64,
    pub website_name: Option<String>,
    pub url: Option<String>,
    pub sign_up_bonus: Option<String>,
    pub payout_methods: Option<String>,
    pub minimum_withdrawal: Option<String>,
    pub note_earning_potential: Option<String>,
    pub earning_potential_in_1hr: Option<String>,
    pub earning_potential_in_a_month: Option<String>,
    pub countries_supported: Option<String>,
    pub payout_frequency: Option<String>,
    pub video: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub expert_review: Option<String>,
    pub expert_rating: Option<String>,
    pub expert_tips: Option<String>,
    pub is_it_legit: Option<String>,
    pub ways_to_earn: Option<String>,
    pub about: Option<String>,
    /// "Yes" / "No"; absent means "No".
    pub investment: Option<String>,
    pub is_verified: bool,
    pub verified_owner: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Website {
    pub fn display_name(&self) -> &str {
        self.website_name.as_deref().unwrap_or("Website")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: Uuid,
    pub content: String,
    pub review_id: Uuid,
    pub author_id: Uuid,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub content: String,
    /// 1..=5 when present. Unrated reviews are shown but not averaged.
    pub rating: Option<u8>,
    pub website_id: i64,
    pub author_id: Uuid,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub website_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A verification request joined with the claimant and the claimed site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDetail {
    pub request: VerificationRequest,
    pub user: User,
    pub website: Website,
}
