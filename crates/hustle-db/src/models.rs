//! Database row types. These map directly to SQLite rows; conversion into
//! `hustle-types` models happens at the edge of this crate.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use hustle_types::models::{Reply, Review, User, VerificationRequest};

pub struct UserRow {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: i64,
    pub created_at: String,
}

pub struct ReviewRow {
    pub id: String,
    pub content: String,
    pub rating: Option<i64>,
    pub website_id: i64,
    pub user_id: String,
    pub author_name: Option<String>,
    pub created_at: String,
}

pub struct ReplyRow {
    pub id: String,
    pub content: String,
    pub review_id: String,
    pub user_id: String,
    pub author_name: Option<String>,
    pub created_at: String,
}

pub struct VerificationRow {
    pub id: String,
    pub user_id: String,
    pub website_id: i64,
    pub created_at: String,
}

/// Owner-editable columns. `None` clears the column.
#[derive(Debug, Clone, Default)]
pub struct WebsiteUpdate {
    pub about: Option<String>,
    pub ways_to_earn: Option<String>,
    pub expert_tips: Option<String>,
    pub payout_methods: Option<String>,
    pub payout_frequency: Option<String>,
}

/// Parses either RFC 3339 or SQLite's bare `YYYY-MM-DD HH:MM:SS`.
pub fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc()))
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}': {}", raw, e);
            DateTime::default()
        })
}

pub(crate) fn parse_id(raw: &str, what: &str) -> Uuid {
    raw.parse().unwrap_or_else(|e| {
        warn!("Corrupt {} '{}': {}", what, raw, e);
        Uuid::default()
    })
}

impl UserRow {
    pub fn into_model(self) -> User {
        User {
            id: parse_id(&self.id, "user id"),
            email: self.email,
            name: self.name,
            role: self.role,
            created_at: parse_timestamp(&self.created_at),
        }
    }
}

impl ReviewRow {
    pub fn into_model(self, replies: Vec<Reply>) -> Review {
        Review {
            id: parse_id(&self.id, "review id"),
            content: self.content,
            rating: self.rating.and_then(|r| u8::try_from(r).ok()).filter(|r| (1..=5).contains(r)),
            website_id: self.website_id,
            author_id: parse_id(&self.user_id, "review author"),
            author_name: self.author_name,
            created_at: parse_timestamp(&self.created_at),
            replies,
        }
    }
}

impl ReplyRow {
    pub fn into_model(self) -> Reply {
        Reply {
            id: parse_id(&self.id, "reply id"),
            content: self.content,
            review_id: parse_id(&self.review_id, "reply review"),
            author_id: parse_id(&self.user_id, "reply author"),
            author_name: self.author_name,
            created_at: parse_timestamp(&self.created_at),
        }
    }
}

impl VerificationRow {
    pub fn into_model(self) -> VerificationRequest {
        VerificationRequest {
            id: parse_id(&self.id, "verification id"),
            user_id: parse_id(&self.user_id, "verification user"),
            website_id: self.website_id,
            created_at: parse_timestamp(&self.created_at),
        }
    }
}
