//! Expert and crowd ratings combined into the figures shown on a review
//! page and embedded as schema.org markup.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Value, json};

use hustle_types::models::{Review, Website};

use crate::parse;

/// User reviews carried in the structured markup, newest first.
pub const SCHEMA_REVIEW_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    /// Parsed expert rating; 0 when absent or unreadable.
    pub expert: f64,
    /// Mean of the rated user reviews; 0 when there are none.
    pub user_average: f64,
    pub user_count: usize,
    /// User ratings plus the expert rating (weight 1, only when nonzero).
    pub aggregate: f64,
    pub total_ratings: usize,
}

impl RatingSummary {
    pub fn compute(expert_rating: Option<&str>, reviews: &[Review]) -> Self {
        let expert = parse::expert_rating(expert_rating);
        let ratings: Vec<f64> = reviews.iter().filter_map(|r| r.rating).map(f64::from).collect();

        let user_count = ratings.len();
        let user_sum: f64 = ratings.iter().sum();
        let user_average = if user_count > 0 { user_sum / user_count as f64 } else { 0.0 };

        let total_ratings = user_count + usize::from(expert > 0.0);
        let aggregate = if total_ratings > 0 {
            (user_sum + expert) / total_ratings as f64
        } else {
            0.0
        };

        Self {
            expert,
            user_average,
            user_count,
            aggregate,
            total_ratings,
        }
    }
}

/// schema.org `Product` with an `AggregateRating`, one synthetic expert
/// review and up to [`SCHEMA_REVIEW_LIMIT`] user reviews.
///
/// `reviews` must already be ordered newest first.
pub fn product_schema(
    site: &Website,
    reviews: &[Review],
    summary: &RatingSummary,
    expert_name: &str,
    today: NaiveDate,
) -> Value {
    let name = site.display_name();
    let today = today.format("%Y-%m-%d").to_string();

    let expert_value = if summary.expert != 0.0 {
        summary.expert
    } else {
        summary.aggregate
    };

    let mut entries = vec![json!({
        "@type": "Review",
        "author": {
            "@type": "Person",
            "name": expert_name,
            "jobTitle": "Money Making Expert",
        },
        "reviewRating": {
            "@type": "Rating",
            "ratingValue": expert_value,
            "bestRating": "5",
            "worstRating": "1",
        },
        "name": format!("Expert Review of {name}"),
        "reviewBody": site.about.as_deref().filter(|s| !s.is_empty()).unwrap_or("Expert review"),
        "datePublished": today,
        "dateModified": today,
        "publisher": {
            "@type": "Organization",
            "name": "Hustleworthy",
        },
    })];

    entries.extend(reviews.iter().take(SCHEMA_REVIEW_LIMIT).map(|review| {
        json!({
            "@type": "Review",
            "author": {
                "@type": "Person",
                "name": review.author_name.as_deref().filter(|s| !s.is_empty()).unwrap_or("Anonymous"),
            },
            "reviewRating": {
                "@type": "Rating",
                "ratingValue": review.rating.unwrap_or(0),
                "bestRating": "5",
                "worstRating": "1",
            },
            "name": format!("{name} User Review"),
            "reviewBody": review.content,
            "datePublished": review.created_at.format("%Y-%m-%d").to_string(),
        })
    }));

    let description = site
        .about
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(site.note_earning_potential.as_deref())
        .unwrap_or("");

    json!({
        "@context": "https://schema.org",
        "@type": "Product",
        "name": name,
        "description": description,
        "aggregateRating": {
            "@type": "AggregateRating",
            "ratingValue": format!("{:.1}", summary.aggregate),
            "bestRating": "5",
            "worstRating": "1",
            "ratingCount": summary.total_ratings.to_string(),
            "reviewCount": summary.total_ratings.to_string(),
        },
        "review": entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn review(rating: Option<u8>, content: &str) -> Review {
        Review {
            id: Uuid::new_v4(),
            content: content.to_string(),
            rating,
            website_id: 1,
            author_id: Uuid::new_v4(),
            author_name: None,
            created_at: Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap(),
            replies: vec![],
        }
    }

    #[test]
    fn test_no_ratings_is_zero_not_nan() {
        let summary = RatingSummary::compute(None, &[]);
        assert_eq!(summary.aggregate, 0.0);
        assert_eq!(summary.user_average, 0.0);
        assert_eq!(summary.total_ratings, 0);

        let unrated = RatingSummary::compute(Some("N/A"), &[review(None, "meh")]);
        assert_eq!(unrated.aggregate, 0.0);
        assert!(!unrated.aggregate.is_nan());
    }

    #[test]
    fn test_blends_expert_with_users() {
        let reviews = [review(Some(5), "a"), review(Some(3), "b"), review(None, "c")];
        let summary = RatingSummary::compute(Some("4 out of 5"), &reviews);
        assert_eq!(summary.user_count, 2);
        assert_eq!(summary.user_average, 4.0);
        assert_eq!(summary.total_ratings, 3);
        assert_eq!(summary.aggregate, 4.0);
    }

    #[test]
    fn test_expert_only() {
        let summary = RatingSummary::compute(Some("4.9"), &[]);
        assert_eq!(summary.aggregate, 4.9);
        assert_eq!(summary.total_ratings, 1);
    }

    #[test]
    fn test_schema_shape() {
        let site = Website {
            website_name: Some("PollPay".into()),
            about: Some("Surveys for cash".into()),
            expert_rating: Some("4.5".into()),
            ..Default::default()
        };
        let reviews: Vec<Review> = (0..25).map(|i| review(Some(4), &format!("r{i}"))).collect();
        let summary = RatingSummary::compute(site.expert_rating.as_deref(), &reviews);
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let schema = product_schema(&site, &reviews, &summary, "Jane Expert", today);

        assert_eq!(schema["@type"], "Product");
        assert_eq!(schema["aggregateRating"]["ratingValue"], "4.0");
        assert_eq!(schema["aggregateRating"]["ratingCount"], "26");
        let entries = schema["review"].as_array().unwrap();
        assert_eq!(entries.len(), 1 + SCHEMA_REVIEW_LIMIT);
        assert_eq!(entries[0]["name"], "Expert Review of PollPay");
        assert_eq!(entries[0]["reviewRating"]["ratingValue"], 4.5);
        assert_eq!(entries[0]["datePublished"], "2025-06-01");
        assert_eq!(entries[1]["author"]["name"], "Anonymous");
        assert_eq!(entries[1]["name"], "PollPay User Review");
        assert_eq!(entries[1]["datePublished"], "2025-03-14");
    }

    #[test]
    fn test_schema_expert_falls_back_to_aggregate() {
        let site = Website::default();
        let reviews = [review(Some(2), "x")];
        let summary = RatingSummary::compute(None, &reviews);
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let schema = product_schema(&site, &reviews, &summary, "Jane Expert", today);
        assert_eq!(schema["name"], "Website");
        assert_eq!(schema["review"][0]["reviewRating"]["ratingValue"], 2.0);
        assert_eq!(schema["review"][0]["reviewBody"], "Expert review");
    }
}
