use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use hustle_catalog::category::CategoryKind;
use hustle_catalog::rating::product_schema;
use hustle_catalog::sample::sample_websites;
use hustle_catalog::text::{display_name, review_slug};
use hustle_catalog::{FilterCriteria, LoadMore, RatingSummary, SortOption};
use hustle_db::WebsiteUpdate;
use hustle_types::api::{Claims, UpdateWebsiteRequest, UpdateWebsiteResponse};
use hustle_types::models::{Review, Website};

use crate::error::ApiError;
use crate::state::AppState;

const FEATURED_DEFAULT: usize = 5;

/// The whole catalog in `s_no` order. A datastore failure degrades to the
/// built-in sample list instead of failing the page.
pub(crate) async fn load_catalog(state: &AppState) -> Vec<Website> {
    match state.blocking(|db| db.list_websites()).await {
        Ok(sites) => sites,
        Err(e) => {
            warn!("Failed to load websites, serving sample list: {}", e);
            sample_websites()
        }
    }
}

pub async fn list_websites(State(state): State<AppState>) -> impl IntoResponse {
    Json(load_catalog(&state).await)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchQuery {
    pub expert_rating: Option<String>,
    pub earning_potential: Option<String>,
    /// Comma separated.
    pub ways_to_earn: Option<String>,
    /// Comma separated.
    pub payout_methods: Option<String>,
    pub investment_required: Option<bool>,
    pub sort: Option<SortOption>,
    /// Category page slug, e.g. `paypal`.
    pub payout_method: Option<String>,
    /// Category page slug, e.g. `taking-surveys`.
    pub way_to_earn: Option<String>,
    /// How many entries the client already shows.
    pub visible: Option<usize>,
}

impl SearchQuery {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            expert_rating: self.expert_rating.clone().unwrap_or_default().trim().to_string(),
            earning_potential: self.earning_potential.clone().unwrap_or_default().trim().to_string(),
            ways_to_earn: comma_list(self.ways_to_earn.as_deref()),
            payout_methods: comma_list(self.payout_methods.as_deref()),
            investment_required: self.investment_required.unwrap_or(false),
        }
    }

    /// The category page this search is scoped to, if any.
    fn category(&self) -> Result<Option<(CategoryKind, &'static str)>, ApiError> {
        let scoped = [
            (CategoryKind::PayoutMethod, self.payout_method.as_deref()),
            (CategoryKind::WayToEarn, self.way_to_earn.as_deref()),
        ];
        for (kind, slug) in scoped {
            if let Some(slug) = slug.filter(|s| !s.is_empty()) {
                let name = kind
                    .display_name(slug)
                    .ok_or_else(|| ApiError::not_found("Category not found"))?;
                return Ok(Some((kind, name)));
            }
        }
        Ok(None)
    }
}

fn comma_list(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub websites: Vec<Website>,
    pub total: usize,
    pub visible: usize,
    pub has_more: bool,
    pub category: Option<String>,
}

pub async fn search_websites(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let category = query.category()?;
    let criteria = query.criteria();

    let mut sites = load_catalog(&state).await;
    if let Some((kind, name)) = category {
        sites = kind.filter(sites, name);
    }
    let mut sites = criteria.apply(sites);
    query.sort.unwrap_or_default().apply(&mut sites);

    // category pages always show every match
    let filters_active = criteria.is_active() || category.is_some();
    let window = LoadMore::from_visible(query.visible.unwrap_or(0));
    let shown = window.window(&sites, filters_active).to_vec();
    debug!("Search matched {} websites, returning {}", sites.len(), shown.len());

    Ok(Json(SearchResponse {
        total: sites.len(),
        visible: shown.len(),
        has_more: window.has_more(sites.len(), filters_active),
        websites: shown,
        category: category.map(|(_, name)| name.to_string()),
    }))
}

#[derive(Debug, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<usize>,
}

/// First entries of the catalog, for the "best" page.
pub async fn featured_websites(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> impl IntoResponse {
    let limit = query.limit.unwrap_or(FEATURED_DEFAULT);
    let mut sites = load_catalog(&state).await;
    sites.truncate(limit);
    Json(sites)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteDetail {
    pub website: Website,
    pub reviews: Vec<Review>,
    pub rating: RatingSummary,
    /// schema.org JSON-LD for the review page.
    pub schema: Value,
}

pub async fn website_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let lookup = slug.clone();
    let (website, mut reviews) =
        match state.blocking(move |db| db.find_website_by_slug(&lookup)).await {
            Ok(Some(site)) => {
                let s_no = site.s_no;
                let reviews = state.blocking(move |db| db.reviews_for_website(s_no)).await?;
                (site, reviews)
            }
            Ok(None) => return Err(ApiError::not_found("Website not found")),
            Err(e) => {
                warn!("Website lookup failed for '{}', trying sample list: {}", slug, e);
                let wanted = slug.to_lowercase();
                let site = sample_websites()
                    .into_iter()
                    .find(|s| review_slug(s.display_name()) == wanted)
                    .ok_or_else(|| ApiError::not_found("Website not found"))?;
                (site, Vec::new())
            }
        };

    for review in &mut reviews {
        public_names(review);
    }

    let rating = RatingSummary::compute(website.expert_rating.as_deref(), &reviews);
    let schema = product_schema(
        &website,
        &reviews,
        &rating,
        &state.config.expert_name,
        chrono::Utc::now().date_naive(),
    );

    Ok(Json(WebsiteDetail {
        website,
        reviews,
        rating,
        schema,
    }))
}

/// Email-like author names are shown by their local part only.
pub(crate) fn public_names(review: &mut Review) {
    review.author_name = review.author_name.as_deref().map(|n| display_name(n).to_string());
    for reply in &mut review.replies {
        reply.author_name = reply.author_name.as_deref().map(|n| display_name(n).to_string());
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub async fn update_website(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateWebsiteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let s_no = req
        .website_id
        .ok_or_else(|| ApiError::bad_request("Website ID is required"))?;

    let site = state
        .blocking(move |db| db.get_website(s_no))
        .await?
        .ok_or_else(|| ApiError::not_found("Website not found"))?;

    if site.verified_owner != Some(claims.sub) {
        return Err(ApiError::Forbidden("You are not authorized to edit this website".into()));
    }

    let update = WebsiteUpdate {
        about: blank_to_none(req.about),
        ways_to_earn: blank_to_none(req.ways_to_earn),
        expert_tips: blank_to_none(req.expert_tips),
        payout_methods: blank_to_none(req.payout_methods),
        payout_frequency: blank_to_none(req.payout_frequency),
    };

    let website = state
        .blocking(move |db| db.update_website_fields(s_no, &update))
        .await?
        .ok_or_else(|| ApiError::not_found("Website not found"))?;

    Ok(Json(UpdateWebsiteResponse {
        success: true,
        message: "Website updated successfully".into(),
        website,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_list_trims_and_drops_blanks() {
        assert_eq!(comma_list(Some(" PayPal, ,Gift Cards,")), vec!["PayPal", "Gift Cards"]);
        assert!(comma_list(None).is_empty());
    }

    #[test]
    fn test_query_category_resolution() {
        let query = SearchQuery {
            payout_method: Some("paypal".into()),
            ..Default::default()
        };
        assert_eq!(query.category().unwrap(), Some((CategoryKind::PayoutMethod, "PayPal")));

        let unknown = SearchQuery {
            way_to_earn: Some("alchemy".into()),
            ..Default::default()
        };
        assert!(matches!(unknown.category(), Err(ApiError::NotFound(_))));

        assert_eq!(SearchQuery::default().category().unwrap(), None);
    }

    #[test]
    fn test_query_criteria() {
        let query = SearchQuery {
            expert_rating: Some(" 4 ".into()),
            payout_methods: Some("PayPal,Venmo".into()),
            ..Default::default()
        };
        let criteria = query.criteria();
        assert_eq!(criteria.expert_rating, "4");
        assert_eq!(criteria.payout_methods, vec!["PayPal", "Venmo"]);
        assert!(criteria.is_active());
        assert!(!SearchQuery::default().criteria().is_active());
    }
}
