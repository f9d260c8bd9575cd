use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use hustle_catalog::text::slugify;
use hustle_types::blog::{Post, PostList};

use crate::cache::BlogCache;

pub const BLOG_ENDPOINT: &str = "blog";
const API_KEY_HEADER: &str = "X-MICROCMS-API-KEY";
/// Largest page the CMS serves in one request.
const MAX_LIMIT: u64 = 100;
const LISTING_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    #[error("cms is not configured: {0}")]
    NotConfigured(&'static str),

    #[error("invalid cms url: {0}")]
    Url(#[from] url::ParseError),

    #[error("cms request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("cms returned {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Clone, Default)]
pub struct Queries {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub orders: Option<String>,
}

impl Queries {
    /// Newest first.
    pub fn newest(offset: u64, limit: u64) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
            orders: Some("-publishedAt".to_string()),
        }
    }

    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(orders) = &self.orders {
            pairs.push(("orders", orders.clone()));
        }
        pairs
    }
}

pub struct CmsClient {
    http: Client,
    base: Url,
    api_key: String,
    cache: BlogCache,
}

impl CmsClient {
    /// Client for `https://{service}.microcms.io/api/v1/`.
    pub fn new(service: &str, api_key: &str, timeout: Duration) -> Result<Self, CmsError> {
        if service.is_empty() {
            return Err(CmsError::NotConfigured("service domain"));
        }
        Self::with_base_url(&format!("https://{service}.microcms.io/api/v1/"), api_key, timeout)
    }

    pub fn with_base_url(base: &str, api_key: &str, timeout: Duration) -> Result<Self, CmsError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = Client::builder()
            .user_agent("Hustleworthy/1.2")
            .timeout(timeout)
            .connect_timeout(timeout / 2)
            .build()?;

        Ok(Self {
            http,
            base,
            api_key: api_key.to_string(),
            cache: BlogCache::new(LISTING_TTL),
        })
    }

    /// `GET {base}/{endpoint}` with list queries.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str, queries: &Queries) -> Result<T, CmsError> {
        let url = self.base.join(endpoint)?;
        debug!("CMS GET {} {:?}", url, queries);

        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&queries.pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CmsError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }

    /// One page of the blog listing, newest first. Served from cache when a
    /// fresh copy is held.
    pub async fn list_posts(&self, offset: u64, limit: u64) -> Result<PostList, CmsError> {
        let limit = limit.clamp(1, MAX_LIMIT);
        if let Some(hit) = self.cache.get(offset, limit).await {
            return Ok(hit);
        }

        let list: PostList = self.get(BLOG_ENDPOINT, &Queries::newest(offset, limit)).await?;
        self.cache.put(offset, limit, list.clone()).await;
        Ok(list)
    }

    /// Every post, newest first, in as many pages as needed.
    pub async fn all_posts(&self) -> Result<Vec<Post>, CmsError> {
        let mut posts = Vec::new();
        loop {
            let page = self.list_posts(posts.len() as u64, MAX_LIMIT).await?;
            let fetched = page.contents.len();
            posts.extend(page.contents);
            if fetched == 0 || posts.len() as u64 >= page.total_count {
                break;
            }
        }
        Ok(posts)
    }

    pub async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>, CmsError> {
        let posts = self.all_posts().await?;
        Ok(find_post_by_slug(&posts, slug).cloned())
    }

    /// Forget every cached listing page.
    pub async fn invalidate(&self) {
        let dropped = self.cache.clear().await;
        info!("Blog cache cleared ({} pages)", dropped);
    }
}

/// The post whose slugified title equals `slug` (lowercased, trimmed).
pub fn find_post_by_slug<'a>(posts: &'a [Post], slug: &str) -> Option<&'a Post> {
    let wanted = slug.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    posts.iter().find(|post| !post.title.is_empty() && slugify(&post.title) == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn post(id: &str, title: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": title,
            "content": "<p>body</p>",
            "publishedAt": "2025-01-01T00:00:00.000Z"
        })
    }

    fn client(server: &MockServer) -> CmsClient {
        CmsClient::with_base_url(&format!("{}/api/v1", server.uri()), "secret-key", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_list_posts_sends_key_and_queries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/blog"))
            .and(header("X-MICROCMS-API-KEY", "secret-key"))
            .and(query_param("offset", "0"))
            .and(query_param("limit", "6"))
            .and(query_param("orders", "-publishedAt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "contents": [post("a", "First Post")],
                "totalCount": 1,
                "offset": 0,
                "limit": 6
            })))
            .expect(1)
            .mount(&server)
            .await;

        let cms = client(&server);
        let list = cms.list_posts(0, 6).await.unwrap();
        assert_eq!(list.total_count, 1);
        assert_eq!(list.contents[0].title, "First Post");

        // second call is served from cache
        cms.list_posts(0, 6).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/blog"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "contents": [],
                "totalCount": 0
            })))
            .expect(2)
            .mount(&server)
            .await;

        let cms = client(&server);
        cms.list_posts(0, 6).await.unwrap();
        cms.invalidate().await;
        cms.list_posts(0, 6).await.unwrap();
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let err = client(&server).list_posts(0, 6).await.unwrap_err();
        assert!(matches!(err, CmsError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_post_by_slug() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/blog"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "contents": [post("a", "How to Make Money Online"), post("b", "Side Hustles 2025")],
                "totalCount": 2
            })))
            .mount(&server)
            .await;

        let cms = client(&server);
        let found = cms.post_by_slug("side-hustles-2025").await.unwrap().unwrap();
        assert_eq!(found.id, "b");
        assert!(cms.post_by_slug("missing").await.unwrap().is_none());
    }

    #[test]
    fn test_find_post_by_slug_normalises_input() {
        let posts: Vec<Post> = serde_json::from_value(json!([post("a", "How to Make Money Online")])).unwrap();
        assert!(find_post_by_slug(&posts, "  How-To-Make-Money-Online ").is_some());
        assert!(find_post_by_slug(&posts, "").is_none());
    }

    #[test]
    fn test_new_requires_service() {
        assert!(matches!(
            CmsClient::new("", "key", Duration::from_secs(1)),
            Err(CmsError::NotConfigured(_))
        ));
    }
}
