use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use hustle_types::blog::PostList;

/// Pages held at once. Offsets come from clients, so the key space is open.
const MAX_PAGES: usize = 64;

/// Listing pages keyed by (offset, limit), each kept for a fixed time or
/// until the revalidation webhook clears them.
pub struct BlogCache {
    ttl: Duration,
    pages: RwLock<HashMap<(u64, u64), (Instant, PostList)>>,
}

impl BlogCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            pages: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, offset: u64, limit: u64) -> Option<PostList> {
        let pages = self.pages.read().await;
        pages
            .get(&(offset, limit))
            .filter(|(stored, _)| stored.elapsed() < self.ttl)
            .map(|(_, list)| list.clone())
    }

    /// Expired pages are dropped first. When the cache is still full the
    /// oldest page makes room.
    pub async fn put(&self, offset: u64, limit: u64, list: PostList) {
        let mut pages = self.pages.write().await;
        pages.retain(|_, (stored, _)| stored.elapsed() < self.ttl);
        if pages.len() >= MAX_PAGES && !pages.contains_key(&(offset, limit)) {
            let oldest = pages
                .iter()
                .min_by_key(|(_, (stored, _))| *stored)
                .map(|(key, _)| *key);
            if let Some(key) = oldest {
                pages.remove(&key);
            }
        }
        pages.insert((offset, limit), (Instant::now(), list));
    }

    /// Drop every cached page. Returns how many were held.
    pub async fn clear(&self) -> usize {
        let mut pages = self.pages.write().await;
        let n = pages.len();
        pages.clear();
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> PostList {
        PostList {
            contents: vec![],
            total_count: 0,
            offset: 0,
            limit: 6,
        }
    }

    #[tokio::test]
    async fn test_put_get_clear() {
        let cache = BlogCache::new(Duration::from_secs(60));
        assert!(cache.get(0, 6).await.is_none());

        cache.put(0, 6, list()).await;
        assert!(cache.get(0, 6).await.is_some());
        assert!(cache.get(6, 6).await.is_none());

        assert_eq!(cache.clear().await, 1);
        assert!(cache.get(0, 6).await.is_none());
    }

    #[tokio::test]
    async fn test_expired_entries_are_misses() {
        let cache = BlogCache::new(Duration::ZERO);
        cache.put(0, 6, list()).await;
        assert!(cache.get(0, 6).await.is_none());
    }

    #[tokio::test]
    async fn test_put_reclaims_expired_pages() {
        let cache = BlogCache::new(Duration::ZERO);
        for offset in 0..500 {
            cache.put(offset, 6, list()).await;
        }
        // only the page just written survives
        assert_eq!(cache.clear().await, 1);
    }

    #[tokio::test]
    async fn test_put_caps_live_pages() {
        let cache = BlogCache::new(Duration::from_secs(60));
        for offset in 0..(MAX_PAGES as u64 * 4) {
            cache.put(offset, 6, list()).await;
        }
        assert!(cache.get(MAX_PAGES as u64 * 4 - 1, 6).await.is_some());
        assert_eq!(cache.clear().await, MAX_PAGES);
    }
}
