use std::fmt::Write;

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::warn;

use hustle_catalog::text::{review_slug, slugify};
use hustle_types::blog::Post;
use hustle_types::models::Website;

use crate::state::AppState;
use crate::websites::load_catalog;

/// (path, change frequency, priority)
const STATIC_PAGES: &[(&str, &str, &str)] = &[
    ("", "daily", "1.0"),
    ("/reviews", "daily", "0.9"),
    ("/best", "weekly", "0.8"),
    ("/blog", "daily", "0.7"),
    ("/privacy", "monthly", "0.3"),
    ("/terms", "monthly", "0.3"),
    ("/auth/login", "monthly", "0.4"),
    ("/auth/signup", "monthly", "0.4"),
];

pub async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let sites = load_catalog(&state).await;

    let posts = match state.cms() {
        Ok(cms) => cms.all_posts().await.unwrap_or_else(|e| {
            warn!("Blog posts left out of sitemap: {}", e);
            Vec::new()
        }),
        Err(_) => Vec::new(),
    };

    let xml = render(&state.config.base_url, &sites, &posts, Utc::now());
    ([(header::CONTENT_TYPE, "application/xml")], xml)
}

pub fn render(base_url: &str, sites: &[Website], posts: &[Post], now: DateTime<Utc>) -> String {
    let base = base_url.trim_end_matches('/');
    let now = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for (path, freq, priority) in STATIC_PAGES {
        push_url(&mut xml, &format!("{base}{path}"), &now, freq, priority);
    }

    for site in sites {
        let Some(name) = site.website_name.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };
        let loc = format!("{base}/reviews/{}", review_slug(name));
        push_url(&mut xml, &loc, &now, "weekly", "0.8");
    }

    for post in posts {
        let lastmod = post
            .published_at
            .as_deref()
            .or(post.updated_at.as_deref())
            .unwrap_or(&now);
        // posts are served by slugified title
        let slug = slugify(&post.title);
        if slug.is_empty() {
            continue;
        }
        push_url(&mut xml, &format!("{base}/blog/{slug}"), lastmod, "weekly", "0.6");
    }

    xml.push_str("</urlset>\n");
    xml
}

fn push_url(xml: &mut String, loc: &str, lastmod: &str, freq: &str, priority: &str) {
    // writing to a String cannot fail
    let _ = write!(
        xml,
        "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
        escape(loc),
        escape(lastmod),
        freq,
        priority
    );
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
