//! Read-only client for the headless CMS that hosts the blog.

pub mod cache;
pub mod client;

pub use cache::BlogCache;
pub use client::{BLOG_ENDPOINT, CmsClient, CmsError, Queries, find_post_by_slug};
