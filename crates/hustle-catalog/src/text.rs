use std::sync::LazyLock;

use regex::Regex;

static NOT_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").unwrap());
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_-]+").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static EMAIL_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^@\s]+)@[^@\s]+\.[^@\s]+$").unwrap());

/// URL slug for a blog title: "How to Make Money Online" becomes
/// "how-to-make-money-online". Punctuation and non-ASCII letters are dropped,
/// not folded.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let cleaned = NOT_SLUG.replace_all(lower.trim(), "");
    let dashed = SEPARATORS.replace_all(&cleaned, "-");
    dashed.trim_matches('-').to_string()
}

/// Slug used in review page URLs: lowercased, whitespace runs become `-`.
pub fn review_slug(website_name: &str) -> String {
    WHITESPACE
        .replace_all(&website_name.to_lowercase(), "-")
        .into_owned()
}

/// Names that look like an email address display only the part before `@`.
pub fn display_name(name: &str) -> &str {
    match EMAIL_LIKE.captures(name).and_then(|c| c.get(1)) {
        Some(local) => local.as_str(),
        None => name,
    }
}
