use hustle_catalog::text::review_slug;

/// Public site the badge links back to.
pub const PUBLIC_ORIGIN: &str = "https://hustleworthy.com";

/// Slug path segment for a website, percent-encoded the way browsers encode
/// a URI component. A missing name falls back to "website".
pub fn review_path_segment(website_name: Option<&str>) -> String {
    let slug = website_name
        .filter(|name| !name.is_empty())
        .map(review_slug)
        .unwrap_or_else(|| "website".to_string());
    encode_uri_component(&slug)
}

pub fn review_url(website_name: Option<&str>) -> String {
    format!("{PUBLIC_ORIGIN}/reviews/{}", review_path_segment(website_name))
}

/// The badge snippet a claimant must publish verbatim.
pub fn embed_code(website_name: Option<&str>) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="nofollow"><img width="300" src="{PUBLIC_ORIGIN}/images/featuredon.png"></a>"#,
        review_url(website_name)
    )
}

/// Literal substring check. Whitespace, attribute order and quoting must
/// match exactly.
pub fn contains_embed(html: &str, website_name: Option<&str>) -> bool {
    html.contains(&embed_code(website_name))
}

fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_code_for_acme_corp() {
        assert_eq!(
            embed_code(Some("Acme Corp")),
            r#"<a href="https://hustleworthy.com/reviews/acme-corp" target="_blank" rel="nofollow"><img width="300" src="https://hustleworthy.com/images/featuredon.png"></a>"#
        );
    }

    #[test]
    fn test_round_trip_exact_page() {
        let code = embed_code(Some("Acme Corp"));
        let page = format!("<html><body><footer>{code}</footer></body></html>");
        assert!(contains_embed(&page, Some("Acme Corp")));
    }

    #[test]
    fn test_round_trip_rejects_variations() {
        let code = embed_code(Some("Acme Corp"));

        let extra_space = code.replace("<a href", "<a  href");
        assert!(!contains_embed(&extra_space, Some("Acme Corp")));

        let reordered = code.replace(
            r#"target="_blank" rel="nofollow""#,
            r#"rel="nofollow" target="_blank""#,
        );
        assert!(!contains_embed(&reordered, Some("Acme Corp")));

        let single_quotes = code.replace('"', "'");
        assert!(!contains_embed(&single_quotes, Some("Acme Corp")));
    }

    #[test]
    fn test_missing_name_falls_back() {
        assert_eq!(review_url(None), "https://hustleworthy.com/reviews/website");
        assert_eq!(review_url(Some("")), "https://hustleworthy.com/reviews/website");
    }

    #[test]
    fn test_path_segment_is_encoded() {
        assert_eq!(review_path_segment(Some("Cash & Go")), "cash-%26-go");
        assert_eq!(review_path_segment(Some("Café")), "caf%C3%A9");
    }
}
