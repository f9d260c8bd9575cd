//! Category landing pages: one payout method or one way to earn.
//!
//! Unlike the sidebar, a category page targets a single value and keeps a
//! website when any item of its list matches that value.

use hustle_types::api::CategorySummary;
use hustle_types::models::Website;

use crate::matching::{self, CATEGORY_PAYOUT_METHODS, NO_SYNONYMS, SynonymTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    PayoutMethod,
    WayToEarn,
}

/// (slug, display name)
const PAYOUT_METHODS: &[(&str, &str)] = &[
    ("paypal", "PayPal"),
    ("bank-transfer", "Bank Transfer"),
    ("check", "Check"),
    ("payoneer", "Payoneer"),
    ("skrill", "Skrill"),
    ("wise", "Wise"),
    ("revolut", "Revolut"),
    ("venmo", "Venmo"),
    ("zelle", "Zelle"),
    ("papara", "Papara"),
    ("qiwi", "QIWI"),
    ("yoomoney", "YooMoney"),
    ("gift-cards", "Gift Cards"),
    ("amazon-gift-card", "Amazon Gift Card"),
    ("visa-prepaid-card", "Visa Prepaid Card"),
    ("mastercard-prepaid-card", "MasterCard Prepaid Card"),
    ("cryptocurrency", "Cryptocurrency"),
    ("bitcoin", "Bitcoin"),
    ("ethereum", "Ethereum"),
    ("litecoin", "Litecoin"),
];

const WAYS_TO_EARN: &[(&str, &str)] = &[
    ("watching-videos", "Watching Videos"),
    ("taking-surveys", "Taking Surveys"),
    ("typing", "Typing"),
    ("testing", "Testing"),
    ("reading", "Reading"),
    ("doing-data-entry", "Doing Data Entry"),
    ("installing-apps", "Installing Apps"),
    ("referrals", "Referrals"),
    ("sharing-internet", "Sharing Internet"),
    ("doing-tasks", "Doing Tasks"),
    ("writing", "Writing"),
    ("watching-ads", "Watching Ads"),
    ("writing-reviews", "Writing Reviews"),
    ("answering-questions", "Answering Questions"),
    ("listening-to-music", "Listening to Music"),
    ("chatting", "Chatting"),
    ("shopping-online", "Shopping Online"),
    ("playing-games", "Playing Games"),
];

impl CategoryKind {
    fn entries(self) -> &'static [(&'static str, &'static str)] {
        match self {
            CategoryKind::PayoutMethod => PAYOUT_METHODS,
            CategoryKind::WayToEarn => WAYS_TO_EARN,
        }
    }

    fn table(self) -> SynonymTable {
        match self {
            CategoryKind::PayoutMethod => CATEGORY_PAYOUT_METHODS,
            CategoryKind::WayToEarn => NO_SYNONYMS,
        }
    }

    /// Display name for a known slug; `None` for anything else.
    pub fn display_name(self, slug: &str) -> Option<&'static str> {
        self.entries()
            .iter()
            .find(|(s, _)| *s == slug)
            .map(|(_, name)| *name)
    }

    pub fn slugs(self) -> impl Iterator<Item = &'static str> {
        self.entries().iter().map(|(slug, _)| *slug)
    }

    fn field(self, site: &Website) -> Option<&str> {
        match self {
            CategoryKind::PayoutMethod => site.payout_methods.as_deref(),
            CategoryKind::WayToEarn => site.ways_to_earn.as_deref(),
        }
    }

    /// Whether `site` belongs on the page for `target` (a display name).
    pub fn matches(self, site: &Website, target: &str) -> bool {
        let items = matching::split_list(self.field(site));
        matching::list_contains(&items, target, self.table())
    }

    pub fn filter(self, sites: Vec<Website>, target: &str) -> Vec<Website> {
        sites.into_iter().filter(|site| self.matches(site, target)).collect()
    }

    /// Every category of this kind with the number of websites it would list.
    pub fn summaries(self, sites: &[Website]) -> Vec<CategorySummary> {
        self.entries()
            .iter()
            .map(|(slug, name)| CategorySummary {
                slug: slug.to_string(),
                name: name.to_string(),
                count: sites.iter().filter(|site| self.matches(site, name)).count(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterCriteria;

    fn site(payouts: &str, ways: &str) -> Website {
        Website {
            payout_methods: Some(payouts.to_string()),
            ways_to_earn: Some(ways.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_catalogue_sizes_and_names() {
        assert_eq!(CategoryKind::PayoutMethod.slugs().count(), 20);
        assert_eq!(CategoryKind::WayToEarn.slugs().count(), 18);
        assert_eq!(CategoryKind::PayoutMethod.display_name("qiwi"), Some("QIWI"));
        assert_eq!(
            CategoryKind::WayToEarn.display_name("listening-to-music"),
            Some("Listening to Music")
        );
        assert_eq!(CategoryKind::PayoutMethod.display_name("cash"), None);
    }

    #[test]
    fn test_single_target_any_match() {
        let sites = vec![site("PayPal, Check", ""), site("Amazon Voucher", ""), site("Stripe", "")];
        let paypal = CategoryKind::PayoutMethod.filter(sites.clone(), "PayPal");
        assert_eq!(paypal.len(), 1);
        let amazon = CategoryKind::PayoutMethod.filter(sites, "Amazon Gift Card");
        assert_eq!(amazon.len(), 1);
    }

    #[test]
    fn test_category_page_and_sidebar_are_asymmetric() {
        let sites = vec![site("PayPal", ""), site("Check", "")];

        // a category page keeps every site paying through the one method
        assert_eq!(CategoryKind::PayoutMethod.filter(sites.clone(), "PayPal").len(), 1);

        // the sidebar intersects several choices
        let criteria = FilterCriteria {
            payout_methods: vec!["PayPal".into(), "Check".into()],
            ..Default::default()
        };
        assert!(criteria.apply(sites).is_empty());
    }

    #[test]
    fn test_ways_to_earn_category_uses_substring() {
        let s = site("", "Writing, Product Testing");
        assert!(CategoryKind::WayToEarn.matches(&s, "Testing"));
        assert!(CategoryKind::WayToEarn.matches(&s, "Writing"));
        assert!(!CategoryKind::WayToEarn.matches(&s, "Typing"));
    }

    #[test]
    fn test_summaries_count() {
        let sites = vec![site("PayPal Cash", ""), site("PayPal, Bitcoin", "")];
        let summaries = CategoryKind::PayoutMethod.summaries(&sites);
        let count = |slug: &str| summaries.iter().find(|s| s.slug == slug).map(|s| s.count);
        assert_eq!(count("paypal"), Some(2));
        assert_eq!(count("bitcoin"), Some(1));
        assert_eq!(count("venmo"), Some(0));
    }
}
