//! Three-tier matching of a wanted category against a website's
//! comma-separated list.
//!
//! An item of the list matches the wanted value when
//! 1. it equals the value exactly (both lowercased), else
//! 2. the value has a synonym entry and the item contains any synonym, else
//! 3. the value is longer than three characters and the item contains it.
//!
//! Tier 2 replaces tier 3 when an entry exists: a value listed in a table
//! never falls back to a plain substring test.

/// Lowercased wanted value mapped to the substrings that count as it.
#[derive(Debug, Clone, Copy)]
pub struct SynonymTable(&'static [(&'static str, &'static [&'static str])]);

impl SynonymTable {
    pub fn get(&self, wanted: &str) -> Option<&'static [&'static str]> {
        self.0
            .iter()
            .find(|(key, _)| *key == wanted)
            .map(|(_, synonyms)| *synonyms)
    }
}

/// Ways to earn as chosen in the filter sidebar.
pub const SIDEBAR_WAYS_TO_EARN: SynonymTable = SynonymTable(&[
    ("watching videos", &["watching videos", "videos", "video watching"]),
    ("playing games", &["playing games", "games", "gaming"]),
    ("taking surveys", &["taking surveys", "surveys", "survey"]),
    ("doing data entry", &["doing data entry", "data entry"]),
    ("installing apps", &["installing apps", "app install", "app trials"]),
    ("doing tasks", &["doing tasks", "tasks", "micro-tasks"]),
    ("watching ads", &["watching ads", "ads", "ad viewing"]),
    ("writing reviews", &["writing reviews", "reviews"]),
    ("answering questions", &["answering questions", "questions"]),
    ("listening to music", &["listening to music", "music"]),
    ("shopping online", &["shopping online", "shopping", "online shopping"]),
]);

/// Payout methods as chosen in the filter sidebar.
pub const SIDEBAR_PAYOUT_METHODS: SynonymTable = SynonymTable(&[
    ("paypal", &["paypal cash", "paypal"]),
    ("gift cards", &["gift cards", "giftcards"]),
    ("amazon gift card", &["amazon gift card", "amazon gift cards"]),
    ("visa prepaid card", &["visa prepaid card", "visa prepaid"]),
    ("mastercard prepaid card", &["mastercard prepaid card", "mastercard prepaid"]),
    ("bank transfer", &["bank transfer", "direct deposit", "wire transfer"]),
    ("check", &["check", "cheque"]),
    ("cryptocurrency", &["crypto", "cryptocurrency", "bitcoin", "ethereum", "litecoin"]),
]);

/// Payout methods as targeted by a payout-method category page. Broader
/// than the sidebar table.
pub const CATEGORY_PAYOUT_METHODS: SynonymTable = SynonymTable(&[
    ("paypal", &["paypal", "paypal cash"]),
    ("bank transfer", &["bank transfer", "bank", "wire transfer", "direct deposit", "ach"]),
    ("check", &["check", "cheque", "paper check"]),
    ("payoneer", &["payoneer", "payoneer card"]),
    ("skrill", &["skrill", "skrill wallet"]),
    ("wise", &["wise", "transferwise", "wise transfer"]),
    ("revolut", &["revolut", "revolut card"]),
    ("venmo", &["venmo"]),
    ("zelle", &["zelle"]),
    ("papara", &["papara"]),
    ("qiwi", &["qiwi", "qiwi wallet"]),
    ("yoomoney", &["yoomoney", "yandex.money", "yandex money"]),
    ("gift cards", &["gift cards", "gift card", "vouchers", "rewards"]),
    ("amazon gift card", &["amazon gift card", "amazon", "amazon voucher"]),
    ("visa prepaid card", &["visa prepaid", "visa card", "prepaid visa"]),
    ("mastercard prepaid card", &["mastercard prepaid", "mastercard", "prepaid mastercard"]),
    ("cryptocurrency", &["cryptocurrency", "crypto", "digital currency"]),
    ("bitcoin", &["bitcoin", "btc"]),
    ("ethereum", &["ethereum", "eth"]),
    ("litecoin", &["litecoin", "ltc"]),
]);

/// Ways-to-earn category pages carry no synonyms of their own.
pub const NO_SYNONYMS: SynonymTable = SynonymTable(&[]);

/// Split a comma-separated field into trimmed, lowercased items. A missing
/// field yields a single empty item, which matches nothing.
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or("")
        .split(',')
        .map(|item| item.trim().to_lowercase())
        .collect()
}

/// Whether one list item counts as `wanted` (already lowercased).
pub fn item_matches(item: &str, wanted: &str, table: SynonymTable) -> bool {
    if item == wanted {
        return true;
    }
    if let Some(synonyms) = table.get(wanted) {
        return synonyms.iter().any(|s| item.contains(s));
    }
    wanted.chars().count() > 3 && item.contains(wanted)
}

/// Whether any item in `items` counts as `wanted`.
pub fn list_contains(items: &[String], wanted: &str, table: SynonymTable) -> bool {
    let wanted = wanted.to_lowercase();
    items.iter().any(|item| item_matches(item, &wanted, table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(Some("PayPal Cash, Gift Cards")), vec!["paypal cash", "gift cards"]);
        assert_eq!(split_list(None), vec![""]);
    }

    #[test]
    fn test_exact_match() {
        assert!(item_matches("venmo", "venmo", NO_SYNONYMS));
        assert!(item_matches("ach", "ach", NO_SYNONYMS));
    }

    #[test]
    fn test_synonym_match() {
        let items = split_list(Some("Surveys, App Trials"));
        assert!(list_contains(&items, "Taking Surveys", SIDEBAR_WAYS_TO_EARN));
        assert!(list_contains(&items, "Installing Apps", SIDEBAR_WAYS_TO_EARN));
        assert!(!list_contains(&items, "Playing Games", SIDEBAR_WAYS_TO_EARN));
    }

    #[test]
    fn test_synonym_entry_disables_plain_substring() {
        // "gift cards" has an entry; "gift card" is not among its synonyms
        let items = split_list(Some("Gift Card"));
        assert!(!list_contains(&items, "Gift Cards", SIDEBAR_PAYOUT_METHODS));
        assert!(list_contains(&items, "Gift Cards", CATEGORY_PAYOUT_METHODS));
    }

    #[test]
    fn test_substring_only_for_long_values() {
        let items = split_list(Some("Stripe Payouts, Web Development"));
        assert!(list_contains(&items, "stripe", SIDEBAR_PAYOUT_METHODS));
        assert!(!list_contains(&items, "web", NO_SYNONYMS));
        assert!(list_contains(&items, "development", NO_SYNONYMS));
    }

    #[test]
    fn test_category_table_is_broader() {
        let items = split_list(Some("Bank"));
        assert!(list_contains(&items, "Bank Transfer", CATEGORY_PAYOUT_METHODS));
        assert!(!list_contains(&items, "Bank Transfer", SIDEBAR_PAYOUT_METHODS));
    }
}
