use serde::{Deserialize, Serialize};

use hustle_types::models::Website;

use crate::matching::{self, SIDEBAR_PAYOUT_METHODS, SIDEBAR_WAYS_TO_EARN};
use crate::parse;

/// Sidebar filter state. Every active criterion must hold for a website to
/// stay in the list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Minimum expert rating, as typed ("4", "4.5"). Blank is inactive.
    pub expert_rating: String,
    /// Minimum hourly earning, as typed. Blank is inactive.
    pub earning_potential: String,
    /// The website must offer every one of these.
    pub ways_to_earn: Vec<String>,
    /// The website must pay out through every one of these.
    pub payout_methods: Vec<String>,
    /// Keep only websites that need an upfront investment.
    pub investment_required: bool,
}

impl FilterCriteria {
    pub fn is_active(&self) -> bool {
        !self.expert_rating.is_empty()
            || !self.earning_potential.is_empty()
            || !self.ways_to_earn.is_empty()
            || !self.payout_methods.is_empty()
            || self.investment_required
    }

    pub fn matches(&self, site: &Website) -> bool {
        if !self.expert_rating.is_empty() {
            // an unreadable threshold admits nothing
            let Some(min) = parse::threshold(&self.expert_rating) else {
                return false;
            };
            if parse::expert_rating(site.expert_rating.as_deref()) < min {
                return false;
            }
        }

        if !self.earning_potential.is_empty() {
            let Some(min) = parse::threshold(&self.earning_potential) else {
                return false;
            };
            if parse::amount(site.earning_potential_in_1hr.as_deref()) < min {
                return false;
            }
        }

        if !self.ways_to_earn.is_empty() {
            let offered = matching::split_list(site.ways_to_earn.as_deref());
            if !self
                .ways_to_earn
                .iter()
                .all(|way| matching::list_contains(&offered, way, SIDEBAR_WAYS_TO_EARN))
            {
                return false;
            }
        }

        if !self.payout_methods.is_empty() {
            let offered = matching::split_list(site.payout_methods.as_deref());
            if !self
                .payout_methods
                .iter()
                .all(|method| matching::list_contains(&offered, method, SIDEBAR_PAYOUT_METHODS))
            {
                return false;
            }
        }

        if self.investment_required && site.investment.as_deref().unwrap_or("No") != "Yes" {
            return false;
        }

        true
    }

    /// Keep the websites that satisfy every active criterion, in order.
    pub fn apply(&self, sites: Vec<Website>) -> Vec<Website> {
        if !self.is_active() {
            return sites;
        }
        sites.into_iter().filter(|site| self.matches(site)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(name: &str, ways: &str, payouts: &str, rating: &str, hourly: &str) -> Website {
        Website {
            website_name: Some(name.to_string()),
            ways_to_earn: Some(ways.to_string()),
            payout_methods: Some(payouts.to_string()),
            expert_rating: Some(rating.to_string()),
            earning_potential_in_1hr: Some(hourly.to_string()),
            ..Default::default()
        }
    }

    fn names(sites: &[Website]) -> Vec<&str> {
        sites.iter().map(|s| s.display_name()).collect()
    }

    fn catalog() -> Vec<Website> {
        vec![
            site("Both", "Surveys, Games", "PayPal", "4.9", "$3"),
            site("SurveysOnly", "Surveys", "PayPal Cash, Gift Cards", "4.2 out of 5", "$10"),
            site("GamesOnly", "Gaming", "Check", "N/A", ""),
        ]
    }

    #[test]
    fn test_inactive_keeps_everything() {
        let criteria = FilterCriteria::default();
        assert!(!criteria.is_active());
        assert_eq!(criteria.apply(catalog()).len(), 3);
    }

    #[test]
    fn test_ways_to_earn_requires_all_selected() {
        let criteria = FilterCriteria {
            ways_to_earn: vec!["Taking Surveys".into(), "Playing Games".into()],
            ..Default::default()
        };
        assert_eq!(names(&criteria.apply(catalog())), vec!["Both"]);
    }

    #[test]
    fn test_payout_methods_requires_all_selected() {
        let criteria = FilterCriteria {
            payout_methods: vec!["PayPal".into(), "Gift Cards".into()],
            ..Default::default()
        };
        assert_eq!(names(&criteria.apply(catalog())), vec!["SurveysOnly"]);
    }

    #[test]
    fn test_minimum_rating_and_earning() {
        let criteria = FilterCriteria {
            expert_rating: "4.5".into(),
            ..Default::default()
        };
        assert_eq!(names(&criteria.apply(catalog())), vec!["Both"]);

        let criteria = FilterCriteria {
            earning_potential: "5".into(),
            ..Default::default()
        };
        assert_eq!(names(&criteria.apply(catalog())), vec!["SurveysOnly"]);
    }

    #[test]
    fn test_unreadable_threshold_matches_nothing() {
        let criteria = FilterCriteria {
            expert_rating: "high".into(),
            ..Default::default()
        };
        assert!(criteria.is_active());
        assert!(criteria.apply(catalog()).is_empty());
    }

    #[test]
    fn test_investment_required() {
        let mut sites = catalog();
        sites[2].investment = Some("Yes".into());
        sites[1].investment = Some("yes".into());

        let criteria = FilterCriteria {
            investment_required: true,
            ..Default::default()
        };
        assert_eq!(names(&criteria.apply(sites)), vec!["GamesOnly"]);
    }

    #[test]
    fn test_criteria_combine() {
        let criteria = FilterCriteria {
            ways_to_earn: vec!["Taking Surveys".into()],
            expert_rating: "4.5".into(),
            ..Default::default()
        };
        assert_eq!(names(&criteria.apply(catalog())), vec!["Both"]);
    }
}
