//! The starter catalog. Seeded into a fresh database, and served when the
//! datastore cannot be read so listing pages still render.

use hustle_types::models::Website;

struct Entry {
    s_no: i64,
    name: &'static str,
    url: &'static str,
    sign_up_bonus: &'static str,
    payout_methods: &'static str,
    minimum_withdrawal: &'static str,
    note: &'static str,
    hourly: &'static str,
    monthly: &'static str,
    countries: &'static str,
    frequency: &'static str,
    kind: &'static str,
    expert_review: &'static str,
    expert_rating: &'static str,
    expert_tips: &'static str,
    ways_to_earn: &'static str,
    about: &'static str,
}

const ENTRIES: &[Entry] = &[
    Entry {
        s_no: 1,
        name: "PollPay",
        url: "https://pollpay.com",
        sign_up_bonus: "$0.25",
        payout_methods: "PayPal Cash, Gift Cards",
        minimum_withdrawal: "$25",
        note: "Legitimate platform for surveys, app trials, and micro-tasks with wide availability",
        hourly: "$3",
        monthly: "$300",
        countries: "Global",
        frequency: "5-7 Days",
        kind: "Survey Sites",
        expert_review: "PollPay is a legitimate platform that pays users for surveys, app trials, games and other \"micro-tasks.\" Its major pros are wide availability and multiple payout options (PayPal, gift cards). Major cons include a relatively high $25 USD payout threshold, occasional low-paying \"game\" tasks (often $0.01/minute at higher levels), and support issues prior to the Prodege acquisition. Earnings are modest; better as a supplemental side income than a primary source.",
        expert_rating: "4.9",
        expert_tips: "Complete the initial profiling survey immediately to unlock higher-value surveys. Focus on surveys with longer durations (best pay ratio) and avoid low-pay \"game\" tasks once past the initial easy tiers. Use referral code to earn 15% commission on referrals' earnings (provided by PollPay, not deducted from their balance). If possible, switch PayPal currency to EUR (threshold €15) if you live in Europe to redeem faster. Check the \"Offers\" tab daily for new app-trial or promo tasks that often pay $0.50-$2 each",
        ways_to_earn: "Surveys, App Trials, Games, Micro-tasks",
        about: "PollPay offers multiple ways to earn money online through surveys, app testing, and various micro-tasks. The platform is owned by Prodege and provides reliable payouts.",
    },
    Entry {
        s_no: 2,
        name: "CashApp Surveys",
        url: "https://cashappsurveys.com",
        sign_up_bonus: "$1.00",
        payout_methods: "PayPal, Bank Transfer",
        minimum_withdrawal: "$10",
        note: "Quick and easy survey platform with instant cash rewards",
        hourly: "$4",
        monthly: "$240",
        countries: "US, UK, Canada",
        frequency: "1-3 Days",
        kind: "Survey Sites",
        expert_review: "CashApp Surveys offers a streamlined experience for users looking to earn through market research participation. The platform's lower payout threshold and faster processing times make it attractive for beginners.",
        expert_rating: "4.7",
        expert_tips: "Complete your profile thoroughly for better survey matching. Check for new surveys multiple times per day. Focus on demographic-specific surveys for higher payouts",
        ways_to_earn: "Surveys, Market Research, Product Testing",
        about: "CashApp Surveys connects users with market research opportunities and provides quick payouts through popular payment apps.",
    },
    Entry {
        s_no: 3,
        name: "FreelanceHub",
        url: "https://freelancehub.com",
        sign_up_bonus: "$0",
        payout_methods: "PayPal, Stripe, Bank Transfer",
        minimum_withdrawal: "$20",
        note: "Professional freelancing platform connecting skilled workers with high-quality projects",
        hourly: "$25",
        monthly: "$1500",
        countries: "Global",
        frequency: "2-5 Days",
        kind: "Freelancing",
        expert_review: "FreelanceHub stands out in the crowded freelancing space with its focus on quality over quantity. The platform vets both clients and freelancers, resulting in better project matches and fair compensation.",
        expert_rating: "4.8",
        expert_tips: "Build a strong portfolio before applying. Focus on long-term client relationships. Specialize in high-demand skills",
        ways_to_earn: "Web Development, Graphic Design, Writing, Digital Marketing",
        about: "FreelanceHub is a premium freelancing platform that connects skilled professionals with high-quality projects and clients.",
    },
];

pub fn sample_websites() -> Vec<Website> {
    ENTRIES
        .iter()
        .map(|e| Website {
            id: Some(e.s_no.to_string()),
            s_no: e.s_no,
            website_name: Some(e.name.into()),
            url: Some(e.url.into()),
            sign_up_bonus: Some(e.sign_up_bonus.into()),
            payout_methods: Some(e.payout_methods.into()),
            minimum_withdrawal: Some(e.minimum_withdrawal.into()),
            note_earning_potential: Some(e.note.into()),
            earning_potential_in_1hr: Some(e.hourly.into()),
            earning_potential_in_a_month: Some(e.monthly.into()),
            countries_supported: Some(e.countries.into()),
            payout_frequency: Some(e.frequency.into()),
            video: None,
            kind: Some(e.kind.into()),
            expert_review: Some(e.expert_review.into()),
            expert_rating: Some(e.expert_rating.into()),
            expert_tips: Some(e.expert_tips.into()),
            is_it_legit: Some("true".into()),
            ways_to_earn: Some(e.ways_to_earn.into()),
            about: Some(e.about.into()),
            ..Default::default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortOption;

    #[test]
    fn test_sample_catalog() {
        let sites = sample_websites();
        assert_eq!(sites.len(), 3);
        assert!(sites.windows(2).all(|w| w[0].s_no < w[1].s_no));
        assert!(sites.iter().all(|s| !s.is_verified && s.verified_owner.is_none()));
    }

    #[test]
    fn test_sample_sorts_by_withdrawal() {
        let mut sites = sample_websites();
        SortOption::WithdrawalLowToHigh.apply(&mut sites);
        let order: Vec<i64> = sites.iter().map(|s| s.s_no).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }
}
