//! Static per-tier benefit table.

use brew_core::loyalty::LoyaltyTier;
use serde::Serialize;

/// Benefits attached to one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RewardRule {
    pub tier: LoyaltyTier,
    pub min_points: u32,
    pub cashback_percentage: u32,
    /// A free coffee is given every n-th visit.
    pub free_coffee_every: u32,
    pub birthday_perk: &'static str,
    pub priority_service: bool,
    pub exclusive_events: bool,
}

pub static REWARD_RULES: [RewardRule; 4] = [
    RewardRule {
        tier: LoyaltyTier::Bronze,
        min_points: 0,
        cashback_percentage: 1,
        free_coffee_every: 10,
        birthday_perk: "Birthday reward",
        priority_service: false,
        exclusive_events: false,
    },
    RewardRule {
        tier: LoyaltyTier::Silver,
        min_points: 100,
        cashback_percentage: 2,
        free_coffee_every: 8,
        birthday_perk: "Birthday reward + friend discount",
        priority_service: false,
        exclusive_events: false,
    },
    RewardRule {
        tier: LoyaltyTier::Gold,
        min_points: 300,
        cashback_percentage: 3,
        free_coffee_every: 5,
        birthday_perk: "Premium birthday package",
        priority_service: true,
        exclusive_events: false,
    },
    RewardRule {
        tier: LoyaltyTier::Platinum,
        min_points: 500,
        cashback_percentage: 5,
        free_coffee_every: 3,
        birthday_perk: "Premium birthday package",
        priority_service: true,
        exclusive_events: true,
    },
];

pub fn reward_rule(tier: LoyaltyTier) -> &'static RewardRule {
    match tier {
        LoyaltyTier::Bronze => &REWARD_RULES[0],
        LoyaltyTier::Silver => &REWARD_RULES[1],
        LoyaltyTier::Gold => &REWARD_RULES[2],
        LoyaltyTier::Platinum => &REWARD_RULES[3],
    }
}

/// Benefit lines shown for a tier, in display order.
pub fn reward_description(tier: LoyaltyTier) -> Vec<String> {
    let rule = reward_rule(tier);
    let mut lines = vec![
        format!("{}% cashback on all purchases", rule.cashback_percentage),
        format!("Free coffee every {} visit", ordinal(rule.free_coffee_every)),
        rule.birthday_perk.to_string(),
    ];
    if rule.priority_service {
        lines.push("Priority service".to_string());
    }
    if rule.exclusive_events {
        lines.push("Exclusive tasting events".to_string());
    }
    lines
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_tier_thresholds() {
        for tier in LoyaltyTier::ALL {
            let rule = reward_rule(tier);
            assert_eq!(rule.tier, tier);
            assert_eq!(rule.min_points, tier.threshold());
            assert_eq!(rule.cashback_percentage, tier.cashback_percentage());
        }
    }

    #[test]
    fn test_visit_cadence_shortens() {
        for pair in REWARD_RULES.windows(2) {
            assert!(pair[1].free_coffee_every < pair[0].free_coffee_every);
        }
    }

    #[test]
    fn test_bronze_description() {
        assert_eq!(
            reward_description(LoyaltyTier::Bronze),
            vec![
                "1% cashback on all purchases",
                "Free coffee every 10th visit",
                "Birthday reward",
            ]
        );
    }

    #[test]
    fn test_priority_service_unlocks_at_gold() {
        assert!(!reward_description(LoyaltyTier::Silver).contains(&"Priority service".to_string()));
        let gold = reward_description(LoyaltyTier::Gold);
        assert!(gold.contains(&"Priority service".to_string()));
        assert!(gold.contains(&"Free coffee every 5th visit".to_string()));
        assert!(!gold.contains(&"Exclusive tasting events".to_string()));
    }

    #[test]
    fn test_platinum_has_everything() {
        let lines = reward_description(LoyaltyTier::Platinum);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "Free coffee every 3rd visit");
        assert_eq!(lines[4], "Exclusive tasting events");
    }

    #[test]
    fn test_higher_tiers_never_lose_benefit_kinds() {
        for pair in LoyaltyTier::ALL.windows(2) {
            let lower = reward_description(pair[0]).len();
            let higher = reward_description(pair[1]).len();
            assert!(higher >= lower);
        }
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(8), "8th");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(22), "22nd");
    }
}
