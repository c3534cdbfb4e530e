//! Loyalty engine: combines tier, reward and birthday computations for a customer.

use crate::birthday::birthday_status;
use crate::rewards::reward_description;
use crate::tier::compute_tier;
use brew_core::config::LoyaltyConfig;
use brew_core::loyalty::{BirthdayInfo, BirthdayStatus, LoyaltySummary, TierInfo};
use brew_core::types::Customer;
use chrono::NaiveDate;
use tracing::{debug, info};

/// Loyalty program engine — stateless computation over customer records.
pub struct LoyaltyEngine {
    config: LoyaltyConfig,
}

impl LoyaltyEngine {
    pub fn new(config: &LoyaltyConfig) -> Self {
        info!(enabled = config.enabled, "Loyalty engine initialized");
        Self {
            config: config.clone(),
        }
    }

    pub fn tier_info(&self, points: u32) -> TierInfo {
        metrics::counter!("loyalty.tier_computed").increment(1);
        compute_tier(points)
    }

    /// Full loyalty view for one customer as of `today`. Tier and cashback are
    /// recomputed from the points balance every time.
    pub fn customer_loyalty(&self, customer: &Customer, today: NaiveDate) -> LoyaltySummary {
        let tier_info = self.tier_info(customer.loyalty_points);
        let birthday = birthday_status(customer.birthday_month_day(), today);

        debug!(
            customer_id = customer.id,
            points = customer.loyalty_points,
            tier = %tier_info.tier,
            gift_eligible = birthday.is_eligible_for_gift(),
            "Loyalty summary computed"
        );

        LoyaltySummary {
            customer_id: customer.id,
            cashback_percentage: tier_info.tier.cashback_percentage(),
            benefits: reward_description(tier_info.tier),
            tier_info,
            birthday,
            payment_methods: customer.payment_methods.clone(),
        }
    }

    /// Customers whose birthday falls inside the gift window, soonest first.
    pub fn upcoming_birthdays<'a, I>(
        &self,
        customers: I,
        today: NaiveDate,
    ) -> Vec<(i64, BirthdayInfo)>
    where
        I: IntoIterator<Item = &'a Customer>,
    {
        let mut upcoming: Vec<(i64, BirthdayInfo)> = customers
            .into_iter()
            .filter_map(|c| match birthday_status(c.birthday_month_day(), today) {
                BirthdayStatus::Upcoming(info) if info.is_eligible_for_gift => Some((c.id, info)),
                _ => None,
            })
            .collect();
        upcoming.sort_by_key(|(id, info)| (info.days_until, *id));
        upcoming
    }

    pub fn config(&self) -> &LoyaltyConfig {
        &self.config
    }
}
