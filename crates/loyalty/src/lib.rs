//! Loyalty program: tier assignment, reward rules and birthday gift eligibility.
//!
//! Everything here is a pure function of its inputs. "Today" is always passed in.

pub mod birthday;
pub mod engine;
pub mod rewards;
pub mod tier;

pub use birthday::birthday_status;
pub use engine::LoyaltyEngine;
pub use rewards::{reward_description, reward_rule, RewardRule, REWARD_RULES};
pub use tier::{compute_tier, compute_tier_checked, tier_for_points};
