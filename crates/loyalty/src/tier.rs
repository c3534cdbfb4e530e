//! Points → tier mapping and progress toward the next tier.

use brew_core::error::{BrewError, BrewResult};
use brew_core::loyalty::{LoyaltyTier, NextTier, TierInfo};

/// Highest tier whose threshold `points` has reached.
pub fn tier_for_points(points: u32) -> LoyaltyTier {
    LoyaltyTier::ALL
        .into_iter()
        .rev()
        .find(|tier| points >= tier.threshold())
        .unwrap_or_default()
}

pub fn compute_tier(points: u32) -> TierInfo {
    let tier = tier_for_points(points);
    match tier.next() {
        Some(next) => {
            let threshold = next.threshold();
            TierInfo {
                points,
                tier,
                next_tier: NextTier::Tier(next),
                points_to_next_tier: threshold - points,
                progress_percentage: 100.0 * points as f64 / threshold as f64,
            }
        }
        None => TierInfo {
            points,
            tier,
            next_tier: NextTier::Max,
            points_to_next_tier: 0,
            progress_percentage: 100.0,
        },
    }
}

/// [`compute_tier`] for raw integers read at a boundary. Negative or oversized
/// balances are rejected rather than clamped.
pub fn compute_tier_checked(points: i64) -> BrewResult<TierInfo> {
    if points < 0 {
        return Err(BrewError::InvalidArgument(format!(
            "loyalty points must be non-negative, got {}",
            points
        )));
    }
    let points = u32::try_from(points).map_err(|_| {
        BrewError::InvalidArgument(format!("loyalty points out of range: {}", points))
    })?;
    Ok(compute_tier(points))
}
