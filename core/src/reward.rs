//! Coin reward tiers.
//!
//! The reward scales with the number of completed tasks; the day's overall
//! completion rate only picks the multiplier tier.

// Tier thresholds (completion rate, percent)
const TIER_LOW: f64 = 30.0;
const TIER_MID: f64 = 60.0;
const TIER_HIGH: f64 = 90.0;

/// Coins earned for a day with the given completion rate (0..=100) and
/// completed-task count.
pub fn coins_for(completion_rate: f64, completed_count: usize) -> u32 {
    let multiplier = if completion_rate < TIER_LOW {
        1
    } else if completion_rate < TIER_MID {
        2
    } else if completion_rate < TIER_HIGH {
        3
    } else {
        4
    };
    completed_count as u32 * multiplier
}
