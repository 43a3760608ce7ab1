//! Donor rank and impact arithmetic.
//!
//! One authoritative threshold table drives every rank computation;
//! callers never carry their own copy of the ladder.

mod achievements;

pub use achievements::*;

use serde::Serialize;
use thiserror::Error;

/// Estimated recipients helped per donation. A documented estimate, not
/// a medical guarantee; every surfaced figure derived from it is labeled
/// as an estimate.
pub const LIVES_PER_DONATION: u64 = 3;

/// Reward points granted per donation.
pub const POINTS_PER_DONATION: u64 = 100;

/// Impact calculator errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImpactError {
    #[error("invalid donation count: {0}")]
    InvalidCount(i64),
}

/// Donor rank tiers, lowest to highest.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum RankTier {
    Newcomer,
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl RankTier {
    /// Display name.
    pub fn label(&self) -> &'static str {
        match self {
            RankTier::Newcomer => "Newcomer",
            RankTier::Bronze => "Bronze",
            RankTier::Silver => "Silver",
            RankTier::Gold => "Gold",
            RankTier::Platinum => "Platinum",
        }
    }
}

/// A tier with its donation-count floor and the width of its band.
/// A zero span marks the top tier, which is always at 100% progress.
struct TierRow {
    tier: RankTier,
    floor: i64,
    span: i64,
}

/// The rank ladder. Bands are contiguous and non-overlapping: each row
/// covers `[floor, floor + span)` and the last covers `[floor, inf)`.
static RANK_LADDER: [TierRow; 5] = [
    TierRow { tier: RankTier::Newcomer, floor: 0, span: 3 },
    TierRow { tier: RankTier::Bronze, floor: 3, span: 7 },
    TierRow { tier: RankTier::Silver, floor: 10, span: 15 },
    TierRow { tier: RankTier::Gold, floor: 25, span: 25 },
    TierRow { tier: RankTier::Platinum, floor: 50, span: 0 },
];

/// A donor's rank and progress toward the next tier.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RankStatus {
    /// Current tier
    pub tier: RankTier,
    /// Progress through the tier's band, percent clamped to [0, 100]
    pub progress: f64,
}

/// Rank a donation count. Negative counts fail fast; no default is
/// substituted.
pub fn rank_of(count: i64) -> Result<RankStatus, ImpactError> {
    if count < 0 {
        return Err(ImpactError::InvalidCount(count));
    }

    let row = RANK_LADDER
        .iter()
        .rev()
        .find(|row| count >= row.floor)
        .unwrap_or(&RANK_LADDER[0]);

    let progress = if row.span == 0 {
        100.0
    } else {
        ((count - row.floor) as f64 / row.span as f64 * 100.0).clamp(0.0, 100.0)
    };

    Ok(RankStatus {
        tier: row.tier,
        progress,
    })
}

/// Estimated number of lives helped by `count` donations.
pub fn estimated_lives_impacted(count: i64) -> Result<u64, ImpactError> {
    Ok(validate_count(count)? * LIVES_PER_DONATION)
}

/// Reward points earned by `count` donations.
pub fn points(count: i64) -> Result<u64, ImpactError> {
    Ok(validate_count(count)? * POINTS_PER_DONATION)
}

/// Reject negative donation counts.
pub fn validate_count(count: i64) -> Result<u64, ImpactError> {
    u64::try_from(count).map_err(|_| ImpactError::InvalidCount(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_boundaries() {
        let status = rank_of(2).unwrap();
        assert_eq!(status.tier, RankTier::Newcomer);
        assert!((status.progress - 200.0 / 3.0).abs() < 1e-9);

        let status = rank_of(3).unwrap();
        assert_eq!(status.tier, RankTier::Bronze);
        assert_eq!(status.progress, 0.0);

        let status = rank_of(49).unwrap();
        assert_eq!(status.tier, RankTier::Gold);
        assert_eq!(status.progress, 96.0);

        let status = rank_of(50).unwrap();
        assert_eq!(status.tier, RankTier::Platinum);
        assert_eq!(status.progress, 100.0);
    }

    #[test]
    fn test_rank_of_zero() {
        let status = rank_of(0).unwrap();
        assert_eq!(status.tier, RankTier::Newcomer);
        assert_eq!(status.progress, 0.0);
    }

    #[test]
    fn test_negative_count_fails_fast() {
        assert_eq!(rank_of(-1), Err(ImpactError::InvalidCount(-1)));
        assert_eq!(
            estimated_lives_impacted(-5),
            Err(ImpactError::InvalidCount(-5))
        );
        assert_eq!(points(-1), Err(ImpactError::InvalidCount(-1)));
    }

    #[test]
    fn test_rank_is_pure() {
        assert_eq!(rank_of(17).unwrap(), rank_of(17).unwrap());
    }

    #[test]
    fn test_lives_and_points() {
        assert_eq!(estimated_lives_impacted(0).unwrap(), 0);
        assert_eq!(estimated_lives_impacted(4).unwrap(), 12);
        assert_eq!(points(4).unwrap(), 400);
    }

    #[test]
    fn test_ladder_is_contiguous() {
        for pair in RANK_LADDER.windows(2) {
            assert_eq!(pair[0].floor + pair[0].span, pair[1].floor);
        }
    }
}
