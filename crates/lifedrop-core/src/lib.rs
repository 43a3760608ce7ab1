//! LifeDrop Core Library
//!
//! Domain core for a blood-donation awareness application: compatibility
//! lookups, donation-ledger aggregation and donor impact arithmetic,
//! consumed by a host UI layer through the FFI surface below.
//!
//! # Architecture
//!
//! ```text
//! Donation form ──► DonationRecord ─────┐
//!                                       │
//! Profile / Donation stores ────────────┼──► Ledger ──► Rank / Impact
//! (lifedrop-gateway traits, external)   │    (tally,     (tiers, badges,
//!                                       │     streak,     lives estimate)
//!                                       │     eligibility)      │
//! Blood type selector ──► BloodType ──► Compatibility           │
//!                          table (single source of truth)       │
//!                                       │                       │
//!                                       └──────────► Donor summary export
//!                                                    (JSON / CSV, shareable)
//! ```
//!
//! # Core Principle
//!
//! **The compatibility relation is data, not a formula.** Exactly one
//! table answers both donation directions, and every rank figure comes
//! from one threshold ladder; no caller carries an inline copy that
//! could drift.
//!
//! # Modules
//!
//! - [`models`]: Domain types (BloodType, DonationRecord, DonorProfile, Goal)
//! - [`compat`]: Compatibility queries and regional distribution
//! - [`ledger`]: Eligibility windows, volume tally, quarter streaks
//! - [`impact`]: Rank ladder, badges, lives/points estimates
//! - [`export`]: Shareable donor summary (JSON/CSV)

pub mod compat;
pub mod export;
pub mod impact;
pub mod ledger;
pub mod models;

// Re-export commonly used types
pub use compat::{can_donate_to, compatible_donors, compatible_recipients, RegionalDistribution};
pub use export::DonorSummary;
pub use impact::{
    earned_badges, estimated_lives_impacted, rank_of, Achievement, ImpactError, RankStatus,
    RankTier,
};
pub use ledger::{
    donation_streak, total_volume, DeferralPolicy, LedgerTally, RecordError, SkippedRecord,
};
pub use models::{
    BloodType, DonationRecord, DonationType, DonorProfile, Goal, InvalidBloodType,
    InvalidDonationType,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::str::FromStr;
use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum LifeDropError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<InvalidBloodType> for LifeDropError {
    fn from(e: InvalidBloodType) -> Self {
        LifeDropError::InvalidInput(e.to_string())
    }
}

impl From<InvalidDonationType> for LifeDropError {
    fn from(e: InvalidDonationType) -> Self {
        LifeDropError::InvalidInput(e.to_string())
    }
}

impl From<RecordError> for LifeDropError {
    fn from(e: RecordError) -> Self {
        LifeDropError::InvalidInput(e.to_string())
    }
}

impl From<ImpactError> for LifeDropError {
    fn from(e: ImpactError) -> Self {
        LifeDropError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for LifeDropError {
    fn from(e: serde_json::Error) -> Self {
        LifeDropError::SerializationError(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Engine with the standard policy (56-day deferral, 3 lives/donation).
#[uniffi::export]
pub fn default_engine() -> Arc<LifeDropCore> {
    Arc::new(LifeDropCore {
        policy: DeferralPolicy::default(),
        lives_per_donation: impact::LIVES_PER_DONATION,
    })
}

/// Engine with deployment-specific constants.
#[uniffi::export]
pub fn custom_engine(deferral_days: u32, lives_per_donation: u64) -> Arc<LifeDropCore> {
    Arc::new(LifeDropCore {
        policy: DeferralPolicy::new(deferral_days),
        lives_per_donation,
    })
}

// =========================================================================
// Main API Object
// =========================================================================

/// Stateless computation engine for the host UI.
///
/// Holds only configuration; all donor data comes in through arguments.
#[derive(uniffi::Object)]
pub struct LifeDropCore {
    policy: DeferralPolicy,
    lives_per_donation: u64,
}

#[uniffi::export]
impl LifeDropCore {
    // =========================================================================
    // Compatibility Operations
    // =========================================================================

    /// Types the given donor type may donate to, in canonical order.
    pub fn compatible_recipients(&self, donor_type: String) -> Result<Vec<String>, LifeDropError> {
        let donor = BloodType::from_str(&donor_type)?;
        Ok(symbols(compat::compatible_recipients(donor)))
    }

    /// Types the given recipient type may receive from, in canonical order.
    pub fn compatible_donors(&self, recipient_type: String) -> Result<Vec<String>, LifeDropError> {
        let recipient = BloodType::from_str(&recipient_type)?;
        Ok(symbols(compat::compatible_donors(recipient)))
    }

    /// Whether donor blood may be given to the recipient.
    pub fn can_donate_to(
        &self,
        donor_type: String,
        recipient_type: String,
    ) -> Result<bool, LifeDropError> {
        let donor = BloodType::from_str(&donor_type)?;
        let recipient = BloodType::from_str(&recipient_type)?;
        Ok(compat::can_donate_to(donor, recipient))
    }

    /// Blood type distribution for a region, if known.
    pub fn regional_distribution(
        &self,
        region: String,
    ) -> Result<FfiRegionalDistribution, LifeDropError> {
        compat::distribution(&region)
            .map(|d| d.into())
            .ok_or(LifeDropError::NotFound(region))
    }

    // =========================================================================
    // Ledger Operations
    // =========================================================================

    /// Earliest next donation date, or None when immediately eligible.
    pub fn next_eligible_date(
        &self,
        last_donation_date: Option<String>,
    ) -> Result<Option<String>, LifeDropError> {
        let last = match last_donation_date {
            Some(s) => Some(ledger::parse_date(&s)?),
            None => None,
        };
        Ok(self
            .policy
            .next_eligible_date(last)
            .map(|d| d.format("%Y-%m-%d").to_string()))
    }

    /// Whole days until the donor may give again, never negative.
    pub fn days_until_eligible(
        &self,
        last_donation_date: String,
        today: String,
    ) -> Result<i64, LifeDropError> {
        let last = ledger::parse_date(&last_donation_date)?;
        let today = ledger::parse_date(&today)?;
        Ok(self.policy.days_until_eligible(last, today))
    }

    /// Aggregate a donor's record set into dashboard statistics.
    ///
    /// Invalid records are skipped and reported in the result, never
    /// silently folded into the totals.
    pub fn donor_stats(
        &self,
        records: Vec<FfiDonationRecord>,
        today: String,
    ) -> Result<FfiDonorStats, LifeDropError> {
        let today = ledger::parse_date(&today)?;
        let records = to_records(records)?;

        let tally = ledger::total_volume(&records);
        Ok(FfiDonorStats {
            total_volume_ml: tally.total_ml,
            volume_display: ledger::format_volume(tally.total_ml),
            counted: tally.counted,
            skipped: tally.skipped.into_iter().map(|s| s.into()).collect(),
            streak_quarters: ledger::donation_streak(&records, today),
            average_interval_days: ledger::average_interval_days(&records),
        })
    }

    // =========================================================================
    // Impact Operations
    // =========================================================================

    /// Rank tier and progress for a donation count.
    pub fn rank_of(&self, donation_count: i64) -> Result<FfiRankStatus, LifeDropError> {
        let status = impact::rank_of(donation_count)?;
        Ok(status.into())
    }

    /// Estimated lives impacted (donations x configured multiplier).
    /// An estimate, not a medical guarantee.
    pub fn estimated_lives_impacted(&self, donation_count: i64) -> Result<u64, LifeDropError> {
        Ok(impact::validate_count(donation_count)? * self.lives_per_donation)
    }

    /// Badges earned at the given donation count.
    pub fn earned_badges(&self, donation_count: i64) -> Vec<FfiAchievement> {
        impact::earned_badges(donation_count)
            .into_iter()
            .map(|a| a.into())
            .collect()
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Shareable donor summary as pretty JSON.
    pub fn export_summary_json(
        &self,
        profile: FfiDonorProfile,
        records: Vec<FfiDonationRecord>,
        today: String,
    ) -> Result<String, LifeDropError> {
        let (summary, _) = self.build_summary(profile, records, today)?;
        Ok(summary.to_json()?)
    }

    /// Shareable donor summary as CSV.
    pub fn export_summary_csv(
        &self,
        profile: FfiDonorProfile,
        records: Vec<FfiDonationRecord>,
        today: String,
    ) -> Result<String, LifeDropError> {
        let (summary, _) = self.build_summary(profile, records, today)?;
        Ok(summary.to_csv())
    }
}

impl LifeDropCore {
    fn build_summary(
        &self,
        profile: FfiDonorProfile,
        records: Vec<FfiDonationRecord>,
        today: String,
    ) -> Result<(DonorSummary, Vec<SkippedRecord>), LifeDropError> {
        let today = ledger::parse_date(&today)?;
        let profile: DonorProfile = profile.try_into()?;
        let records = to_records(records)?;
        Ok(DonorSummary::build(&profile, &records, today, self.policy)?)
    }
}

fn symbols(types: Vec<BloodType>) -> Vec<String> {
    types.into_iter().map(|t| t.symbol().to_string()).collect()
}

fn to_records(records: Vec<FfiDonationRecord>) -> Result<Vec<DonationRecord>, LifeDropError> {
    records.into_iter().map(|r| r.try_into()).collect()
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe donation record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDonationRecord {
    pub id: String,
    pub owner_id: String,
    pub date: String,
    pub center: String,
    pub donation_type: String,
    pub volume_ml: Option<i64>,
    pub notes: Option<String>,
}

impl TryFrom<FfiDonationRecord> for DonationRecord {
    type Error = LifeDropError;

    fn try_from(r: FfiDonationRecord) -> Result<Self, Self::Error> {
        Ok(DonationRecord {
            id: r.id,
            owner_id: r.owner_id,
            date: r.date,
            center: r.center,
            donation_type: DonationType::from_str(&r.donation_type)?,
            volume_ml: r.volume_ml,
            notes: r.notes,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}

impl From<DonationRecord> for FfiDonationRecord {
    fn from(r: DonationRecord) -> Self {
        Self {
            id: r.id,
            owner_id: r.owner_id,
            date: r.date,
            center: r.center,
            donation_type: r.donation_type.as_str().to_string(),
            volume_ml: r.volume_ml,
            notes: r.notes,
        }
    }
}

/// FFI-safe donor profile.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDonorProfile {
    pub id: String,
    pub blood_type: Option<String>,
    pub region: Option<String>,
    pub donation_count: i64,
    pub last_donation_date: Option<String>,
}

impl TryFrom<FfiDonorProfile> for DonorProfile {
    type Error = LifeDropError;

    fn try_from(p: FfiDonorProfile) -> Result<Self, Self::Error> {
        let blood_type = match p.blood_type {
            Some(s) => Some(BloodType::from_str(&s)?),
            None => None,
        };
        Ok(DonorProfile {
            id: p.id,
            blood_type,
            region: p.region,
            donation_count: p.donation_count,
            last_donation_date: p.last_donation_date,
        })
    }
}

/// FFI-safe aggregated statistics.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDonorStats {
    pub total_volume_ml: i64,
    pub volume_display: String,
    pub counted: u32,
    pub skipped: Vec<FfiSkippedRecord>,
    pub streak_quarters: u32,
    pub average_interval_days: Option<i64>,
}

/// FFI-safe skipped-record report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSkippedRecord {
    pub record_id: String,
    pub reason: String,
}

impl From<SkippedRecord> for FfiSkippedRecord {
    fn from(s: SkippedRecord) -> Self {
        Self {
            record_id: s.record_id,
            reason: s.error.to_string(),
        }
    }
}

/// FFI-safe rank status.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRankStatus {
    pub tier: String,
    pub progress: f64,
}

impl From<RankStatus> for FfiRankStatus {
    fn from(s: RankStatus) -> Self {
        Self {
            tier: s.tier.label().to_string(),
            progress: s.progress,
        }
    }
}

/// FFI-safe achievement.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAchievement {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub min_donations: i64,
}

impl From<&'static Achievement> for FfiAchievement {
    fn from(a: &'static Achievement) -> Self {
        Self {
            slug: a.slug.to_string(),
            name: a.name.to_string(),
            description: a.description.to_string(),
            min_donations: a.min_donations,
        }
    }
}

/// FFI-safe regional distribution.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRegionalDistribution {
    pub region: String,
    pub population: u64,
    pub shares: Vec<FfiTypeShare>,
}

/// FFI-safe (type, percent) pair.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTypeShare {
    pub blood_type: String,
    pub percent: f64,
}

impl From<&'static RegionalDistribution> for FfiRegionalDistribution {
    fn from(d: &'static RegionalDistribution) -> Self {
        Self {
            region: d.region.to_string(),
            population: d.population,
            shares: d
                .shares
                .iter()
                .map(|(t, pct)| FfiTypeShare {
                    blood_type: t.symbol().to_string(),
                    percent: *pct,
                })
                .collect(),
        }
    }
}
