//! Donation ledger aggregation.
//!
//! Every function here is pure over its inputs: "today" is always a
//! parameter, never read from a clock, so the arithmetic stays testable.
//! Records are user-entered and of mixed quality; aggregation skips the
//! offending record and reports the skip instead of aborting or silently
//! corrupting a sum.

mod stats;

pub use stats::*;

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashSet;
use thiserror::Error;

use crate::models::DonationRecord;

/// Deferral interval between whole-blood donations, in days.
///
/// The application applies this uniformly to every donation type, even
/// though platelet/plasma intervals differ in the real world; the value
/// is data so a deployment can override it via [`DeferralPolicy`].
pub const WHOLE_BLOOD_DEFERRAL_DAYS: u32 = 56;

/// Why a record was rejected by validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("volume is missing")]
    MissingVolume,

    #[error("volume must be positive, got {0} mL")]
    NonPositiveVolume(i64),

    #[error("unparseable date: {0:?}")]
    UnparseableDate(String),
}

/// A record excluded from an aggregation, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// ID of the offending record
    pub record_id: String,
    /// Why it was excluded
    pub error: RecordError,
}

/// Result of a volume aggregation over a mixed-quality record set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LedgerTally {
    /// Sum of volumes over the accepted records, in milliliters
    pub total_ml: i64,
    /// Number of records that passed validation
    pub counted: u32,
    /// Records excluded from the sum, for the caller to surface or log
    pub skipped: Vec<SkippedRecord>,
}

/// Parse a `YYYY-MM-DD` civil date.
pub fn parse_date(s: &str) -> Result<NaiveDate, RecordError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| RecordError::UnparseableDate(s.to_string()))
}

/// Validate a record, returning its parsed date and positive volume.
pub fn validate_record(record: &DonationRecord) -> Result<(NaiveDate, i64), RecordError> {
    let date = parse_date(&record.date)?;
    match record.volume_ml {
        None => Err(RecordError::MissingVolume),
        Some(ml) if ml <= 0 => Err(RecordError::NonPositiveVolume(ml)),
        Some(ml) => Ok((date, ml)),
    }
}

/// Eligibility arithmetic, parameterized by the deferral interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferralPolicy {
    /// Minimum days between donations
    pub deferral_days: u32,
}

impl Default for DeferralPolicy {
    fn default() -> Self {
        Self {
            deferral_days: WHOLE_BLOOD_DEFERRAL_DAYS,
        }
    }
}

impl DeferralPolicy {
    /// Create a policy with a custom interval.
    pub fn new(deferral_days: u32) -> Self {
        Self { deferral_days }
    }

    /// Earliest date the donor may give again, or `None` when there is no
    /// prior donation and the donor is immediately eligible.
    pub fn next_eligible_date(&self, last_donation: Option<NaiveDate>) -> Option<NaiveDate> {
        last_donation.map(|last| last + Duration::days(i64::from(self.deferral_days)))
    }

    /// Whole days the donor still has to wait, never negative.
    pub fn days_until_eligible(&self, last_donation: NaiveDate, today: NaiveDate) -> i64 {
        let elapsed = (today - last_donation).num_days();
        (i64::from(self.deferral_days) - elapsed).max(0)
    }

    /// Whether the donor may donate on `today`.
    pub fn is_eligible(&self, last_donation: Option<NaiveDate>, today: NaiveDate) -> bool {
        match last_donation {
            None => true,
            Some(last) => self.days_until_eligible(last, today) == 0,
        }
    }
}

/// Sum donated volume, skipping and reporting invalid records.
pub fn total_volume(records: &[DonationRecord]) -> LedgerTally {
    let mut tally = LedgerTally::default();
    for record in records {
        match validate_record(record) {
            Ok((_, ml)) => {
                tally.total_ml += ml;
                tally.counted += 1;
            }
            Err(error) => tally.skipped.push(SkippedRecord {
                record_id: record.id.clone(),
                error,
            }),
        }
    }
    tally
}

/// Count consecutive calendar quarters, walking backward from today's
/// quarter, that contain at least one donation. Stops at the first empty
/// quarter; records with unparseable dates are ignored.
pub fn donation_streak(records: &[DonationRecord], today: NaiveDate) -> u32 {
    let quarters: HashSet<(i32, u32)> = records
        .iter()
        .filter_map(|r| parse_date(&r.date).ok())
        .map(quarter_of)
        .collect();

    let mut streak = 0;
    let mut cursor = quarter_of(today);
    while quarters.contains(&cursor) {
        streak += 1;
        cursor = previous_quarter(cursor);
    }
    streak
}

fn quarter_of(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month0() / 3)
}

fn previous_quarter((year, quarter): (i32, u32)) -> (i32, u32) {
    if quarter == 0 {
        (year - 1, 3)
    } else {
        (year, quarter - 1)
    }
}
