//! Supplemental dashboard statistics over the donation ledger.

use std::collections::BTreeMap;

use crate::models::{DonationRecord, DonationType};

use super::parse_date;

/// Mean whole-day interval between successive donations, rounded to the
/// nearest day. `None` with fewer than two dated records.
pub fn average_interval_days(records: &[DonationRecord]) -> Option<i64> {
    let mut dates: Vec<_> = records
        .iter()
        .filter_map(|r| parse_date(&r.date).ok())
        .collect();
    if dates.len() < 2 {
        return None;
    }
    dates.sort();

    let total: i64 = dates.windows(2).map(|w| (w[1] - w[0]).num_days()).sum();
    let intervals = (dates.len() - 1) as i64;
    Some((total as f64 / intervals as f64).round() as i64)
}

/// Number of donations per donation type.
pub fn count_by_type(records: &[DonationRecord]) -> BTreeMap<DonationType, u32> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.donation_type).or_insert(0) += 1;
    }
    counts
}

/// Display form for a donated volume: milliliters under one liter,
/// otherwise liters with one decimal.
pub fn format_volume(ml: i64) -> String {
    if ml >= 1000 {
        format!("{:.1}L", ml as f64 / 1000.0)
    } else {
        format!("{}mL", ml)
    }
}
