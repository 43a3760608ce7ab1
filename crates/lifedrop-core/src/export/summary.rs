//! Shareable donor impact summary.

use chrono::NaiveDate;
use serde::Serialize;

use crate::impact::{
    earned_badges, estimated_lives_impacted, points, rank_of, ImpactError, RankStatus,
};
use crate::ledger::{
    average_interval_days, donation_streak, format_volume, total_volume, DeferralPolicy,
    parse_date, SkippedRecord,
};
use crate::models::{DonationRecord, DonorProfile};

/// A donor's aggregated impact, ready to render or share.
#[derive(Debug, Clone, Serialize)]
pub struct DonorSummary {
    /// Export metadata
    pub metadata: SummaryMetadata,
    /// Ledger totals
    pub totals: SummaryTotals,
    /// Rank and progress
    pub rank: RankStatus,
    /// Slugs of badges earned so far
    pub badges: Vec<&'static str>,
}

/// Summary export metadata.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryMetadata {
    /// Donor's user ID
    pub donor_id: String,
    /// Self-reported blood type symbol, if known
    pub blood_type: Option<String>,
    /// Home region, if provided
    pub region: Option<String>,
    /// Export timestamp
    pub exported_at: String,
}

/// Aggregated ledger figures.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryTotals {
    /// Cached donation count from the profile
    pub donation_count: i64,
    /// Summed donated volume in milliliters
    pub total_volume_ml: i64,
    /// Display form of the volume
    pub volume_display: String,
    /// Lives-impacted estimate (count x 3; an estimate, not a guarantee)
    pub estimated_lives_impacted: u64,
    /// Reward points
    pub points: u64,
    /// Consecutive quarters with a donation
    pub streak_quarters: u32,
    /// Mean days between donations, if computable
    pub average_interval_days: Option<i64>,
    /// Next date the donor may give again (`YYYY-MM-DD`), if deferred
    pub next_eligible_date: Option<String>,
    /// Number of records excluded from the volume sum
    pub skipped_records: usize,
}

impl DonorSummary {
    /// Build a summary from a profile and its record set.
    ///
    /// Invalid records are skipped per ledger policy; their count is
    /// surfaced in the totals and the full list is returned alongside.
    pub fn build(
        profile: &DonorProfile,
        records: &[DonationRecord],
        today: NaiveDate,
        policy: DeferralPolicy,
    ) -> Result<(Self, Vec<SkippedRecord>), ImpactError> {
        let tally = total_volume(records);
        let rank = rank_of(profile.donation_count)?;

        let last_donation = profile
            .last_donation_date
            .as_deref()
            .and_then(|d| parse_date(d).ok());
        let next_eligible = policy
            .next_eligible_date(last_donation)
            .filter(|d| *d > today)
            .map(|d| d.format("%Y-%m-%d").to_string());

        let summary = Self {
            metadata: SummaryMetadata {
                donor_id: profile.id.clone(),
                blood_type: profile.blood_type.map(|t| t.symbol().to_string()),
                region: profile.region.clone(),
                exported_at: chrono::Utc::now().to_rfc3339(),
            },
            totals: SummaryTotals {
                donation_count: profile.donation_count,
                total_volume_ml: tally.total_ml,
                volume_display: format_volume(tally.total_ml),
                estimated_lives_impacted: estimated_lives_impacted(profile.donation_count)?,
                points: points(profile.donation_count)?,
                streak_quarters: donation_streak(records, today),
                average_interval_days: average_interval_days(records),
                next_eligible_date: next_eligible,
                skipped_records: tally.skipped.len(),
            },
            rank,
            badges: earned_badges(profile.donation_count)
                .into_iter()
                .map(|a| a.slug)
                .collect(),
        };

        Ok((summary, tally.skipped))
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format: a header row and one data row.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        csv.push_str(
            "donor_id,blood_type,region,donation_count,total_volume_ml,estimated_lives_impacted,points,streak_quarters,rank,rank_progress,badges,exported_at\n",
        );
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{:.1},{},{}\n",
            escape_csv(&self.metadata.donor_id),
            self.metadata.blood_type.as_deref().unwrap_or(""),
            escape_csv(self.metadata.region.as_deref().unwrap_or("")),
            self.totals.donation_count,
            self.totals.total_volume_ml,
            self.totals.estimated_lives_impacted,
            self.totals.points,
            self.totals.streak_quarters,
            self.rank.tier.label(),
            self.rank.progress,
            escape_csv(&self.badges.join(";")),
            escape_csv(&self.metadata.exported_at),
        ));

        csv
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BloodType, DonationType};

    fn make_profile() -> DonorProfile {
        let mut profile = DonorProfile::new("user-1".into());
        profile.blood_type = Some(BloodType::ONegative);
        profile.region = Some("Israel".into());
        profile
    }

    fn make_records() -> Vec<DonationRecord> {
        vec![
            DonationRecord::new(
                "user-1".into(),
                "2024-01-05".into(),
                "Central".into(),
                DonationType::WholeBlood,
                Some(450),
            ),
            DonationRecord::new(
                "user-1".into(),
                "2024-02-20".into(),
                "Central".into(),
                DonationType::Platelet,
                Some(250),
            ),
            DonationRecord::new(
                "user-1".into(),
                "2024-03-01".into(),
                "Northside".into(),
                DonationType::WholeBlood,
                None,
            ),
        ]
    }

    fn today() -> NaiveDate {
        parse_date("2024-03-10").unwrap()
    }

    #[test]
    fn test_build_summary() {
        let mut profile = make_profile();
        let records = make_records();
        profile.reconcile(&records);

        let (summary, skipped) =
            DonorSummary::build(&profile, &records, today(), DeferralPolicy::default()).unwrap();

        assert_eq!(summary.totals.donation_count, 3);
        assert_eq!(summary.totals.total_volume_ml, 700);
        assert_eq!(summary.totals.volume_display, "700mL");
        assert_eq!(summary.totals.estimated_lives_impacted, 9);
        assert_eq!(summary.totals.points, 300);
        assert_eq!(summary.totals.streak_quarters, 1);
        assert_eq!(summary.totals.skipped_records, 1);
        assert_eq!(skipped.len(), 1);
        assert_eq!(summary.badges, vec!["first-drop"]);
        // Last donation 2024-03-01, so still deferred on 2024-03-10
        assert_eq!(
            summary.totals.next_eligible_date.as_deref(),
            Some("2024-04-26")
        );
    }

    #[test]
    fn test_summary_for_new_donor() {
        let profile = make_profile();
        let (summary, skipped) =
            DonorSummary::build(&profile, &[], today(), DeferralPolicy::default()).unwrap();

        assert_eq!(summary.totals.donation_count, 0);
        assert_eq!(summary.totals.estimated_lives_impacted, 0);
        assert_eq!(summary.totals.streak_quarters, 0);
        assert!(summary.totals.next_eligible_date.is_none());
        assert!(summary.badges.is_empty());
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_summary_json() {
        let mut profile = make_profile();
        let records = make_records();
        profile.reconcile(&records);

        let (summary, _) =
            DonorSummary::build(&profile, &records, today(), DeferralPolicy::default()).unwrap();
        let json = summary.to_json().unwrap();
        assert!(json.contains("\"estimated_lives_impacted\": 9"));
        assert!(json.contains("\"O-\""));
    }

    #[test]
    fn test_summary_csv() {
        let mut profile = make_profile();
        let records = make_records();
        profile.reconcile(&records);

        let (summary, _) =
            DonorSummary::build(&profile, &records, today(), DeferralPolicy::default()).unwrap();
        let csv = summary.to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2); // Header + 1 row
        assert!(lines[0].starts_with("donor_id,"));
        assert!(lines[1].starts_with("user-1,O-,Israel,3,700,9,300,"));
    }

    #[test]
    fn test_csv_escaping() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
    }
}
