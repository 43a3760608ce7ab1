//! Donation records and donor profiles.

use serde::{Deserialize, Serialize};

use super::blood_type::BloodType;

/// Kind of donation given at a center.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DonationType {
    #[serde(rename = "whole_blood")]
    WholeBlood,
    #[serde(rename = "platelet")]
    Platelet,
    #[serde(rename = "plasma")]
    Plasma,
    #[serde(rename = "power_red")]
    PowerRed,
}

/// Error for a string that is not a known donation type identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid donation type: {0:?}")]
pub struct InvalidDonationType(pub String);

impl DonationType {
    /// Human-readable label for display and exports.
    pub fn label(&self) -> &'static str {
        match self {
            DonationType::WholeBlood => "Whole Blood",
            DonationType::Platelet => "Platelet",
            DonationType::Plasma => "Plasma",
            DonationType::PowerRed => "Power Red",
        }
    }

    /// Stable identifier, matching the storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationType::WholeBlood => "whole_blood",
            DonationType::Platelet => "platelet",
            DonationType::Plasma => "plasma",
            DonationType::PowerRed => "power_red",
        }
    }
}

impl std::str::FromStr for DonationType {
    type Err = InvalidDonationType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whole_blood" => Ok(DonationType::WholeBlood),
            "platelet" => Ok(DonationType::Platelet),
            "plasma" => Ok(DonationType::Plasma),
            "power_red" => Ok(DonationType::PowerRed),
            other => Err(InvalidDonationType(other.to_string())),
        }
    }
}

/// A single donation entered by the donor.
///
/// Immutable once created; the surrounding CRUD app owns edit/delete.
/// `date` is a civil date in `YYYY-MM-DD` form and is parsed at the
/// aggregation boundary, where an unparseable value is reported and
/// skipped rather than aborting the whole computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DonationRecord {
    /// Local UUID - generated when the donor submits the form
    pub id: String,
    /// Owning donor's user ID
    pub owner_id: String,
    /// Donation date (`YYYY-MM-DD`)
    pub date: String,
    /// Donation center name
    pub center: String,
    /// Kind of donation
    pub donation_type: DonationType,
    /// Volume drawn in milliliters; user-entered, so it may be absent
    #[serde(default)]
    pub volume_ml: Option<i64>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: String,
}

impl DonationRecord {
    /// Create a new record from the donation form fields.
    pub fn new(
        owner_id: String,
        date: String,
        center: String,
        donation_type: DonationType,
        volume_ml: Option<i64>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id,
            date,
            center,
            donation_type,
            volume_ml,
            notes: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// A donor's profile row.
///
/// `donation_count` and `last_donation_date` are cached aggregates over
/// the donor's record set. Invariant: `donation_count` equals the number
/// of records and `last_donation_date` equals the maximum record date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DonorProfile {
    /// User ID (owned by the auth system)
    pub id: String,
    /// Self-reported blood type, if known
    pub blood_type: Option<BloodType>,
    /// Home region, if provided
    pub region: Option<String>,
    /// Cached count of accepted donation records
    pub donation_count: i64,
    /// Cached maximum donation date (`YYYY-MM-DD`)
    pub last_donation_date: Option<String>,
}

impl DonorProfile {
    /// Fresh profile for a newly registered user.
    pub fn new(id: String) -> Self {
        Self {
            id,
            blood_type: None,
            region: None,
            donation_count: 0,
            last_donation_date: None,
        }
    }

    /// Fold a newly accepted record into the cached aggregates.
    pub fn apply_donation(&mut self, record: &DonationRecord) {
        self.donation_count += 1;
        match &self.last_donation_date {
            Some(last) if last.as_str() >= record.date.as_str() => {}
            _ => self.last_donation_date = Some(record.date.clone()),
        }
    }

    /// Recompute the cached aggregates from the full record set.
    pub fn reconcile(&mut self, records: &[DonationRecord]) {
        self.donation_count = records.len() as i64;
        self.last_donation_date = records.iter().map(|r| r.date.clone()).max();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record() {
        let record = DonationRecord::new(
            "user-1".into(),
            "2024-01-01".into(),
            "Central Blood Bank".into(),
            DonationType::WholeBlood,
            Some(450),
        );
        assert_eq!(record.owner_id, "user-1");
        assert_eq!(record.volume_ml, Some(450));
        assert_eq!(record.id.len(), 36); // UUID format
    }

    #[test]
    fn test_apply_donation_updates_aggregates() {
        let mut profile = DonorProfile::new("user-1".into());

        let first = DonationRecord::new(
            "user-1".into(),
            "2024-03-10".into(),
            "Central".into(),
            DonationType::WholeBlood,
            Some(450),
        );
        profile.apply_donation(&first);
        assert_eq!(profile.donation_count, 1);
        assert_eq!(profile.last_donation_date.as_deref(), Some("2024-03-10"));

        // An older record bumps the count but not the last date
        let older = DonationRecord::new(
            "user-1".into(),
            "2023-11-02".into(),
            "Central".into(),
            DonationType::Plasma,
            Some(600),
        );
        profile.apply_donation(&older);
        assert_eq!(profile.donation_count, 2);
        assert_eq!(profile.last_donation_date.as_deref(), Some("2024-03-10"));
    }

    #[test]
    fn test_reconcile_matches_record_set() {
        let mut profile = DonorProfile::new("user-1".into());
        profile.donation_count = 99;
        profile.last_donation_date = Some("1999-01-01".into());

        let records = vec![
            DonationRecord::new(
                "user-1".into(),
                "2024-01-01".into(),
                "Central".into(),
                DonationType::WholeBlood,
                Some(450),
            ),
            DonationRecord::new(
                "user-1".into(),
                "2024-04-02".into(),
                "Northside".into(),
                DonationType::Platelet,
                Some(250),
            ),
        ];
        profile.reconcile(&records);
        assert_eq!(profile.donation_count, 2);
        assert_eq!(profile.last_donation_date.as_deref(), Some("2024-04-02"));

        profile.reconcile(&[]);
        assert_eq!(profile.donation_count, 0);
        assert!(profile.last_donation_date.is_none());
    }

    #[test]
    fn test_donation_type_serde_form() {
        let json = serde_json::to_string(&DonationType::PowerRed).unwrap();
        assert_eq!(json, "\"power_red\"");
    }
}
