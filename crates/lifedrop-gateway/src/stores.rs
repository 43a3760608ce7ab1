//! Trait interfaces for the externally owned backend.
//!
//! These define only the shape this workspace expects, not the wire
//! format; the real client (and its retry/timeout behavior) lives
//! outside the workspace.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lifedrop_core::models::{BloodType, DonationRecord, DonorProfile};

/// Gateway errors.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("not signed in")]
    NotSignedIn,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("profile not found: {0}")]
    ProfileNotFound(String),

    #[error("backend error: {0}")]
    External(#[from] anyhow::Error),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// An authenticated user as reported by the auth backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// User ID
    pub id: String,
    /// Sign-in email
    pub email: String,
}

/// Partial profile update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub blood_type: Option<BloodType>,
    pub region: Option<String>,
    pub donation_count: Option<i64>,
    pub last_donation_date: Option<String>,
}

impl ProfilePatch {
    /// Apply the set fields onto a profile.
    pub fn apply_to(&self, profile: &mut DonorProfile) {
        if let Some(blood_type) = self.blood_type {
            profile.blood_type = Some(blood_type);
        }
        if let Some(region) = &self.region {
            profile.region = Some(region.clone());
        }
        if let Some(count) = self.donation_count {
            profile.donation_count = count;
        }
        if let Some(date) = &self.last_donation_date {
            profile.last_donation_date = Some(date.clone());
        }
    }
}

/// Auth/session operations.
pub trait AuthGateway {
    /// The signed-in user, if any.
    fn current_user(&self) -> Option<User>;

    /// Revalidate the session token with the backend.
    fn refresh_session(&self) -> GatewayResult<()>;

    /// Sign in with email and password.
    fn sign_in(&self, email: &str, password: &str) -> GatewayResult<User>;

    /// Sign out the current user. Idempotent.
    fn sign_out(&self) -> GatewayResult<()>;
}

/// Donor profile storage.
pub trait ProfileStore {
    /// Fetch a profile by user ID.
    fn get_profile(&self, user_id: &str) -> GatewayResult<Option<DonorProfile>>;

    /// Create or patch a profile, returning the stored row.
    fn upsert_profile(&self, user_id: &str, patch: &ProfilePatch) -> GatewayResult<DonorProfile>;
}

/// Donation record storage.
pub trait DonationStore {
    /// All of a donor's records, newest first.
    fn list_donations(&self, user_id: &str) -> GatewayResult<Vec<DonationRecord>>;

    /// Persist a new record, returning the stored row.
    fn insert_donation(&self, record: DonationRecord) -> GatewayResult<DonationRecord>;
}
