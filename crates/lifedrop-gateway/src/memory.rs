//! In-memory backend for tests and local development.
//!
//! Keeps the profile aggregates consistent with the record set on every
//! accepted insert, as the hosted backend does.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use lifedrop_core::models::{DonationRecord, DonorProfile};

use crate::stores::{
    AuthGateway, DonationStore, GatewayError, GatewayResult, ProfilePatch, ProfileStore, User,
};

/// In-memory implementation of all three gateway traits.
#[derive(Default)]
pub struct MemoryBackend {
    /// email -> (password, user)
    users: RefCell<HashMap<String, (String, User)>>,
    current: RefCell<Option<User>>,
    profiles: RefCell<HashMap<String, DonorProfile>>,
    donations: RefCell<HashMap<String, Vec<DonationRecord>>>,
    next_user: Cell<u32>,
    refresh_calls: Cell<u32>,
}

impl MemoryBackend {
    /// Empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user so `sign_in` can find it.
    pub fn register_user(&self, email: &str, password: &str) -> User {
        let n = self.next_user.get() + 1;
        self.next_user.set(n);
        let user = User {
            id: format!("user-{}", n),
            email: email.to_string(),
        };
        self.users
            .borrow_mut()
            .insert(email.to_string(), (password.to_string(), user.clone()));
        user
    }

    /// How many times the session was refreshed.
    pub fn refresh_calls(&self) -> u32 {
        self.refresh_calls.get()
    }
}

impl AuthGateway for MemoryBackend {
    fn current_user(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    fn refresh_session(&self) -> GatewayResult<()> {
        self.refresh_calls.set(self.refresh_calls.get() + 1);
        Ok(())
    }

    fn sign_in(&self, email: &str, password: &str) -> GatewayResult<User> {
        let users = self.users.borrow();
        match users.get(email) {
            Some((stored, user)) if stored == password => {
                *self.current.borrow_mut() = Some(user.clone());
                Ok(user.clone())
            }
            _ => Err(GatewayError::InvalidCredentials),
        }
    }

    fn sign_out(&self) -> GatewayResult<()> {
        *self.current.borrow_mut() = None;
        Ok(())
    }
}

impl ProfileStore for MemoryBackend {
    fn get_profile(&self, user_id: &str) -> GatewayResult<Option<DonorProfile>> {
        Ok(self.profiles.borrow().get(user_id).cloned())
    }

    fn upsert_profile(&self, user_id: &str, patch: &ProfilePatch) -> GatewayResult<DonorProfile> {
        let mut profiles = self.profiles.borrow_mut();
        let profile = profiles
            .entry(user_id.to_string())
            .or_insert_with(|| DonorProfile::new(user_id.to_string()));
        patch.apply_to(profile);
        Ok(profile.clone())
    }
}

impl DonationStore for MemoryBackend {
    fn list_donations(&self, user_id: &str) -> GatewayResult<Vec<DonationRecord>> {
        let mut records = self
            .donations
            .borrow()
            .get(user_id)
            .cloned()
            .unwrap_or_default();
        // Newest first, as the dashboard expects
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    fn insert_donation(&self, record: DonationRecord) -> GatewayResult<DonationRecord> {
        let mut profiles = self.profiles.borrow_mut();
        profiles
            .entry(record.owner_id.clone())
            .or_insert_with(|| DonorProfile::new(record.owner_id.clone()))
            .apply_donation(&record);

        self.donations
            .borrow_mut()
            .entry(record.owner_id.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifedrop_core::models::DonationType;

    fn record(date: &str) -> DonationRecord {
        DonationRecord::new(
            "user-1".into(),
            date.into(),
            "Central".into(),
            DonationType::WholeBlood,
            Some(450),
        )
    }

    #[test]
    fn test_sign_in_flow() {
        let backend = MemoryBackend::new();
        let user = backend.register_user("donor@example.com", "secret");

        assert!(backend.current_user().is_none());
        assert!(matches!(
            backend.sign_in("donor@example.com", "wrong"),
            Err(GatewayError::InvalidCredentials)
        ));

        let signed_in = backend.sign_in("donor@example.com", "secret").unwrap();
        assert_eq!(signed_in, user);
        assert_eq!(backend.current_user(), Some(user));

        backend.sign_out().unwrap();
        assert!(backend.current_user().is_none());
    }

    #[test]
    fn test_upsert_creates_then_patches() {
        let backend = MemoryBackend::new();
        assert!(backend.get_profile("user-1").unwrap().is_none());

        let patch = ProfilePatch {
            region: Some("Israel".into()),
            ..Default::default()
        };
        let profile = backend.upsert_profile("user-1", &patch).unwrap();
        assert_eq!(profile.region.as_deref(), Some("Israel"));
        assert_eq!(profile.donation_count, 0);
    }

    #[test]
    fn test_insert_maintains_profile_aggregates() {
        let backend = MemoryBackend::new();
        backend.insert_donation(record("2024-01-01")).unwrap();
        backend.insert_donation(record("2024-03-10")).unwrap();
        backend.insert_donation(record("2024-02-01")).unwrap();

        let profile = backend.get_profile("user-1").unwrap().unwrap();
        assert_eq!(profile.donation_count, 3);
        assert_eq!(profile.last_donation_date.as_deref(), Some("2024-03-10"));

        let records = backend.list_donations("user-1").unwrap();
        let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2024-03-10", "2024-02-01", "2024-01-01"]);
    }

    #[test]
    fn test_list_donations_for_unknown_user_is_empty() {
        let backend = MemoryBackend::new();
        assert!(backend.list_donations("nobody").unwrap().is_empty());
    }
}
