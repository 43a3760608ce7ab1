//! Donation goals.

use serde::{Deserialize, Serialize};

/// A donor-defined donation goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    /// Unique goal ID
    pub id: String,
    /// Owning donor's user ID
    pub owner_id: String,
    /// Display title
    pub title: String,
    /// Number of donations the donor is aiming for
    pub target_count: i64,
    /// Optional deadline (`YYYY-MM-DD`)
    pub target_date: Option<String>,
    /// Whether the goal has been reached. Transitions false -> true only;
    /// a completed goal never un-completes automatically.
    pub is_completed: bool,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Goal {
    /// Create a new goal.
    pub fn new(owner_id: String, title: String, target_count: i64, target_date: Option<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id,
            title,
            target_count,
            target_date,
            is_completed: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Progress toward the target as a percentage clamped to [0, 100].
    pub fn progress_percent(&self, donation_count: i64) -> f64 {
        if self.target_count <= 0 {
            return 100.0;
        }
        (donation_count as f64 / self.target_count as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// Re-evaluate completion against the donor's current count.
    ///
    /// Returns true if this call completed the goal. A donation count that
    /// later drops below the target leaves `is_completed` untouched.
    pub fn update_completion(&mut self, donation_count: i64) -> bool {
        if self.is_completed || donation_count < self.target_count {
            return false;
        }
        self.is_completed = true;
        self.touch();
        true
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}
