//! Donation milestone badges.

use serde::Serialize;

/// A badge awarded at a donation-count milestone.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Achievement {
    /// Stable identifier
    pub slug: &'static str,
    /// Display name
    pub name: &'static str,
    /// Display description
    pub description: &'static str,
    /// Donation count at which the badge is earned
    pub min_donations: i64,
}

/// All badges, ordered by milestone.
pub static ACHIEVEMENTS: [Achievement; 5] = [
    Achievement {
        slug: "first-drop",
        name: "First Drop",
        description: "Completed your first blood donation",
        min_donations: 1,
    },
    Achievement {
        slug: "regular-donor",
        name: "Regular Donor",
        description: "Completed 5 blood donations",
        min_donations: 5,
    },
    Achievement {
        slug: "dedicated-donor",
        name: "Dedicated Donor",
        description: "Completed 10 blood donations",
        min_donations: 10,
    },
    Achievement {
        slug: "life-saver",
        name: "Life Saver",
        description: "Completed 25 blood donations",
        min_donations: 25,
    },
    Achievement {
        slug: "guardian",
        name: "Guardian",
        description: "Completed 50 blood donations",
        min_donations: 50,
    },
];

/// Badges earned at the given donation count, ordered by milestone.
pub fn earned_badges(donation_count: i64) -> Vec<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| donation_count >= a.min_donations)
        .collect()
}

/// The next badge still ahead of the donor, if any.
pub fn next_badge(donation_count: i64) -> Option<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .find(|a| donation_count < a.min_donations)
}
