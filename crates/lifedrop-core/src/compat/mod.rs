//! Blood type compatibility queries.
//!
//! Pure lookups over the static donation table. Both directions are
//! answered from the same table, so "who can I donate to" and "who can I
//! receive from" can never drift apart.

mod distribution;
mod table;

pub use distribution::*;

use crate::models::BloodType;

/// Whether `donor` blood may be given to `recipient`.
pub fn can_donate_to(donor: BloodType, recipient: BloodType) -> bool {
    table::recipients_of(donor).contains(&recipient)
}

/// All types `donor` may donate to, in canonical enumeration order.
///
/// O- (universal donor) yields all eight types; AB+ yields only itself.
pub fn compatible_recipients(donor: BloodType) -> Vec<BloodType> {
    table::recipients_of(donor).to_vec()
}

/// All types `recipient` may receive from, in canonical enumeration order.
///
/// AB+ (universal recipient) yields all eight types; O- yields only itself.
pub fn compatible_donors(recipient: BloodType) -> Vec<BloodType> {
    BloodType::ALL
        .into_iter()
        .filter(|donor| can_donate_to(*donor, recipient))
        .collect()
}
