//! The authoritative ABO/Rh donation compatibility table.
//!
//! The relation is stored as explicit data. ABO/Rh compatibility is not
//! an arithmetic function of the type symbols, and deriving it from a
//! formula is how inconsistent copies creep in; every caller in the
//! workspace goes through this one table.

use crate::models::BloodType;

use BloodType::*;

/// For each donor type, the recipient types it may donate to, in
/// canonical enumeration order.
pub(super) static DONATION_EDGES: [(BloodType, &[BloodType]); 8] = [
    (
        ONegative,
        &[
            ONegative, OPositive, ANegative, APositive, BNegative, BPositive, ABNegative,
            ABPositive,
        ],
    ),
    (OPositive, &[OPositive, APositive, BPositive, ABPositive]),
    (ANegative, &[ANegative, APositive, ABNegative, ABPositive]),
    (APositive, &[APositive, ABPositive]),
    (BNegative, &[BNegative, BPositive, ABNegative, ABPositive]),
    (BPositive, &[BPositive, ABPositive]),
    (ABNegative, &[ABNegative, ABPositive]),
    (ABPositive, &[ABPositive]),
];

/// Look up the recipient list for a donor type.
pub(super) fn recipients_of(donor: BloodType) -> &'static [BloodType] {
    DONATION_EDGES
        .iter()
        .find(|(d, _)| *d == donor)
        .map(|(_, recipients)| *recipients)
        .unwrap_or(&[])
}
