//! Regional blood type distribution.

use serde::Serialize;

use crate::models::BloodType;

/// Population share of each blood type in a region.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionalDistribution {
    /// Region display name
    pub region: &'static str,
    /// Region population
    pub population: u64,
    /// (type, percent of population), in canonical enumeration order
    pub shares: [(BloodType, f64); 8],
}

use BloodType::*;

/// Known regional distributions, keyed by lowercase region name.
static REGIONS: [(&str, RegionalDistribution); 1] = [(
    "israel",
    RegionalDistribution {
        region: "Israel",
        population: 8_323_659,
        shares: [
            (ONegative, 3.0),
            (OPositive, 32.0),
            (ANegative, 4.0),
            (APositive, 34.0),
            (BNegative, 2.0),
            (BPositive, 17.0),
            (ABNegative, 1.0),
            (ABPositive, 7.0),
        ],
    },
)];

impl RegionalDistribution {
    /// Population share for one type, in percent.
    pub fn share_of(&self, blood_type: BloodType) -> f64 {
        self.shares
            .iter()
            .find(|(t, _)| *t == blood_type)
            .map(|(_, pct)| *pct)
            .unwrap_or(0.0)
    }

    /// Types ordered rarest first.
    pub fn rarity_order(&self) -> Vec<BloodType> {
        let mut ordered = self.shares;
        ordered.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        ordered.into_iter().map(|(t, _)| t).collect()
    }
}

/// Look up the distribution for a region name (case-insensitive).
pub fn distribution(region: &str) -> Option<&'static RegionalDistribution> {
    let key = region.to_lowercase();
    REGIONS.iter().find(|(k, _)| *k == key).map(|(_, d)| d)
}
