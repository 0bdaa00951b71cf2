use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// Crop-specific seed reference data from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedTypeReference {
    #[serde(rename = "Crop")]
    pub crop: String,

    #[serde(rename = "SeedsPerLb")]
    pub seeds_per_lb: f64,

    #[serde(rename = "LbsPerUnit")]
    pub lbs_per_unit: f64,
}

impl SeedTypeReference {
    pub fn new(crop: impl Into<String>, seeds_per_lb: f64, lbs_per_unit: f64) -> Self {
        Self {
            crop: crop.into(),
            seeds_per_lb,
            lbs_per_unit,
        }
    }

    /// Canonical key for lookups (lowercase crop name).
    pub fn key(&self) -> String {
        self.crop.trim().to_lowercase()
    }
}

/// Unit the grower expresses their seeding rate in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedingRateUnit {
    #[serde(rename = "seeds/acre")]
    SeedsPerAcre,
    #[serde(rename = "lbs/acre")]
    LbsPerAcre,
    #[serde(rename = "bu/acre")]
    BuPerAcre,
}

impl SeedingRateUnit {
    pub const ALL: [SeedingRateUnit; 3] = [
        SeedingRateUnit::SeedsPerAcre,
        SeedingRateUnit::LbsPerAcre,
        SeedingRateUnit::BuPerAcre,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeedingRateUnit::SeedsPerAcre => "seeds/acre",
            SeedingRateUnit::LbsPerAcre => "lbs/acre",
            SeedingRateUnit::BuPerAcre => "bu/acre",
        }
    }
}

impl fmt::Display for SeedingRateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeedingRateUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        SeedingRateUnit::ALL
            .into_iter()
            .find(|u| u.as_str() == normalized)
            .ok_or_else(|| CalcError::InvalidUnit(s.to_string()))
    }
}
