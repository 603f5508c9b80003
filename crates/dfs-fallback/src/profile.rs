//! Scoring weights per traffic-load scenario.
//!
//! The load classifier that decides which scenario applies lives outside
//! this crate; it hands us a [`LoadScenario`] and we look up the weights.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scorer::ScoringError;

/// Traffic-load context the radio is operating in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadScenario {
    HighLoad,
    MediumLoad,
    LowLoad,
    NoLoad,
}

impl LoadScenario {
    pub const ALL: [LoadScenario; 4] = [
        LoadScenario::HighLoad,
        LoadScenario::MediumLoad,
        LoadScenario::LowLoad,
        LoadScenario::NoLoad,
    ];
}

impl fmt::Display for LoadScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadScenario::HighLoad => write!(f, "high_load"),
            LoadScenario::MediumLoad => write!(f, "medium_load"),
            LoadScenario::LowLoad => write!(f, "low_load"),
            LoadScenario::NoLoad => write!(f, "no_load"),
        }
    }
}

/// Weights applied to each scoring term.
///
/// Weights are not required to sum to one; the scorer divides by their
/// total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightProfile {
    /// Weight for the interference penalty.
    pub interference: f64,
    /// Weight for the airtime utilisation penalty.
    pub airtime: f64,
    /// Weight for the bandwidth reward.
    pub bandwidth: f64,
    /// Weight for the radar probability penalty.
    pub dfs: f64,
}

impl WeightProfile {
    pub const fn new(interference: f64, airtime: f64, bandwidth: f64, dfs: f64) -> Self {
        WeightProfile {
            interference,
            airtime,
            bandwidth,
            dfs,
        }
    }

    /// Sum of all four weights.
    pub fn total(&self) -> f64 {
        self.interference + self.airtime + self.bandwidth + self.dfs
    }

    /// Check every weight is finite and non-negative.
    pub fn validate(&self) -> Result<(), ScoringError> {
        for (field, value) in [
            ("w_interference", self.interference),
            ("w_airtime", self.airtime),
            ("w_bandwidth", self.bandwidth),
            ("w_dfs", self.dfs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringError::InvalidInput { field, value });
            }
        }
        Ok(())
    }
}

/// One [`WeightProfile`] per [`LoadScenario`].
///
/// Under load bandwidth dominates; with the medium idle interference and
/// airtime take over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    pub high_load: WeightProfile,
    pub medium_load: WeightProfile,
    pub low_load: WeightProfile,
    pub no_load: WeightProfile,
}

impl WeightTable {
    pub fn get(&self, scenario: LoadScenario) -> WeightProfile {
        match scenario {
            LoadScenario::HighLoad => self.high_load,
            LoadScenario::MediumLoad => self.medium_load,
            LoadScenario::LowLoad => self.low_load,
            LoadScenario::NoLoad => self.no_load,
        }
    }

    pub fn get_mut(&mut self, scenario: LoadScenario) -> &mut WeightProfile {
        match scenario {
            LoadScenario::HighLoad => &mut self.high_load,
            LoadScenario::MediumLoad => &mut self.medium_load,
            LoadScenario::LowLoad => &mut self.low_load,
            LoadScenario::NoLoad => &mut self.no_load,
        }
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        WeightTable {
            high_load: WeightProfile::new(0.25, 0.25, 0.45, 0.15),
            medium_load: WeightProfile::new(0.35, 0.25, 0.15, 0.25),
            low_load: WeightProfile::new(0.25, 0.25, 0.45, 0.15),
            no_load: WeightProfile::new(0.45, 0.375, 0.15, 0.125),
        }
    }
}
