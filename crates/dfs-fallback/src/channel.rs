//! # 5 GHz Channels
//!
//! Channel numbering and per-channel measurements.
//!
//! | Band    | Channels  | DFS |
//! |---------|-----------|-----|
//! | UNII-1  | 32–48     | no  |
//! | UNII-2A | 50–64     | yes |
//! | UNII-2C | 96–144    | yes |
//! | UNII-3  | 149–177   | no  |
//!
//! Channel numbers map to centre frequency as `5000 + 5 * n` MHz.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scorer::ScoringError;

// ─── Bands ──────────────────────────────────────────────────────────────────

/// UNII sub-band of the 5 GHz spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UniiBand {
    Unii1,
    Unii2A,
    Unii2C,
    Unii3,
}

impl UniiBand {
    /// Whether radios must run DFS (radar detection) in this band.
    pub fn requires_dfs(self) -> bool {
        matches!(self, UniiBand::Unii2A | UniiBand::Unii2C)
    }
}

impl fmt::Display for UniiBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniiBand::Unii1 => write!(f, "UNII-1"),
            UniiBand::Unii2A => write!(f, "UNII-2A"),
            UniiBand::Unii2C => write!(f, "UNII-2C"),
            UniiBand::Unii3 => write!(f, "UNII-3"),
        }
    }
}

// ─── Channel ────────────────────────────────────────────────────────────────

/// A 5 GHz channel identified by its IEEE channel number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Channel {
    pub number: u16,
}

impl Channel {
    pub const fn new(number: u16) -> Self {
        Channel { number }
    }

    /// Centre frequency in MHz.
    pub fn freq_mhz(self) -> u32 {
        5000 + 5 * u32::from(self.number)
    }

    /// UNII band this channel falls in, if any.
    pub fn band(self) -> Option<UniiBand> {
        match self.number {
            32..=48 => Some(UniiBand::Unii1),
            50..=64 => Some(UniiBand::Unii2A),
            96..=144 => Some(UniiBand::Unii2C),
            149..=177 => Some(UniiBand::Unii3),
            _ => None,
        }
    }

    /// Whether operating on this channel requires DFS.
    pub fn requires_dfs(self) -> bool {
        self.band().is_some_and(UniiBand::requires_dfs)
    }
}

impl From<u16> for Channel {
    fn from(number: u16) -> Self {
        Channel::new(number)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch{} ({}MHz)", self.number, self.freq_mhz())
    }
}

// ─── Metrics ────────────────────────────────────────────────────────────────

/// Normalised measurements for one candidate channel.
///
/// All fields are in `[0, 1]`. Normalisation is the caller's job; scoring
/// rejects anything out of range rather than clamping it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChannelMetrics {
    /// Co-/adjacent-channel interference. Higher is worse.
    pub interference: f64,
    /// Historic probability of a radar event on this channel.
    pub dfs_radar_probability: f64,
    /// Fraction of time the medium was observed busy.
    pub airtime_utilization: f64,
    /// Usable spectral width. Higher is better.
    pub bandwidth_score: f64,
}

impl ChannelMetrics {
    pub fn new(
        interference: f64,
        dfs_radar_probability: f64,
        airtime_utilization: f64,
        bandwidth_score: f64,
    ) -> Self {
        ChannelMetrics {
            interference,
            dfs_radar_probability,
            airtime_utilization,
            bandwidth_score,
        }
    }

    /// Check every component is finite and within `[0, 1]`.
    pub fn validate(&self) -> Result<(), ScoringError> {
        unit_interval("interference", self.interference)?;
        unit_interval("dfs_radar_probability", self.dfs_radar_probability)?;
        unit_interval("airtime_utilization", self.airtime_utilization)?;
        unit_interval("bandwidth_score", self.bandwidth_score)?;
        Ok(())
    }
}

fn unit_interval(field: &'static str, value: f64) -> Result<(), ScoringError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ScoringError::InvalidInput { field, value })
    }
}
