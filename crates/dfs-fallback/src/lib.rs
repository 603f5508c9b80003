//! Fallback channel selection for 5 GHz access points.
//!
//! When radar is detected on a DFS channel the radio must vacate it. This
//! crate contains:
//! - **Channels** — 5 GHz channel numbering, UNII band and DFS membership
//! - **Scoring** — weighted desirability score and ranking of candidates
//! - **Profiles** — per-load-scenario weight tables
//! - **Radar history** — Gaussian model of historic radar probability
//! - **Selector** — radar event handling with a non-occupancy list
//! - **Config** — TOML configuration for weights and selector timing

pub mod channel;
pub mod config;
pub mod profile;
pub mod radar;
pub mod scorer;
pub mod selector;

pub use channel::{Channel, ChannelMetrics, UniiBand};
pub use profile::{LoadScenario, WeightProfile, WeightTable};
pub use scorer::{rank, score, ScoredChannel, ScoringError};
pub use selector::{FallbackDecision, FallbackSelector, SelectorConfig};
