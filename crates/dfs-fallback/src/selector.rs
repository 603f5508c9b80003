//! # Fallback Selector
//!
//! Reacts to radar detections by vacating the affected channel and picking
//! the best remaining candidate.
//!
//! A channel hit by radar goes on the non-occupancy list (NOL) and may not be
//! selected again until its non-occupancy period has elapsed. The detection
//! source (radar pulse classifier) and the load classifier are external; the
//! caller passes the detection, the current candidate metrics, and the load
//! scenario in.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::channel::{Channel, ChannelMetrics};
use crate::profile::{LoadScenario, WeightTable};
use crate::scorer::{rank, ScoredChannel, ScoringError};

/// Regulatory non-occupancy period after a radar hit (FCC/ETSI).
pub const NON_OCCUPANCY_PERIOD: Duration = Duration::from_secs(30 * 60);

/// Configuration for the selector.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorConfig {
    /// Weights per load scenario.
    pub weights: WeightTable,
    /// How long a radar-hit channel stays barred.
    pub non_occupancy: Duration,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        SelectorConfig {
            weights: WeightTable::default(),
            non_occupancy: NON_OCCUPANCY_PERIOD,
        }
    }
}

/// Outcome of handling one radar detection.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackDecision {
    /// Channel the radio must leave.
    pub vacated: Channel,
    /// Channel to switch to.
    pub target: ScoredChannel,
    /// All eligible candidates, best first. `ranking[0] == target`.
    pub ranking: Vec<ScoredChannel>,
}

/// Tracks barred channels and selects fallbacks.
#[derive(Debug, Clone)]
pub struct FallbackSelector {
    config: SelectorConfig,
    /// Channel number → instant the bar lifts. `None` bars indefinitely,
    /// used when the period runs past what `Instant` can represent.
    nol: HashMap<u16, Option<Instant>>,
}

impl FallbackSelector {
    pub fn new(config: SelectorConfig) -> Self {
        FallbackSelector {
            config,
            nol: HashMap::new(),
        }
    }

    /// Handle radar detected on `current` at `now`.
    ///
    /// The channel is barred even if no fallback can be found: the radio
    /// has to vacate regardless.
    pub fn on_radar(
        &mut self,
        current: Channel,
        candidates: &[(Channel, ChannelMetrics)],
        scenario: LoadScenario,
        now: Instant,
    ) -> Result<FallbackDecision, ScoringError> {
        self.mark_radar(current, now);

        let eligible: Vec<(Channel, ChannelMetrics)> = candidates
            .iter()
            .filter(|(channel, _)| *channel != current && !self.is_blocked(*channel, now))
            .copied()
            .collect();

        if eligible.is_empty() {
            tracing::warn!(
                vacated = current.number,
                candidates = candidates.len(),
                "no eligible fallback channel"
            );
            return Err(ScoringError::EmptyInput);
        }

        let weights = self.config.weights.get(scenario);
        let ranking = rank(&eligible, &weights)?;
        let target = ranking.first().copied().ok_or(ScoringError::EmptyInput)?;

        tracing::info!(
            vacated = current.number,
            target = target.channel.number,
            score = target.score,
            %scenario,
            eligible = ranking.len(),
            "radar detected, switching channel"
        );

        Ok(FallbackDecision {
            vacated: current,
            target,
            ranking,
        })
    }

    /// Put `channel` on the non-occupancy list starting at `now`.
    pub fn mark_radar(&mut self, channel: Channel, now: Instant) {
        let until = now.checked_add(self.config.non_occupancy);
        if until.is_none() {
            tracing::warn!(
                channel = channel.number,
                non_occupancy_secs = self.config.non_occupancy.as_secs(),
                "non-occupancy deadline unrepresentable, barring indefinitely"
            );
        }
        self.nol
            .entry(channel.number)
            .and_modify(|t| *t = later(*t, until))
            .or_insert(until);
    }

    /// Whether `channel` is still inside its non-occupancy period.
    pub fn is_blocked(&self, channel: Channel, now: Instant) -> bool {
        self.nol
            .get(&channel.number)
            .is_some_and(|until| still_barred(*until, now))
    }

    /// Barred channels at `now`, ascending.
    pub fn blocked_channels(&self, now: Instant) -> Vec<Channel> {
        let mut out: Vec<Channel> = self
            .nol
            .iter()
            .filter(|(_, until)| still_barred(**until, now))
            .map(|(number, _)| Channel::new(*number))
            .collect();
        out.sort();
        out
    }

    /// Drop entries whose period has elapsed. Returns the channels freed.
    pub fn expire(&mut self, now: Instant) -> Vec<Channel> {
        let mut freed: Vec<Channel> = self
            .nol
            .iter()
            .filter(|(_, until)| !still_barred(**until, now))
            .map(|(number, _)| Channel::new(*number))
            .collect();
        freed.sort();
        for channel in &freed {
            self.nol.remove(&channel.number);
            tracing::debug!(channel = channel.number, "non-occupancy period elapsed");
        }
        freed
    }
}

fn still_barred(until: Option<Instant>, now: Instant) -> bool {
    until.is_none_or(|t| now < t)
}

/// The later of two deadlines, where `None` is "never".
fn later(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        _ => None,
    }
}

impl Default for FallbackSelector {
    fn default() -> Self {
        Self::new(SelectorConfig::default())
    }
}
