//! # Channel Scoring
//!
//! Composite desirability score in `[0, 1]` for a candidate channel.
//!
//! $$S(c) = \frac{w_{bw} \cdot BW + w_{intf} (1 - I) + w_{air} (1 - A) + w_{dfs} (1 - P_{radar})}{w_{intf} + w_{air} + w_{bw} + w_{dfs}}$$
//!
//! Interference, airtime and radar probability are penalties; bandwidth is
//! the only reward. Dividing by the weight total keeps scores comparable
//! across weight profiles that do not sum to one. A profile whose weights
//! are all zero scores every channel `0`.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::channel::{Channel, ChannelMetrics};
use crate::profile::WeightProfile;

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("invalid input: {field} = {value}")]
    InvalidInput { field: &'static str, value: f64 },
    #[error("no candidate channels")]
    EmptyInput,
}

// ── Scoring ─────────────────────────────────────────────────────────

/// A channel together with the metrics it was scored on and its score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredChannel {
    pub channel: Channel,
    pub metrics: ChannelMetrics,
    pub score: f64,
}

/// Score one channel. Pure; identical inputs give identical results.
///
/// `channel` does not enter the formula; it is accepted so the call reads
/// the same as the per-channel formula and shows up in error traces.
pub fn score(
    channel: Channel,
    metrics: &ChannelMetrics,
    weights: &WeightProfile,
) -> Result<f64, ScoringError> {
    metrics.validate().inspect_err(|e| {
        tracing::debug!(channel = channel.number, error = %e, "rejecting channel metrics");
    })?;
    weights.validate()?;

    let total = weights.total();
    if total <= 0.0 {
        return Ok(0.0);
    }

    let raw = weights.bandwidth * metrics.bandwidth_score
        + weights.interference * (1.0 - metrics.interference)
        + weights.airtime * (1.0 - metrics.airtime_utilization)
        + weights.dfs * (1.0 - metrics.dfs_radar_probability);

    Ok((raw / total).clamp(0.0, 1.0))
}

/// Score and sort candidates, best first.
///
/// Ties are broken by ascending channel number. Fails without partial
/// output if any candidate is invalid or a channel number repeats.
pub fn rank(
    candidates: &[(Channel, ChannelMetrics)],
    weights: &WeightProfile,
) -> Result<Vec<ScoredChannel>, ScoringError> {
    if candidates.is_empty() {
        return Err(ScoringError::EmptyInput);
    }

    let mut seen = HashSet::with_capacity(candidates.len());
    if let Some((dup, _)) = candidates.iter().find(|(channel, _)| !seen.insert(*channel)) {
        return Err(ScoringError::InvalidInput {
            field: "channel",
            value: f64::from(dup.number),
        });
    }

    let mut ranked = candidates
        .iter()
        .map(|(channel, metrics)| {
            score(*channel, metrics, weights).map(|score| ScoredChannel {
                channel: *channel,
                metrics: *metrics,
                score,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    ranked.sort_by(compare_scored);

    if let Some(best) = ranked.first() {
        tracing::debug!(
            candidates = ranked.len(),
            best = best.channel.number,
            score = best.score,
            "ranked fallback candidates"
        );
    }

    Ok(ranked)
}

/// Descending score, then ascending channel number.
fn compare_scored(a: &ScoredChannel, b: &ScoredChannel) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.channel.cmp(&b.channel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{LoadScenario, WeightTable};

    fn high_load() -> WeightProfile {
        WeightTable::default().get(LoadScenario::HighLoad)
    }

    // ─── Score ──────────────────────────────────────────────────────────

    #[test]
    fn perfect_channel_scores_one() {
        let m = ChannelMetrics::new(0.0, 0.0, 0.0, 1.0);
        let s = score(Channel::new(36), &m, &high_load()).unwrap();
        assert!((s - 1.0).abs() < 1e-12);
    }

    #[test]
    fn worst_channel_scores_zero() {
        let m = ChannelMetrics::new(1.0, 1.0, 1.0, 0.0);
        let s = score(Channel::new(52), &m, &high_load()).unwrap();
        assert_eq!(s, 0.0);
    }

    #[test]
    fn score_matches_formula() {
        // ch48 under high load: (0.054 + 0.0875 + 0.2375 + 0.03) / 1.1
        let m = ChannelMetrics::new(0.65, 0.8, 0.05, 0.12);
        let s = score(Channel::new(48), &m, &high_load()).unwrap();
        assert!((s - 0.409 / 1.1).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn zero_weights_score_zero() {
        let m = ChannelMetrics::new(0.1, 0.1, 0.1, 0.9);
        let w = WeightProfile::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(score(Channel::new(36), &m, &w).unwrap(), 0.0);
    }

    #[test]
    fn scaling_weights_does_not_change_score() {
        let m = ChannelMetrics::new(0.2, 0.7, 0.15, 0.25);
        let w = high_load();
        let doubled = WeightProfile::new(
            w.interference * 2.0,
            w.airtime * 2.0,
            w.bandwidth * 2.0,
            w.dfs * 2.0,
        );
        let a = score(Channel::new(56), &m, &w).unwrap();
        let b = score(Channel::new(56), &m, &doubled).unwrap();
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn interference_out_of_range_rejected() {
        let m = ChannelMetrics::new(1.5, 0.1, 0.1, 0.5);
        let err = score(Channel::new(36), &m, &high_load()).unwrap_err();
        assert_eq!(
            err,
            ScoringError::InvalidInput {
                field: "interference",
                value: 1.5
            }
        );
    }

    #[test]
    fn negative_weight_rejected() {
        let m = ChannelMetrics::new(0.1, 0.1, 0.1, 0.5);
        let w = WeightProfile::new(0.25, 0.25, -0.45, 0.15);
        assert!(matches!(
            score(Channel::new(36), &m, &w),
            Err(ScoringError::InvalidInput {
                field: "w_bandwidth",
                ..
            })
        ));
    }

    // ─── Rank ───────────────────────────────────────────────────────────

    #[test]
    fn low_interference_channel_beats_noisy_one() {
        let candidates = [
            (Channel::new(48), ChannelMetrics::new(0.65, 0.8, 0.05, 0.12)),
            (Channel::new(60), ChannelMetrics::new(0.05, 0.5, 0.05, 0.40)),
        ];
        let ranked = rank(&candidates, &high_load()).unwrap();
        assert_eq!(ranked[0].channel, Channel::new(60));
        assert_eq!(ranked[1].channel, Channel::new(48));
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn empty_candidates_rejected() {
        assert_eq!(rank(&[], &high_load()), Err(ScoringError::EmptyInput));
    }

    #[test]
    fn ties_break_by_ascending_channel() {
        // Swapping interference and airtime under equal weights gives the
        // same score bit for bit.
        let w = WeightProfile::new(0.25, 0.25, 0.25, 0.25);
        let candidates = [
            (Channel::new(112), ChannelMetrics::new(0.25, 0.25, 0.5, 0.5)),
            (Channel::new(40), ChannelMetrics::new(0.5, 0.25, 0.25, 0.5)),
            (Channel::new(64), ChannelMetrics::new(0.25, 0.25, 0.5, 0.5)),
        ];
        let ranked = rank(&candidates, &w).unwrap();
        assert_eq!(ranked[0].score, ranked[1].score);
        assert_eq!(ranked[1].score, ranked[2].score);
        let order: Vec<u16> = ranked.iter().map(|s| s.channel.number).collect();
        assert_eq!(order, vec![40, 64, 112]);
    }

    #[test]
    fn repeated_channel_rejected() {
        let m = ChannelMetrics::new(0.1, 0.0, 0.1, 0.5);
        let candidates = [
            (Channel::new(36), m),
            (Channel::new(100), m),
            (Channel::new(36), ChannelMetrics::new(0.3, 0.0, 0.1, 0.5)),
        ];
        assert_eq!(
            rank(&candidates, &high_load()),
            Err(ScoringError::InvalidInput {
                field: "channel",
                value: 36.0
            })
        );
    }

    #[test]
    fn one_invalid_candidate_fails_whole_ranking() {
        let candidates = [
            (Channel::new(36), ChannelMetrics::new(0.1, 0.0, 0.1, 0.5)),
            (Channel::new(40), ChannelMetrics::new(0.1, 0.0, 2.0, 0.5)),
        ];
        assert!(matches!(
            rank(&candidates, &high_load()),
            Err(ScoringError::InvalidInput { .. })
        ));
    }

    #[test]
    fn ranking_keeps_metrics_snapshot() {
        let m = ChannelMetrics::new(0.08, 0.12, 0.08, 0.75);
        let ranked = rank(&[(Channel::new(106), m)], &high_load()).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].metrics, m);
    }
}
