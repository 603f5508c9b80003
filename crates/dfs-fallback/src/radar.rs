//! # Radar History
//!
//! Historic radar probability modelled as a Gaussian over channel numbers,
//! centred on the channel where radar was last detected.
//!
//! Two estimators are provided:
//! - [`RadarModel::probability`] — closed form, density divided by its peak
//! - [`RadarModel::estimate`] — seeded Monte-Carlo histogram, for when the
//!   model is replaced by replayed detection logs and the two need comparing
//!
//! Channels outside the DFS bands always get probability `0`: radios there
//! never run radar detection, so there is no history to speak of.

use rand::RngExt as _;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::channel::{Channel, ChannelMetrics};
use crate::scorer::ScoringError;

/// Default spread (in channel numbers) of historic detections.
pub const DEFAULT_SPREAD: f64 = 1.5;

/// Half the width of a 20 MHz channel in channel-number units.
pub const CHANNEL_HALF_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarModel {
    center: f64,
    spread: f64,
}

impl RadarModel {
    pub fn new(center: f64, spread: f64) -> Result<Self, ScoringError> {
        if !center.is_finite() {
            return Err(ScoringError::InvalidInput {
                field: "radar_center",
                value: center,
            });
        }
        if !spread.is_finite() || spread <= 0.0 {
            return Err(ScoringError::InvalidInput {
                field: "radar_spread",
                value: spread,
            });
        }
        Ok(RadarModel { center, spread })
    }

    /// Model centred on `channel` with [`DEFAULT_SPREAD`].
    pub fn around(channel: Channel) -> Self {
        RadarModel {
            center: f64::from(channel.number),
            spread: DEFAULT_SPREAD,
        }
    }

    /// Gaussian probability density at channel number `x`.
    pub fn pdf(&self, x: f64) -> f64 {
        let z = (x - self.center) / self.spread;
        (-0.5 * z * z).exp() / (self.spread * (2.0 * std::f64::consts::PI).sqrt())
    }

    /// Radar probability for `channel`, normalised so the centre is `1.0`.
    pub fn probability(&self, channel: Channel) -> f64 {
        if !channel.requires_dfs() {
            return 0.0;
        }
        self.pdf(f64::from(channel.number)) / self.pdf(self.center)
    }

    /// Overwrite `dfs_radar_probability` of each candidate with
    /// [`probability`](Self::probability).
    pub fn annotate(&self, candidates: &mut [(Channel, ChannelMetrics)]) {
        for (channel, metrics) in candidates.iter_mut() {
            metrics.dfs_radar_probability = self.probability(*channel);
        }
    }

    /// Monte-Carlo estimate of radar probability per channel.
    ///
    /// Draws `samples` detections, counts those landing within
    /// [`CHANNEL_HALF_WIDTH`] of each DFS channel, and normalises by the
    /// busiest channel. Output order follows `channels`.
    pub fn estimate(
        &self,
        channels: &[Channel],
        samples: usize,
        seed: u64,
    ) -> Result<Vec<(Channel, f64)>, ScoringError> {
        if channels.is_empty() || samples == 0 {
            return Err(ScoringError::EmptyInput);
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut counts = vec![0u64; channels.len()];

        for _ in 0..samples {
            let x = self.center + self.spread * standard_normal(&mut rng);
            for (count, channel) in counts.iter_mut().zip(channels) {
                if channel.requires_dfs()
                    && (x - f64::from(channel.number)).abs() <= CHANNEL_HALF_WIDTH
                {
                    *count += 1;
                }
            }
        }

        let peak = counts.iter().copied().max().unwrap_or(0);
        tracing::debug!(
            center = self.center,
            spread = self.spread,
            samples,
            peak,
            "radar history histogram built"
        );

        Ok(channels
            .iter()
            .zip(counts)
            .map(|(channel, count)| {
                let p = if peak == 0 {
                    0.0
                } else {
                    count as f64 / peak as f64
                };
                (*channel, p)
            })
            .collect())
    }
}

/// Box–Muller transform.
fn standard_normal(rng: &mut StdRng) -> f64 {
    // `random` yields [0, 1); flip it so ln never sees zero.
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
