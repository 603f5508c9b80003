use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::profile::{LoadScenario, WeightProfile};
use crate::scorer::ScoringError;
use crate::selector::SelectorConfig;

pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unsupported config version {0}")]
    UnsupportedVersion(u32),
    #[error("invalid {scenario} weights: {source}")]
    InvalidWeight {
        scenario: LoadScenario,
        source: ScoringError,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigInput {
    pub version: u32,
    pub selector: SelectorInput,
    pub weights: WeightsInput,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SelectorInput {
    pub non_occupancy_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WeightsInput {
    pub high_load: WeightProfileInput,
    pub medium_load: WeightProfileInput,
    pub low_load: WeightProfileInput,
    pub no_load: WeightProfileInput,
}

impl WeightsInput {
    fn get(&self, scenario: LoadScenario) -> &WeightProfileInput {
        match scenario {
            LoadScenario::HighLoad => &self.high_load,
            LoadScenario::MediumLoad => &self.medium_load,
            LoadScenario::LowLoad => &self.low_load,
            LoadScenario::NoLoad => &self.no_load,
        }
    }
}

/// Per-scenario overrides; unset fields keep the built-in weight.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WeightProfileInput {
    pub interference: Option<f64>,
    pub airtime: Option<f64>,
    pub bandwidth: Option<f64>,
    pub dfs: Option<f64>,
}

impl WeightProfileInput {
    fn apply(&self, base: WeightProfile) -> WeightProfile {
        WeightProfile {
            interference: self.interference.unwrap_or(base.interference),
            airtime: self.airtime.unwrap_or(base.airtime),
            bandwidth: self.bandwidth.unwrap_or(base.bandwidth),
            dfs: self.dfs.unwrap_or(base.dfs),
        }
    }
}

impl ConfigInput {
    pub fn resolve(self) -> Result<SelectorConfig, ConfigError> {
        let version = if self.version == 0 {
            CONFIG_VERSION
        } else {
            self.version
        };
        if version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion(version));
        }

        let mut config = SelectorConfig::default();

        if let Some(secs) = self.selector.non_occupancy_secs {
            config.non_occupancy = Duration::from_secs(secs);
        }

        for scenario in LoadScenario::ALL {
            let profile = config.weights.get_mut(scenario);
            *profile = self.weights.get(scenario).apply(*profile);
            profile
                .validate()
                .map_err(|source| ConfigError::InvalidWeight { scenario, source })?;
        }

        Ok(config)
    }
}

impl SelectorConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        if input.trim().is_empty() {
            return Ok(SelectorConfig::default());
        }
        let parsed: ConfigInput = toml::from_str(input)?;
        parsed.resolve()
    }
}
