use serde::{Deserialize, Serialize};

/// Style of lines used, when asking other party for more.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersuadeTechnique {
    Boring,
    Creative,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Probability (0-1) of opening with a question instead of a proposal.
    pub speaker_order: f64,
    pub persuade_technique: PersuadeTechnique,
    /// Points, that make offer acceptable without further bargaining.
    pub good_deal_threshold: i32,
    /// Seed for phrasing and opening choice. Random if not set.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            speaker_order: 0.5,
            persuade_technique: PersuadeTechnique::Boring,
            good_deal_threshold: 7,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_yaml(params: serde_yaml::Value) -> anyhow::Result<Config> {
        if params.is_null() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_value(params)?;
        if !(0.0..=1.0).contains(&config.speaker_order) {
            anyhow::bail!(
                "speaker_order should be probability in range [0, 1], got {}",
                config.speaker_order
            );
        }
        Ok(config)
    }
}
