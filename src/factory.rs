use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::negotiators::NegotiatorAddr;

use barter_builtin_negotiators::RuleBased;
use barter_negotiator_component::{DialogueNegotiator, OfferTracker, Tokenizer, Valuation};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NegotiatorConfig {
    pub name: String,
    #[serde(default)]
    pub params: serde_yaml::Value,
}

/// Everything agent needs to join conversation: policy to use and its
/// private knowledge about items.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AgentConfig {
    pub negotiator: NegotiatorConfig,
    #[serde(flatten)]
    pub valuation: Valuation,
}

impl AgentConfig {
    pub fn from_yaml_str(config: &str) -> anyhow::Result<AgentConfig> {
        let config: AgentConfig = serde_yaml::from_str(config)?;
        config.valuation.check()?;
        Ok(config)
    }
}

pub fn create_negotiator(
    config: AgentConfig,
    tokenizer: Box<dyn Tokenizer>,
    tracker: Box<dyn OfferTracker>,
) -> anyhow::Result<Arc<NegotiatorAddr>> {
    let negotiator = create_builtin(
        &config.negotiator.name,
        config.negotiator.params,
        config.valuation,
        tokenizer,
        tracker,
    )?;
    Ok(Arc::new(NegotiatorAddr::from(negotiator)))
}

pub fn create_builtin(
    name: &str,
    params: serde_yaml::Value,
    valuation: Valuation,
    tokenizer: Box<dyn Tokenizer>,
    tracker: Box<dyn OfferTracker>,
) -> anyhow::Result<Box<dyn DialogueNegotiator>> {
    let negotiator = match name {
        "RuleBased" => Box::new(RuleBased::new(params, valuation, tokenizer, tracker)?)
            as Box<dyn DialogueNegotiator>,
        _ => bail!("BuiltIn negotiator {} doesn't exists.", &name),
    };
    Ok(negotiator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use barter_negotiator_component::ItemMap;
    use barter_negotiators_testing::{ScriptedTracker, SimpleTokenizer};

    const AGENT_CONFIG: &str = r#"
negotiator:
  name: RuleBased
  params:
    speaker_order: 0.0
    persuade_technique: creative
    seed: 7
item_values:
  book: 8
  hat: 1
  ball: 1
item_counts:
  book: 1
  hat: 2
  ball: 2
"#;

    fn collaborators() -> (Box<dyn Tokenizer>, Box<dyn OfferTracker>) {
        let (tracker, _script) = ScriptedTracker::new();
        (Box::new(SimpleTokenizer::default()), Box::new(tracker))
    }

    #[test]
    fn test_agent_config_from_yaml() {
        let config = AgentConfig::from_yaml_str(AGENT_CONFIG).unwrap();

        assert_eq!(config.negotiator.name, "RuleBased");
        assert_eq!(config.valuation.values, ItemMap::new(8, 1, 1));
        assert_eq!(config.valuation.counts, ItemMap::new(1, 2, 2));
    }

    #[test]
    fn test_negative_counts_rejected() {
        let config = AGENT_CONFIG.replace("ball: 2", "ball: -2");
        assert!(AgentConfig::from_yaml_str(&config).is_err());
    }

    #[test]
    fn test_unknown_builtin() {
        let config = AgentConfig::from_yaml_str(AGENT_CONFIG).unwrap();
        let (tokenizer, tracker) = collaborators();

        let result = create_builtin(
            "AcceptAll",
            serde_yaml::Value::Null,
            config.valuation,
            tokenizer,
            tracker,
        );
        assert!(result.is_err());
    }

    #[actix_rt::test]
    async fn test_create_negotiator() {
        let config = AgentConfig::from_yaml_str(AGENT_CONFIG).unwrap();
        let (tokenizer, tracker) = collaborators();

        let addr = create_negotiator(config, tokenizer, tracker).unwrap();
        let action = addr.send().await.unwrap();
        assert!(!action.is_final());
    }
}
