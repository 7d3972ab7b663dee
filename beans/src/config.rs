//! Factory configuration, loadable from YAML or JSON.

use crate::error::ConfigError;
use crate::strategy::StrategyKind;
use serde::Deserialize;

/// Settings for building a [`DefaultListableBeanFactory`](crate::DefaultListableBeanFactory).
///
/// ```yaml
/// strategy: direct   # or proxy_generating (the default)
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FactoryConfig {
  #[serde(default)]
  pub strategy: StrategyKind,
}

impl FactoryConfig {
  pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
    Ok(serde_yaml::from_str(source)?)
  }

  pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(source)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn parses_yaml_and_json() {
    let yaml = FactoryConfig::from_yaml_str("strategy: direct\n").unwrap();
    assert_eq!(yaml.strategy, StrategyKind::Direct);

    let json = FactoryConfig::from_json_str(r#"{ "strategy": "proxy_generating" }"#).unwrap();
    assert_eq!(json.strategy, StrategyKind::ProxyGenerating);
  }

  #[test]
  fn missing_strategy_defaults_to_proxy_generating() {
    let config = FactoryConfig::from_yaml_str("{}").unwrap();
    assert_eq!(config, FactoryConfig::default());
    assert_eq!(config.strategy, StrategyKind::ProxyGenerating);
  }

  #[test]
  fn rejects_unknown_fields_and_strategies() {
    assert!(matches!(
      FactoryConfig::from_yaml_str("strategy: direct\nscope: prototype\n"),
      Err(ConfigError::Yaml(_))
    ));
    assert!(matches!(
      FactoryConfig::from_json_str(r#"{ "strategy": "cglib" }"#),
      Err(ConfigError::Json(_))
    ));
  }
}
