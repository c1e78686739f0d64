//! Codec configuration.

use std::path::Path;

use huffpack_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::tree_codec::DecodeStrategy;

/// Options for [`HuffmanCodec`](crate::HuffmanCodec).
///
/// Every field has a default, so a partial JSON document is accepted:
///
/// ```
/// use huffpack::{DecodeStrategy, HuffmanConfig};
///
/// let config = HuffmanConfig::from_json(r#"{ "decode_strategy": "implicit_postorder" }"#).unwrap();
/// assert_eq!(config.decode_strategy, DecodeStrategy::ImplicitPostorder);
/// assert!(config.balance_tree);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuffmanConfig {
    /// Run the leaf balancer before extracting codes.
    #[serde(default = "default_balance_tree")]
    pub balance_tree: bool,

    /// Tree reconstruction convention used when decompressing.
    #[serde(default)]
    pub decode_strategy: DecodeStrategy,

    /// Check the generated codebook for the prefix property on compress.
    #[serde(default)]
    pub verify_prefix_free: bool,
}

impl Default for HuffmanConfig {
    fn default() -> Self {
        Self {
            balance_tree: default_balance_tree(),
            decode_strategy: DecodeStrategy::default(),
            verify_prefix_free: false,
        }
    }
}

impl HuffmanConfig {
    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Load a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Enable or disable the leaf balancer.
    pub fn with_balancing(mut self, enabled: bool) -> Self {
        self.balance_tree = enabled;
        self
    }

    /// Select the decode strategy.
    pub fn with_decode_strategy(mut self, strategy: DecodeStrategy) -> Self {
        self.decode_strategy = strategy;
        self
    }

    /// Enable or disable the prefix check.
    pub fn with_prefix_check(mut self, enabled: bool) -> Self {
        self.verify_prefix_free = enabled;
        self
    }
}

fn default_balance_tree() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let config = HuffmanConfig::from_json("{}").unwrap();
        assert_eq!(config, HuffmanConfig::default());
        assert_eq!(config.decode_strategy, DecodeStrategy::Indexed);
    }

    #[test]
    fn test_invalid_json() {
        let err = HuffmanConfig::from_json(r#"{ "decode_strategy": "sideways" }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_builder_and_serialize() {
        let config = HuffmanConfig::default()
            .with_balancing(false)
            .with_prefix_check(true)
            .with_decode_strategy(DecodeStrategy::ImplicitPostorder);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"implicit_postorder\""));
        assert_eq!(HuffmanConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = HuffmanConfig::from_file("/nonexistent/huffpack.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
