//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use nis_types::{ChainParams, NetworkId};

use crate::logging::LogFormat;
use crate::NodeError;

/// Configuration for a NIS node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Which network transactions and blocks must belong to.
    #[serde(default = "default_network")]
    pub network: NetworkId,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Threads used for parallel transaction validation; 0 picks one per core.
    #[serde(default)]
    pub validation_workers: usize,

    /// Maximum number of transactions held in the unconfirmed pool.
    #[serde(default = "default_unconfirmed_capacity")]
    pub unconfirmed_capacity: usize,

    /// Chain parameters; any omitted key keeps its default.
    #[serde(default)]
    pub chain: ChainParams,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_network() -> NetworkId {
    NetworkId::Test
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_unconfirmed_capacity() -> usize {
    10_000
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| NodeError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    pub fn log_format(&self) -> Result<LogFormat, NodeError> {
        self.log_format.parse()
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            validation_workers: 0,
            unconfirmed_capacity: default_unconfirmed_capacity(),
            chain: ChainParams::default(),
        }
    }
}
