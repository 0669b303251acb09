//! Chain configuration types
//!
//! A chain needs very little configuration: a label for log output and the
//! scope of its lock during `execute`.

use crate::types::{ChainError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Label used in log lines
    #[serde(default = "default_name")]
    pub name: String,

    /// How long `execute` holds the chain lock
    #[serde(default)]
    pub lock_scope: LockScope,
}

fn default_name() -> String {
    "express".to_string()
}

/// How long `Chain::execute` holds the chain lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LockScope {
    /// One lock hold for the whole pass. `add` and `execute` from other
    /// threads block until the pass ends; callbacks must not touch the
    /// chain they run on.
    #[default]
    WholeDrain,
    /// The lock is taken only to pop each callback, which then runs unlocked.
    /// Callbacks may `add` to their own chain, and concurrent passes share
    /// the queue (every callback still runs at most once).
    PerCallback,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            lock_scope: LockScope::default(),
        }
    }
}

impl ChainConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the chain label
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder method: set the lock scope
    pub fn with_lock_scope(mut self, scope: LockScope) -> Self {
        self.lock_scope = scope;
        self
    }

    /// Reject configurations the chain cannot log sensibly
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ChainError::InvalidConfig(
                "chain name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
