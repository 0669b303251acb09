//! Named callback factories
//!
//! Lets an application describe a chain as a list of names (from a config
//! file or the command line) and build it from registered factories.

use crate::chain::Chain;
use crate::config::ChainConfig;
use crate::types::{Callback, ChainError, Result};
use std::collections::HashMap;

type Factory = Box<dyn Fn() -> Box<dyn Callback> + Send + Sync>;

/// Registry mapping callback names to factories
#[derive(Default)]
pub struct CallbackRegistry {
    factories: HashMap<String, Factory>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`
    ///
    /// # Errors
    /// `ChainError::DuplicateCallback` if the name is already taken.
    pub fn register<F, C>(&mut self, name: impl Into<String>, factory: F) -> Result<()>
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: Callback + 'static,
    {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(ChainError::DuplicateCallback(name));
        }
        log::debug!("Registered callback '{}'", name);
        self.factories
            .insert(name, Box::new(move || Box::new(factory()) as Box<dyn Callback>));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Create a fresh callback instance for `name`
    pub fn create(&self, name: &str) -> Result<Box<dyn Callback>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| ChainError::UnknownCallback(name.to_string()))
    }

    /// Build a chain holding one callback per name, in order
    ///
    /// Every name is checked before the chain is created, so an unknown name
    /// fails without side effects.
    pub fn build_chain<S: AsRef<str>>(&self, names: &[S], config: ChainConfig) -> Result<Chain> {
        let names: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();
        if let Some(unknown) = names.iter().find(|name| !self.contains(name)) {
            return Err(ChainError::UnknownCallback(unknown.to_string()));
        }

        let chain = Chain::with_config(config);
        for name in names {
            chain.add_boxed(self.create(name)?);
        }
        Ok(chain)
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("names", &self.names())
            .finish()
    }
}
