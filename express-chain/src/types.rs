//! Core types for the express chain library
//!
//! This module defines the execution signal returned by callbacks, the
//! `Callback` capability itself, the per-pass execution summary and the
//! library error type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp type used in execution summaries
pub type Timestamp = DateTime<Utc>;

/// Result type for chain operations
pub type Result<T> = std::result::Result<T, ChainError>;

/// Signal returned by a callback, telling the chain what to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    /// Keep draining the chain
    #[default]
    Continue,
    /// Stop the current pass, leaving the remaining callbacks queued
    Halt,
}

impl Signal {
    /// True if this signal stops the current pass
    pub fn is_halt(self) -> bool {
        self == Signal::Halt
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Continue => write!(f, "continue"),
            Signal::Halt => write!(f, "halt"),
        }
    }
}

/// A zero-argument operation queued on a chain
///
/// Any `FnMut() -> Signal + Send` closure is a callback. Implement the trait
/// directly for function objects that want a stable name in the logs.
pub trait Callback: Send {
    /// Run the callback and report whether the chain should continue
    fn invoke(&mut self) -> Signal;

    /// Name used when logging invocations
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Callback for F
where
    F: FnMut() -> Signal + Send,
{
    fn invoke(&mut self) -> Signal {
        self()
    }
}

impl fmt::Debug for dyn Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").field("name", &self.name()).finish()
    }
}

/// Wraps a callback with an explicit display name
pub struct NamedCallback<C> {
    name: String,
    inner: C,
}

impl<C: Callback> NamedCallback<C> {
    /// Attach `name` to `inner`
    pub fn new(name: impl Into<String>, inner: C) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }
}

impl<C: Callback> Callback for NamedCallback<C> {
    fn invoke(&mut self) -> Signal {
        self.inner.invoke()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Outcome of a single `Chain::execute` pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    /// Number of callbacks invoked during the pass
    pub invoked: usize,
    /// True if a callback returned `Signal::Halt`
    pub halted: bool,
    /// Callbacks still queued when the pass ended
    pub remaining: usize,
    /// When the pass acquired the chain
    pub started_at: Timestamp,
    /// When the pass released the chain
    pub finished_at: Timestamp,
}

impl ExecutionSummary {
    /// Wall-clock time spent in the pass
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// True if the pass drained the chain without a halt
    pub fn completed(&self) -> bool {
        !self.halted && self.remaining == 0
    }
}

/// Errors reported by the registry and configuration layers
///
/// The chain itself never fails on its normal path.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("Unknown callback: {0}")]
    UnknownCallback(String),

    #[error("Callback already registered: {0}")]
    DuplicateCallback(String),

    #[error("Invalid chain configuration: {0}")]
    InvalidConfig(String),
}
