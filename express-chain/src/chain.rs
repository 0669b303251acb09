//! The callback chain
//!
//! A `Chain` owns an `OrderedQueue` of boxed callbacks behind a single mutex.
//! `add` locks once per callback. `execute` pops and invokes callbacks on the
//! calling thread until one returns `Signal::Halt` or the queue runs dry.
//!
//! # Example
//!
//! ```
//! use express_chain::{Chain, Signal};
//!
//! let chain = Chain::new();
//! chain.add(|| Signal::Continue);
//! chain.add(|| Signal::Halt);
//! chain.add(|| Signal::Continue);
//!
//! let summary = chain.execute();
//! assert_eq!(summary.invoked, 2);
//! assert!(summary.halted);
//! assert_eq!(chain.len(), 1);
//! ```

use crate::config::{ChainConfig, LockScope};
use crate::queue::OrderedQueue;
use crate::types::{Callback, ExecutionSummary, Signal};
use chrono::Utc;
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

type CallbackQueue = OrderedQueue<Box<dyn Callback>>;

/// Ordered, thread-safe chain of callbacks
///
/// Shared between threads by reference (or inside an `Arc`). With the default
/// `LockScope::WholeDrain`, a callback that calls back into its own chain
/// deadlocks.
pub struct Chain {
    config: ChainConfig,
    queue: Mutex<CallbackQueue>,
}

impl Chain {
    /// Create an empty chain with default configuration
    pub fn new() -> Self {
        Self::with_config(ChainConfig::default())
    }

    /// Create an empty chain with the given configuration
    pub fn with_config(config: ChainConfig) -> Self {
        log::info!(
            "Creating chain '{}' (lock scope: {:?})",
            config.name,
            config.lock_scope
        );
        Self {
            config,
            queue: Mutex::new(OrderedQueue::new()),
        }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Queue a callback at the tail of the chain
    pub fn add<C>(&self, callback: C)
    where
        C: Callback + 'static,
    {
        self.add_boxed(Box::new(callback));
    }

    /// Queue an already boxed callback
    pub fn add_boxed(&self, callback: Box<dyn Callback>) {
        log::trace!("[{}] add '{}'", self.config.name, callback.name());
        self.lock().push(callback);
    }

    /// Queue a callback if one is present; `None` is ignored
    pub fn add_optional<C>(&self, callback: Option<C>)
    where
        C: Callback + 'static,
    {
        if let Some(callback) = callback {
            self.add(callback);
        }
    }

    /// Run one pass over the chain
    ///
    /// Callbacks are popped in FIFO order and invoked on the calling thread.
    /// The pass stops right after a callback returns `Signal::Halt`, leaving
    /// everything behind it queued, or when the queue is empty. An empty chain
    /// invokes nothing.
    pub fn execute(&self) -> ExecutionSummary {
        let started_at = Utc::now();

        let (invoked, halted, remaining) = match self.config.lock_scope {
            LockScope::WholeDrain => {
                let mut queue = self.lock();
                let (invoked, halted) = self.drain(|| queue.pop());
                (invoked, halted, queue.len())
            }
            LockScope::PerCallback => {
                let (invoked, halted) = self.drain(|| self.lock().pop());
                (invoked, halted, self.len())
            }
        };

        let summary = ExecutionSummary {
            invoked,
            halted,
            remaining,
            started_at,
            finished_at: Utc::now(),
        };
        log::debug!(
            "[{}] pass finished: invoked={} halted={} remaining={}",
            self.config.name,
            summary.invoked,
            summary.halted,
            summary.remaining
        );
        summary
    }

    /// Pop and invoke until `next` runs dry or a callback halts.
    /// Each callback is dropped right after it returns.
    fn drain<F>(&self, mut next: F) -> (usize, bool)
    where
        F: FnMut() -> Option<Box<dyn Callback>>,
    {
        let mut invoked = 0;
        while let Some(mut callback) = next() {
            let signal = callback.invoke();
            invoked += 1;
            log::trace!(
                "[{}] '{}' returned {}",
                self.config.name,
                callback.name(),
                signal
            );
            if signal == Signal::Halt {
                return (invoked, true);
            }
        }
        (invoked, false)
    }

    /// Number of queued callbacks
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Tear the chain down, releasing every queued callback
    ///
    /// Returns how many callbacks were released without running.
    pub fn destroy(self) -> usize {
        let released = self.lock().clear();
        log::info!(
            "Destroyed chain '{}' ({} pending callbacks released)",
            self.config.name,
            released
        );
        released
    }

    /// Acquire the queue lock
    ///
    /// A callback that panicked mid-pass poisons the mutex, but it had already
    /// been popped, so the queue is intact and the guard is recovered.
    fn lock(&self) -> MutexGuard<'_, CallbackQueue> {
        self.queue.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            log::warn!(
                "[{}] recovering chain lock poisoned by a panicking callback",
                self.config.name
            );
            poisoned.into_inner()
        })
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Chain {
    // Never blocks: a pass in progress holds the lock, possibly on this thread
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pending = match self.queue.try_lock() {
            Ok(queue) => Some(queue.len()),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner().len()),
            Err(TryLockError::WouldBlock) => None,
        };

        let mut debug = f.debug_struct("Chain");
        debug.field("config", &self.config);
        match pending {
            Some(pending) => debug.field("pending", &pending),
            None => debug.field("pending", &format_args!("<locked>")),
        };
        debug.finish()
    }
}
