//! Express Chain Library
//!
//! A minimal sequential callback-chain executor. Callbacks are queued in
//! order, then one `execute` pass invokes them one at a time until a callback
//! returns `Signal::Halt` or the chain is empty.
//!
//! # Architecture
//!
//! - `OrderedQueue`: an owning FIFO of pending callbacks
//! - `Chain`: the queue behind a single mutex, plus the drain loop
//! - `CallbackRegistry`: named factories for building chains from config
//!
//! The library does NOT:
//! - Reorder or prioritise callbacks
//! - Cancel or time out a running callback
//! - Retry callbacks or persist the queue
//!
//! # Example Usage
//!
//! ```
//! use express_chain::{Chain, ChainConfig, LockScope, Signal};
//!
//! let chain = Chain::with_config(
//!     ChainConfig::new()
//!         .with_name("startup")
//!         .with_lock_scope(LockScope::WholeDrain),
//! );
//!
//! chain.add(|| {
//!     println!("Hello");
//!     Signal::Continue
//! });
//! chain.add(|| {
//!     println!("Trigger");
//!     Signal::Halt
//! });
//! chain.add(|| {
//!     println!("Out");
//!     Signal::Continue
//! });
//!
//! let summary = chain.execute();
//! assert!(summary.halted);
//! assert_eq!(chain.destroy(), 1);
//! ```

// Public modules
pub mod chain;
pub mod config;
pub mod queue;
pub mod registry;
pub mod types;

// Re-export main types for convenience
pub use chain::Chain;
pub use config::{ChainConfig, LockScope};
pub use queue::OrderedQueue;
pub use registry::CallbackRegistry;
pub use types::{
    Callback, ChainError, ExecutionSummary, NamedCallback, Result, Signal, Timestamp,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: a fresh chain is empty and runs nothing
        let chain = Chain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.execute().invoked, 0);
        assert!(!VERSION.is_empty());
    }
}
