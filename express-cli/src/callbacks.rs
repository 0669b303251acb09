//! Sample callbacks shipped with the CLI
//!
//! `hello` and `out` print and continue; `trigger` prints and halts the pass.

use anyhow::Result;
use express_chain::{CallbackRegistry, NamedCallback, Signal};

/// Build a callback that prints `text` and returns `signal`
fn printer(
    name: &'static str,
    text: &'static str,
    signal: Signal,
) -> NamedCallback<impl FnMut() -> Signal + Send> {
    NamedCallback::new(name, move || {
        println!("{}", text);
        signal
    })
}

/// Registry holding the built-in sample callbacks
pub fn builtin_registry() -> Result<CallbackRegistry> {
    let mut registry = CallbackRegistry::new();
    registry.register("hello", || printer("hello", "Hello", Signal::Continue))?;
    registry.register("trigger", || printer("trigger", "Trigger", Signal::Halt))?;
    registry.register("out", || printer("out", "Out", Signal::Continue))?;
    Ok(registry)
}

/// Callback list used when neither the config nor the command line names one
pub fn default_sequence() -> Vec<String> {
    ["hello", "trigger", "out"].iter().map(|s| s.to_string()).collect()
}
