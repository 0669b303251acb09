//! Minimal chain demo
//!
//! Queues three callbacks, the second of which halts the pass, then runs the
//! chain twice.
//!
//! Usage:
//!   RUST_LOG=trace cargo run --example hello_chain

use express_chain::{Chain, NamedCallback, Signal};

fn main() {
    env_logger::init();

    let chain = Chain::new();
    chain.add(NamedCallback::new("hello", || {
        println!("Hello");
        Signal::Continue
    }));
    chain.add(NamedCallback::new("trigger", || {
        println!("Trigger");
        Signal::Halt
    }));
    chain.add(NamedCallback::new("out", || {
        println!("Out");
        Signal::Continue
    }));

    let first = chain.execute();
    println!("first pass: {} invoked, {} left", first.invoked, first.remaining);

    let second = chain.execute();
    println!("second pass: {} invoked, {} left", second.invoked, second.remaining);

    chain.destroy();
}
