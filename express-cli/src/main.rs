//! Express Chain CLI Application
//!
//! Demonstration front end for the express-chain library. It:
//! - Registers the sample callbacks (hello, trigger, out)
//! - Builds a chain from a TOML config or `--callback` flags
//! - Runs one or more execute passes and reports each summary

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use express_chain::{CallbackRegistry, Chain, ChainConfig, ExecutionSummary, LockScope};
use rayon::prelude::*;
use std::path::PathBuf;

mod callbacks;
mod config;

/// Express Chain - run an ordered chain of callbacks
#[derive(Parser, Debug)]
#[command(name = "express-cli")]
#[command(about = "Queue callbacks and run them until one halts", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Callback to queue (can be repeated; overrides the config list)
    #[arg(long = "callback", value_name = "NAME")]
    callbacks: Vec<String>,

    /// How long a pass holds the chain lock
    #[arg(long, value_enum)]
    lock_scope: Option<LockScopeArg>,

    /// Number of execute passes (overrides the config)
    #[arg(long, value_name = "COUNT")]
    runs: Option<usize>,

    /// Queue callbacks from a thread pool (queue order is then unspecified)
    #[arg(long)]
    parallel_add: bool,

    /// Print each pass summary as JSON
    #[arg(long)]
    json: bool,

    /// List the available callbacks and exit
    #[arg(long)]
    list: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LockScopeArg {
    WholeDrain,
    PerCallback,
}

impl From<LockScopeArg> for LockScope {
    fn from(arg: LockScopeArg) -> Self {
        match arg {
            LockScopeArg::WholeDrain => LockScope::WholeDrain,
            LockScopeArg::PerCallback => LockScope::PerCallback,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("Express CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using express-chain library v{}", express_chain::VERSION);

    let registry = callbacks::builtin_registry()?;

    if args.list {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let mut app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    let names = resolve_callbacks(&args.callbacks, &app_config);
    if let Some(scope) = args.lock_scope {
        app_config.chain.lock_scope = scope.into();
    }
    if let Some(runs) = args.runs {
        app_config.runs = runs;
    }

    let chain = if args.parallel_add {
        parallel_build(&registry, &names, &app_config.chain)?
    } else {
        registry
            .build_chain(&names, app_config.chain.clone())
            .context("Failed to build chain")?
    };

    for run in 1..=app_config.runs {
        let summary = chain.execute();
        report(run, &summary, args.json)?;
        if chain.is_empty() {
            break;
        }
    }

    let released = chain.destroy();
    if released > 0 {
        log::info!("{} callbacks were never run", released);
    }

    Ok(())
}

/// Pick the callback list: `--callback` flags, then the config file, then
/// the built-in sequence. An explicit empty list in the config is kept.
fn resolve_callbacks(cli: &[String], app_config: &config::AppConfig) -> Vec<String> {
    if !cli.is_empty() {
        return cli.to_vec();
    }
    app_config
        .callbacks
        .clone()
        .unwrap_or_else(callbacks::default_sequence)
}

/// Queue the named callbacks from rayon's thread pool
fn parallel_build(
    registry: &CallbackRegistry,
    names: &[String],
    chain_config: &ChainConfig,
) -> Result<Chain> {
    // Resolve every name up front so a typo fails before anything is queued
    let resolved = names
        .iter()
        .map(|name| registry.create(name))
        .collect::<express_chain::Result<Vec<_>>>()
        .context("Failed to build chain")?;

    let chain = Chain::with_config(chain_config.clone());
    resolved
        .into_par_iter()
        .for_each(|callback| chain.add_boxed(callback));
    Ok(chain)
}

/// Print one pass summary
fn report(run: usize, summary: &ExecutionSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", summary_json(summary)?);
    } else {
        log::info!(
            "Pass {}: {} invoked, {}, {} remaining ({} µs)",
            run,
            summary.invoked,
            if summary.halted { "halted" } else { "drained" },
            summary.remaining,
            summary.duration().num_microseconds().unwrap_or_default()
        );
    }
    Ok(())
}

/// Render a pass summary as one line of JSON
fn summary_json(summary: &ExecutionSummary) -> Result<String> {
    Ok(serde_json::to_string(summary)?)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "express-cli",
            "--callback",
            "hello",
            "--callback",
            "out",
            "--lock-scope",
            "per-callback",
            "--runs",
            "3",
            "-vv",
        ]);
        assert_eq!(args.callbacks, vec!["hello", "out"]);
        assert!(matches!(args.lock_scope, Some(LockScopeArg::PerCallback)));
        assert_eq!(args.runs, Some(3));
        assert_eq!(args.verbose, 2);
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parallel_build_queues_everything() {
        let registry = callbacks::builtin_registry().unwrap();
        let chain = parallel_build(
            &registry,
            &names(&["hello", "out", "hello"]),
            &ChainConfig::default(),
        )
        .unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.execute().invoked, 3);
    }

    #[test]
    fn test_parallel_build_rejects_unknown() {
        let registry = callbacks::builtin_registry().unwrap();
        let result = parallel_build(
            &registry,
            &names(&["hello", "bogus"]),
            &ChainConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_callbacks_precedence() {
        let unset = config::AppConfig::default();
        assert_eq!(resolve_callbacks(&[], &unset), callbacks::default_sequence());

        let empty = config::AppConfig {
            callbacks: Some(Vec::new()),
            ..Default::default()
        };
        assert!(resolve_callbacks(&[], &empty).is_empty());

        let listed = config::AppConfig {
            callbacks: Some(names(&["out"])),
            ..Default::default()
        };
        assert_eq!(resolve_callbacks(&[], &listed), names(&["out"]));
        assert_eq!(resolve_callbacks(&names(&["hello"]), &listed), names(&["hello"]));
    }

    #[test]
    fn test_empty_callback_list_builds_empty_chain() {
        let registry = callbacks::builtin_registry().unwrap();
        let no_names: Vec<String> = Vec::new();
        let chain = registry.build_chain(&no_names, ChainConfig::default()).unwrap();
        let summary = chain.execute();
        assert_eq!(summary.invoked, 0);
        assert!(summary.completed());
    }

    #[test]
    fn test_summary_json_keys() {
        let registry = callbacks::builtin_registry().unwrap();
        let chain = registry
            .build_chain(&names(&["trigger", "out"]), ChainConfig::default())
            .unwrap();
        let summary = chain.execute();

        let json = summary_json(&summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["invoked"], 1);
        assert_eq!(value["halted"], true);
        assert_eq!(value["remaining"], 1);
        assert!(value.get("started_at").is_some());
    }
}
