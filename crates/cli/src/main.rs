//! Trace-driven cache simulator CLI.
//!
//! This binary provides a single entry point for all simulation modes. It performs:
//! 1. **Run:** Simulate one cache configuration over an address trace and print the
//!    summary, hit/miss history and final cache contents (or the result as JSON).
//! 2. **Interactive run:** Ask on stdin which replacement policy to apply at every
//!    capacity eviction.
//! 3. **Compare:** Run LRU, FIFO and RANDOM over the same trace with independent engines.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::{fs, process};

use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cachesim_core::config::{CacheConfig, Mapping, ReplacementPolicy};
use cachesim_core::report::{self, FinalState, History, Summary};
use cachesim_core::sim::loader::{self, DEFAULT_SEQUENCE};
use cachesim_core::sim::{EvictionRequest, PolicyCallback, SimulationResult, Simulator, TracingObserver};

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven cache simulator",
    long_about = "Simulate a cache over a sequence of block addresses and report hits, misses and final contents.\n\nWithout --sequence or --file the built-in demo trace 1,2,3,2,4,1,5,6,2,1,7,8 is used.\n\nExamples:\n  cachesim run --capacity 4 --mapping direct\n  cachesim run -s \"1 3 1 5\" --capacity 4 --mapping set-associative --associativity 2\n  cachesim run --config cache.json --report out/report.txt --chart-csv out/chart.csv\n  cachesim compare --capacity 4 --mapping fully-associative"
)]
struct Cli {
    /// Log every access (equivalent to RUST_LOG=debug).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate one configuration over a trace.
    Run {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        cache: CacheArgs,

        /// Ask for the replacement policy at every capacity eviction.
        #[arg(short, long)]
        interactive: bool,

        /// Write the per-access report to this file.
        #[arg(long)]
        report: Option<PathBuf>,

        /// Write hit/miss chart data (CSV) to this file.
        #[arg(long)]
        chart_csv: Option<PathBuf>,

        /// Print the full result as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Report where this address resides at the end of the run.
        #[arg(long, value_name = "ADDR")]
        find: Option<u64>,
    },

    /// Run every replacement policy over the same trace.
    Compare {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        cache: CacheArgs,
    },
}

/// Where the address trace comes from.
#[derive(Args, Debug)]
struct InputArgs {
    /// Addresses separated by commas and/or whitespace.
    #[arg(short, long, conflicts_with = "file")]
    sequence: Option<String>,

    /// File holding the address trace.
    #[arg(short, long)]
    file: Option<PathBuf>,
}

/// Cache geometry; flags override values loaded with `--config`.
#[derive(Args, Debug)]
struct CacheArgs {
    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Total blocks in the cache.
    #[arg(short, long)]
    capacity: Option<usize>,

    /// direct, fully-associative or set-associative.
    #[arg(short, long)]
    mapping: Option<Mapping>,

    /// Blocks per set (set-associative only).
    #[arg(short, long)]
    associativity: Option<usize>,

    /// lru, fifo or random.
    #[arg(short, long)]
    policy: Option<ReplacementPolicy>,

    /// Seed for the RANDOM policy.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Commands::Run {
            input,
            cache,
            interactive,
            report,
            chart_csv,
            json,
            find,
        } => cmd_run(&input, &cache, interactive, report, chart_csv, json, find),
        Commands::Compare { input, cache } => cmd_compare(&input, &cache),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        process::exit(1);
    }
}

/// Installs the `fmt` subscriber on stderr; `RUST_LOG` wins unless `--verbose` is set.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Runs one simulation and prints or persists its results.
fn cmd_run(
    input: &InputArgs,
    cache: &CacheArgs,
    interactive: bool,
    report_path: Option<PathBuf>,
    chart_path: Option<PathBuf>,
    json: bool,
    find: Option<u64>,
) -> CliResult<()> {
    let config = resolve_config(cache)?;
    let sequence = resolve_sequence(input)?;

    let mut simulator = Simulator::new(&config)?.with_observer(TracingObserver);
    if interactive {
        simulator = simulator.with_policy_source(PolicyCallback::new(prompt_policy));
    }
    let result = simulator.run(&sequence)?;

    if json {
        println!("{}", result.to_json()?);
    } else {
        print_result(&result);
    }

    if let Some(addr) = find {
        match result.locate(addr) {
            Some(loc) => println!("Address {addr} resides in set {}, slot {}", loc.set, loc.slot),
            None => println!("Address {addr} is not in the cache"),
        }
    }

    if let Some(path) = report_path {
        report::save_report(&result, &path)?;
        info!(path = %path.display(), "report saved");
    }
    if let Some(path) = chart_path {
        report::save_chart_csv(&result, &path)?;
        info!(path = %path.display(), "chart data saved");
    }
    Ok(())
}

/// Runs every policy on the same trace, one fresh engine each.
fn cmd_compare(input: &InputArgs, cache: &CacheArgs) -> CliResult<()> {
    let base = resolve_config(cache)?;
    let sequence = resolve_sequence(input)?;
    let geometry = base.validate()?;

    println!(
        "{} cache, capacity {}, {} way(s), {} set(s), {} accesses",
        geometry.mapping,
        geometry.capacity,
        geometry.associativity,
        geometry.set_count,
        sequence.len()
    );
    for policy in ReplacementPolicy::ALL {
        let config = CacheConfig {
            policy,
            ..base.clone()
        };
        let result = Simulator::new(&config)?
            .with_observer(TracingObserver)
            .run(&sequence)?;
        println!(
            "{:<7} hits {:>4}  misses {:>4}  hit rate {:.2}  {}",
            policy.to_string(),
            result.hits(),
            result.misses(),
            result.hit_rate(),
            History(&result)
        );
    }
    Ok(())
}

fn print_result(result: &SimulationResult) {
    print!("{}", Summary(result));
    println!("History: {}", History(result));
    println!();
    println!("Final cache state:");
    print!("{}", FinalState(result));
}

/// Builds the configuration: defaults, then the JSON file, then flags.
fn resolve_config(args: &CacheArgs) -> CliResult<CacheConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("failed to read config {}: {e}", path.display()))?;
            serde_json::from_str(&text)?
        }
        None => CacheConfig::default(),
    };

    if let Some(capacity) = args.capacity {
        config.capacity = capacity;
    }
    if let Some(mapping) = args.mapping {
        config.mapping = mapping;
    }
    if args.associativity.is_some() {
        config.associativity = args.associativity;
    }
    if let Some(policy) = args.policy {
        config.policy = policy;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    debug!(?config, "configuration resolved");
    Ok(config)
}

fn resolve_sequence(input: &InputArgs) -> CliResult<Vec<u64>> {
    if let Some(text) = &input.sequence {
        return Ok(loader::parse_sequence(text)?);
    }
    if let Some(path) = &input.file {
        return Ok(loader::load_sequence(path)?);
    }
    Ok(DEFAULT_SEQUENCE.to_vec())
}

/// Asks on the terminal which policy to apply to one eviction. The prompt goes
/// to stderr so stdout carries only the result.
fn prompt_policy(request: &EvictionRequest) -> ReplacementPolicy {
    ask_policy(request, &mut io::stdin().lock(), &mut io::stderr())
}

/// Writes the prompt to `prompt` and reads one answer from `answers`.
/// Unreadable, empty or unknown answers fall back to RANDOM.
fn ask_policy(
    request: &EvictionRequest,
    answers: &mut impl BufRead,
    prompt: &mut impl Write,
) -> ReplacementPolicy {
    write!(
        prompt,
        "Set {} is full {:?}; policy to admit {} [LRU/FIFO/RANDOM]: ",
        request.set_index, request.residents, request.address
    )
    .ok();
    prompt.flush().ok();

    let mut line = String::new();
    match answers.read_line(&mut line) {
        Ok(n) if n > 0 => line.trim().parse().unwrap_or(ReplacementPolicy::Random),
        _ => ReplacementPolicy::Random,
    }
}
