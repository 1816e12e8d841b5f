//! fibonacci - print the first n Fibonacci terms
//!
//! Usage:
//!   fibonacci                         # naive recursion (default)
//!   fibonacci --strategy memoized     # opt-in alternative evaluator
//!   fibonacci --config recursa.toml   # driver settings from a file

use clap::{CommandFactory, Parser as ClapParser};
use clap_complete::{Shell, generate};
use recursa_cli::{Console, logging, run_fibonacci};
use recursa_core::FibonacciStrategy;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::info;

#[derive(ClapParser)]
#[command(name = "fibonacci")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Print the first n terms of the Fibonacci sequence", long_about = None)]
struct Args {
    /// Fibonacci evaluator: recursive, memoized or iterative
    #[arg(long)]
    strategy: Option<FibonacciStrategy>,

    /// Driver configuration file (TOML); falls back to $RECURSA_CONFIG
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        let mut cmd = Args::command();
        generate(shell, &mut cmd, "fibonacci", &mut io::stdout());
        return;
    }

    logging::init(args.verbose);
    info!("fibonacci {}", env!("CARGO_PKG_VERSION"));

    let mut config = recursa_cli::load_config_or_exit(args.config);
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }

    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    if let Err(e) = run_fibonacci(&mut console, &config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
