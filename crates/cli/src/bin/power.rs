//! power - integer exponentiation by repeated addition
//!
//! Usage:
//!   power                         # checked evaluation (default)
//!   power --unchecked             # plain recursion, no input guards
//!   power --config recursa.toml   # driver settings from a file

use clap::{CommandFactory, Parser as ClapParser};
use clap_complete::{Shell, generate};
use recursa_cli::{Console, logging, run_power};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::info;

#[derive(ClapParser)]
#[command(name = "power")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compute base ^ exponent using only recursive addition", long_about = None)]
struct Args {
    /// Skip input checks: negative input recurses until the stack runs out
    #[arg(long)]
    unchecked: bool,

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
        generate(shell, &mut cmd, "power", &mut io::stdout());
        return;
    }

    logging::init(args.verbose);
    info!("power {}", env!("CARGO_PKG_VERSION"));

    let mut config = recursa_cli::load_config_or_exit(args.config);
    if args.unchecked {
        config.checked = false;
    }

    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    if let Err(e) = run_power(&mut console, &config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
