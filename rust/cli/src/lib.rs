//! # holdem CLI
//!
//! Terminal front end for the hold'em engine: an interactive table, computer
//! simulations with JSONL hand histories, a hand scorer and a configuration
//! report.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["holdem", "sim", "--players", "4", "--hands", "50", "--seed", "7"];
//! let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Subcommands
//!
//! - `play`: you in seat 0 against computer seats
//! - `sim`: computer-only session, optional `--output` history file
//! - `eval`: score 5 to 7 cards
//! - `cfg`: resolved configuration with sources
//!
//! Settings resolve as defaults < `HOLDEM_CONFIG` TOML file < `HOLDEM_*`
//! environment variables < flags.

use clap::Parser;
use std::io::Write;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod ui;
pub mod validation;

use cli::{Commands, HoldemCli};
use commands::{handle_cfg_command, handle_eval_command, handle_play_command, handle_sim_command};
use config::Overrides;

pub use error::CliError;

/// Parses `args` and runs the subcommand.
///
/// Returns [`exit_code::SUCCESS`], [`exit_code::ERROR`] for bad arguments,
/// configuration or engine faults, or [`exit_code::INTERRUPTED`] when input
/// ends in the middle of a hand.
///
/// ```
/// use std::io;
/// let mut out = Vec::new();
/// let code = holdem_cli::run(["holdem", "eval", "--cards", "Ah Kh Qh Jh Th"], &mut out, &mut io::stderr());
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("straight flush"));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["play", "sim", "eval", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = writeln!(err, "{}", e);
                    let _ = writeln!(err, "Usage: holdem <command> [options]\n");
                    let _ = writeln!(err, "Commands:");
                    for c in COMMANDS {
                        let _ = writeln!(err, "  {}", c);
                    }
                    let _ = writeln!(err, "\nFor full help, run: holdem --help");
                    exit_code::ERROR
                }
            };
        }
    };

    init_logging(cli.verbose);

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Eval { cards } => handle_eval_command(&cards, out),
        Commands::Play {
            players,
            hands,
            seed,
            ai,
            stack,
            big_blind,
        } => {
            let flags = Overrides {
                players,
                starting_stack: stack,
                big_blind,
                seed,
                ai,
            };
            config::resolve(&flags).map_err(CliError::from).and_then(|resolved| {
                let stdin = std::io::stdin();
                let mut stdin_lock = stdin.lock();
                handle_play_command(&resolved.config, hands, out, err, &mut stdin_lock)
            })
        }
        Commands::Sim {
            players,
            hands,
            seed,
            ai,
            stack,
            big_blind,
            output,
        } => {
            let flags = Overrides {
                players,
                starting_stack: stack,
                big_blind,
                seed,
                ai,
            };
            config::resolve(&flags).map_err(CliError::from).and_then(|resolved| {
                handle_sim_command(&resolved.config, hands, output.as_deref(), out, err)
            })
        }
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            let _ = writeln!(err, "Interrupted: {}", msg);
            exit_code::INTERRUPTED
        }
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

/// Installs the stderr log subscriber once per process. `RUST_LOG`
/// overrides the default filter.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "debug"
    } else {
        "warn,holdem_engine=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
