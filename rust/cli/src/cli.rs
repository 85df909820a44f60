//! Command-line argument definitions.

use clap::{Parser, Subcommand};

/// Texas Hold'em at the terminal.
#[derive(Parser, Debug)]
#[command(name = "holdem", version, about = "Multi-player Texas Hold'em")]
pub struct HoldemCli {
    /// Log engine internals at debug level (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play at a table against computer seats; you sit in seat 0
    Play {
        /// Seats at the table, you included (2-10)
        #[arg(long)]
        players: Option<usize>,
        /// Stop after this many hands
        #[arg(long, default_value_t = 10)]
        hands: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Style of every computer seat
        #[arg(long)]
        ai: Option<String>,
        /// Starting chips per seat
        #[arg(long)]
        stack: Option<u32>,
        #[arg(long)]
        big_blind: Option<u32>,
    },
    /// Run a computer-only session
    Sim {
        #[arg(long)]
        players: Option<usize>,
        #[arg(long, default_value_t = 100)]
        hands: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Comma-separated styles, assigned to seats in turn
        #[arg(long)]
        ai: Option<String>,
        #[arg(long)]
        stack: Option<u32>,
        #[arg(long)]
        big_blind: Option<u32>,
        /// Write hand history as JSON lines, replacing an existing file
        #[arg(long)]
        output: Option<String>,
    },
    /// Score five to seven cards, e.g. --cards "Ah Kh Qh Jh Th 2c 3d"
    Eval {
        #[arg(long)]
        cards: String,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
