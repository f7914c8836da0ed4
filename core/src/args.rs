use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "Kestrel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Searches a chess position and prints the best move")]
pub struct Args {
    /// Transposition table size in megabytes.
    #[arg(long, default_value_t = 64)]
    pub hash: usize,

    /// Search to this fixed depth instead of using the clock.
    #[arg(short, long)]
    pub depth: Option<u8>,

    /// Milliseconds to spend on each move.
    #[arg(long, default_value_t = 1000)]
    pub movetime: u64,

    /// Remaining clock time in milliseconds; overrides --movetime.
    #[arg(long)]
    pub time: Option<u64>,

    /// Moves until the next time control, used with --time.
    #[arg(long)]
    pub movestogo: Option<u64>,

    /// Starting position; the standard start position when omitted.
    #[arg(long)]
    pub fen: Option<String>,

    /// Moves played from the starting position, in coordinate notation.
    #[arg(long, num_args = 1..)]
    pub moves: Vec<String>,

    /// Opening book: one line of moves per opening.
    #[arg(long)]
    pub book: Option<PathBuf>,

    /// Seed for picking between book moves.
    #[arg(long, default_value_t = 0)]
    pub book_seed: u64,

    /// Engine option as NAME=VALUE, e.g. "Aspiration Window Size=50". Repeatable.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub options: Vec<String>,

    /// Keep playing both sides for up to this many moves.
    #[arg(long)]
    pub play: Option<usize>,

    /// Count leaf nodes to this depth instead of searching.
    #[arg(long)]
    pub perft: Option<u32>,

    /// Write debug logs to a file instead of info logs to the terminal.
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,
}
