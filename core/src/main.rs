mod args;

use std::error::Error;
use std::fs::{self, File};
use std::sync::atomic::Ordering;
use std::time::Instant;

use args::Args;
use board::perft::divide;
use clap::Parser;
use log::{debug, info, LevelFilter};
use search::{
    format_score, ClockTimer, Engine, EngineConfig, Game, MemoryBook, SearchFlags, TimeBudget,
};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let mut game = match &args.fen {
        Some(fen) => Game::new(fen)?,
        None => Game::start(),
    };
    for notation in &args.moves {
        game.apply_notation(notation)?;
    }

    if let Some(depth) = args.perft {
        return run_perft(&game, depth);
    }

    let config = build_config(&args)?;
    let mut engine = Engine::new(&config);
    if let Some(path) = &args.book {
        let book = MemoryBook::from_lines(&fs::read_to_string(path)?, args.book_seed)?;
        info!("loaded {} book positions from {}", book.len(), path.display());
        engine.set_book(Some(Box::new(book)));
    }

    let stop = engine.stop_handle();
    ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))?;

    let flags = SearchFlags {
        dynamic_depth: args.depth.is_none(),
        use_opening_book: args.book.is_some(),
    };

    let moves_to_play = args.play.unwrap_or(1);
    for _ in 0..moves_to_play {
        let status = game.status();
        if status.is_over() {
            println!("result {}", status);
            break;
        }

        let mut timer = ClockTimer::new(budget(&args));
        let Some(result) = engine.find_best_move(&game, &mut timer, flags) else {
            break;
        };

        println!(
            "bestmove {} score {} depth {} nodes {}",
            result.best_move,
            format_score(result.score),
            result.depth,
            result.stats.nodes
        );
        game.apply_move(result.best_move)?;
    }

    if args.play.is_some() {
        println!("{}", game.position());
    }
    Ok(())
}

fn init_logging(args: &Args) -> Result<(), Box<dyn Error>> {
    match &args.log_file {
        Some(log_file) => WriteLogger::init(
            LevelFilter::Debug,
            Config::default(),
            File::create(log_file)?,
        )?,
        None => TermLogger::init(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )?,
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<EngineConfig, Box<dyn Error>> {
    let mut config = EngineConfig::default();
    config.update("Hash", &args.hash.to_string())?;
    if let Some(depth) = args.depth {
        config.update("Fixed Depth", &depth.to_string())?;
    }

    for option in &args.options {
        let (name, value) = option
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", option))?;
        config.update(name.trim(), value)?;
        debug!("set option '{}' to '{}'", name.trim(), value.trim());
    }
    Ok(config)
}

fn budget(args: &Args) -> TimeBudget {
    match args.time {
        Some(time) => TimeBudget::from_clock(time, args.movestogo),
        None => TimeBudget::move_time(args.movetime),
    }
}

fn run_perft(game: &Game, depth: u32) -> Result<(), Box<dyn Error>> {
    let mut position = game.position().clone();
    let started = Instant::now();

    let mut total = 0;
    for (mv, nodes) in divide(&mut position, depth) {
        println!("{}: {}", mv, nodes);
        total += nodes;
    }

    let elapsed = started.elapsed();
    println!(
        "\nnodes {} time {}ms nps {:.0}",
        total,
        elapsed.as_millis(),
        total as f64 / elapsed.as_secs_f64().max(1e-9)
    );
    Ok(())
}
