use std::io;
use std::path::PathBuf;

use clap::Parser;
use ottsweeper_core::GameSession;

mod app;
mod config;
mod input;
mod render;

use app::App;
use config::FileConfig;

/// Terminal minesweeper.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Configuration file, created with defaults when missing
    #[arg(short, long, default_value = "ottsweeper.toml")]
    config: PathBuf,

    /// Built-in difficulty level, overrides the configuration file
    #[arg(short, long)]
    difficulty: Option<u8>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let file_config = FileConfig::load_or_create(&args.config)?;
    let config = file_config.game_config(args.difficulty)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("Seed: {}", seed);

    let session = GameSession::new(config, seed);
    let (cols, rows) = session.size();
    log::info!(
        "Minefield size: {} x {}, {} mines",
        cols,
        rows,
        session.total_mines()
    );

    let mut app = App::new(session);
    app.run(io::stdin().lock(), io::stdout().lock())
}
