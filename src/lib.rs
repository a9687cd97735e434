//! Evolutionary search for banking strategies in a six-dice Farkle-style game.
//!
//! - `dice`: canonical rolls, scoring moves, and the fixed scoring table
//! - `graph`: every roll per dice count with its exact probability
//! - `strategy`: per-state play tables and banking cutoffs of each genome
//! - `arena`: Monte Carlo rounds, games, and pairwise competition
//! - `evolution`: worker pool, population, trainer, checkpoints
//! - `config`: game rules and training settings
pub mod arena;
pub mod config;
pub mod dice;
pub mod evolution;
pub mod graph;
pub mod strategy;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Points scored by a move, banked in a round, or accumulated over a game.
pub type Points = u32;
/// Face value of a single die, 1 through `FACES`.
pub type Face = u8;
/// Occurrence probabilities of rolls and expected values.
pub type Probability = f64;

// ============================================================================
// DICE PARAMETERS
// The scoring table is only defined for six six-sided dice.
// ============================================================================
/// Dice rolled at the start of every round.
pub const DICE: usize = 6;
/// Faces on each die.
pub const FACES: usize = 6;

// ============================================================================
// GAME RULES (see `config::Rules`)
// ============================================================================
/// Score that ends the game.
pub const LIMIT: Points = 4000;
/// Width of a score bucket, also the spacing of cutoff levels.
pub const STEP: Points = 50;
/// Number of cutoff levels. cutoffs range over STEP, 2·STEP, ..., LEVELS·STEP.
pub const LEVELS: usize = 20;

// ============================================================================
// GENETIC TRAINING (see `config::Settings`)
// ============================================================================
/// Genomes per generation. Must be a multiple of 4.
pub const POPULATION: usize = 128;
/// Generations to run before stopping.
pub const GENERATIONS: usize = 51;
/// Generations between checkpoints and game-length reports.
pub const CHECKPOINT_INTERVAL: usize = 10;
/// Games played per seating in a single `compete` call.
pub const GAMES_PER_SEATING: usize = 100;
/// Games sampled when reporting average game length.
pub const LENGTH_SAMPLES: usize = 20;
/// Seed for the whole run. Every task derives its own generator from it.
pub const SEED: u64 = 0x6B6F73746B79;

// ============================================================================
// TRAINING INFRASTRUCTURE
// ============================================================================
/// Interval between progress log messages during training.
pub const TRAINING_LOG_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() -> anyhow::Result<()> {
    use anyhow::Context;
    std::fs::create_dir_all("logs").context("create logs directory")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("time moves slow")?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).context("create log file")?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).context("initialize logger")
}
