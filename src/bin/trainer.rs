//! Trainer Binary
//!
//! Evolves banking strategies and checkpoints the population.
//!
//! Options: --config, --resume, --climb, plus one flag per rule or setting.
//! Flags override the config file, which overrides the built-in defaults.

use clap::Parser;
use kostky::Points;
use kostky::config::Config;
use kostky::evolution::Checkpoint;
use kostky::evolution::Trainer;
use kostky::graph::Graph;
use kostky::strategy::Climber;
use kostky::strategy::PartialStrategy;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Evolve banking strategies for six-dice Farkle", long_about = None)]
struct Args {
    /// JSON config to start from
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// checkpoint to continue training from
    #[arg(long, value_name = "FILE")]
    resume: Option<PathBuf>,
    /// hill-climb a single opening policy for this many steps instead of evolving
    #[arg(long, value_name = "STEPS", conflicts_with = "resume")]
    climb: Option<usize>,
    /// score that ends a game
    #[arg(long)]
    limit: Option<Points>,
    /// score bucket width and cutoff spacing
    #[arg(long)]
    step: Option<Points>,
    /// number of cutoff levels
    #[arg(long)]
    levels: Option<usize>,
    /// genomes per generation, a multiple of 4
    #[arg(long)]
    population: Option<usize>,
    /// generations to run in total
    #[arg(long)]
    generations: Option<usize>,
    /// generations between checkpoints
    #[arg(long)]
    checkpoint: Option<usize>,
    /// worker threads
    #[arg(long)]
    workers: Option<usize>,
    /// games per seating in one competition
    #[arg(long)]
    games: Option<usize>,
    /// run seed
    #[arg(long)]
    seed: Option<u64>,
    /// checkpoint directory
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match self.config.as_ref() {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(limit) = self.limit {
            config.rules.limit = limit;
        }
        if let Some(step) = self.step {
            config.rules.step = step;
        }
        if let Some(levels) = self.levels {
            config.rules.levels = levels;
        }
        if let Some(population) = self.population {
            config.settings.population = population;
        }
        if let Some(generations) = self.generations {
            config.settings.generations = generations;
        }
        if let Some(checkpoint) = self.checkpoint {
            config.settings.checkpoint = checkpoint;
        }
        if let Some(workers) = self.workers {
            config.settings.workers = workers;
        }
        if let Some(games) = self.games {
            config.settings.games = games;
        }
        if let Some(seed) = self.seed {
            config.settings.seed = seed;
        }
        if let Some(output) = self.output.clone() {
            config.settings.output = Some(output);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    kostky::log()?;
    let args = Args::parse();
    let config = args.config()?;
    log::info!("{:<32}{:<32}", "configuration", format!("{:?}", config.rules));
    let ref graph = Graph::build();
    if let Some(steps) = args.climb {
        let ref mut rng = SmallRng::seed_from_u64(config.settings.seed);
        let partial = PartialStrategy::random(graph, &config.rules, rng);
        let mut climber = Climber::new(graph, &config.rules, partial);
        climber.climb(steps, rng);
        log::info!("{:<32}{:<32}", "climbed cutoffs", format!("{:?}", climber.partial().cutoffs()));
        return Ok(());
    }
    let trainer = match args.resume.as_ref() {
        Some(path) => Trainer::resume(graph, config, Checkpoint::load(path, graph)?)?,
        None => Trainer::new(graph, config)?,
    };
    let population = trainer.train()?;
    log::info!("{:<32}{:<32}", "final population", population.size());
    Ok(())
}
