use super::checkpoint::Checkpoint;
use super::pool::Pool;
use super::population::Population;
use super::progress::Progress;
use super::seed::Phase;
use super::seed::Seed;
use crate::arena::Arena;
use crate::config::Config;
use crate::graph::Graph;
use crate::strategy::Expectation;
use crate::strategy::State;
use crate::strategy::Strategy;
use anyhow::Context;
use rand::seq::SliceRandom;

/// Generational tournament-selection loop.
///
/// Each generation shuffles the population, pits the two halves against
/// each other pairwise, keeps the winners as parents, shuffles them, and
/// breeds every parent pair into four children. The population size never
/// changes.
pub struct Trainer<'g> {
    graph: &'g Graph,
    config: Config,
    arena: Arena<'g>,
    pool: Pool,
    seed: Seed,
    generation: usize,
    population: Population,
    progress: Progress,
}

impl<'g> Trainer<'g> {
    /// fresh random population
    pub fn new(graph: &'g Graph, config: Config) -> anyhow::Result<Self> {
        config.validate()?;
        let pool = Pool::new(config.settings.workers)?;
        let seed = Seed::new(config.settings.seed);
        let population = Population::random(
            graph,
            &config.rules,
            config.settings.population,
            seed,
            &pool,
        );
        Self::assemble(graph, config, pool, seed, 0, population)
    }

    /// continue from a saved population
    pub fn resume(graph: &'g Graph, config: Config, checkpoint: Checkpoint) -> anyhow::Result<Self> {
        config.validate()?;
        anyhow::ensure!(
            checkpoint.rules() == &config.rules,
            "checkpoint rules {:?} differ from configured {:?}",
            checkpoint.rules(),
            config.rules
        );
        anyhow::ensure!(
            checkpoint.population().size() == config.settings.population,
            "checkpoint holds {} genomes, configured population is {}",
            checkpoint.population().size(),
            config.settings.population
        );
        log::info!("{:<32}{:<32}", "resuming at generation", checkpoint.generation());
        let pool = Pool::new(config.settings.workers)?;
        let seed = Seed::new(config.settings.seed);
        let generation = checkpoint.generation();
        let population = checkpoint.into_population();
        Self::assemble(graph, config, pool, seed, generation, population)
    }

    fn assemble(
        graph: &'g Graph,
        config: Config,
        pool: Pool,
        seed: Seed,
        generation: usize,
        population: Population,
    ) -> anyhow::Result<Self> {
        if let Some(dir) = config.settings.output.as_ref() {
            std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
            config.save(&dir.join("config.json"))?;
        }
        log::info!("{:<32}{:<32}", "training workers", pool.workers());
        Ok(Self {
            graph,
            arena: Arena::new(graph, config.settings.games),
            config,
            pool,
            seed,
            generation,
            population,
            progress: Progress::default(),
        })
    }

    pub fn generation(&self) -> usize {
        self.generation
    }
    pub fn population(&self) -> &Population {
        &self.population
    }
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// run the remaining generations, checkpointing on the configured interval
    pub fn train(mut self) -> anyhow::Result<Population> {
        log::info!(
            "{:<32}{:<32}",
            "training generations",
            format!("{}..{}", self.generation, self.config.settings.generations)
        );
        while self.generation < self.config.settings.generations {
            self.step();
            if let Some(stats) = self.progress.checkpoint() {
                log::info!("{}", stats);
            }
            if self.generation % self.config.settings.checkpoint == 0 {
                self.checkpoint()?;
                self.report();
            }
        }
        log::info!("{}", self.progress.summary());
        Ok(self.population)
    }

    /// one generation of selection and breeding
    pub fn step(&mut self) {
        let seed = self.seed.at(self.generation);
        let size = self.population.size();
        let mut genomes = std::mem::take(&mut self.population).into_inner();
        genomes.shuffle(&mut seed.rng(Phase::Shuffle, 0));
        let mut parents = self.select(&genomes, seed);
        parents.shuffle(&mut seed.rng(Phase::Shuffle, 1));
        let children = self.breed(&parents, seed);
        assert_eq!(children.len(), size, "population size drifted");
        self.population = Population::from(children);
        self.generation += 1;
        self.progress.set_generation(self.generation);
        self.progress.add_genomes(size);
        log::debug!("{:<32}{:<32}", "finished generation", self.generation);
    }

    /// winners of the pairwise tournament between the two halves
    fn select(&self, genomes: &[Strategy], seed: Seed) -> Vec<Strategy> {
        let arena = self.arena;
        let progress = &self.progress;
        let (left, right) = genomes.split_at(genomes.len() / 2);
        self.pool.pairs(left, right, |i, a, b| {
            let ref mut rng = seed.rng(Phase::Select, i);
            let winner = if arena.compete(a, b, rng) { a } else { b };
            progress.add_games(2 * arena.games());
            winner.clone()
        })
    }

    /// four children per parent pair, two of them mutated
    fn breed(&self, parents: &[Strategy], seed: Seed) -> Vec<Strategy> {
        let graph = self.graph;
        let (left, right) = parents.split_at(parents.len() / 2);
        self.pool
            .pairs(left, right, |i, a, b| {
                let ref mut rng = seed.rng(Phase::Breed, i);
                [
                    a.breed(b, rng),
                    b.breed(a, rng).mutate(graph, rng),
                    a.breed(b, rng),
                    b.breed(a, rng).mutate(graph, rng),
                ]
            })
            .into_iter()
            .flatten()
            .collect()
    }

    fn checkpoint(&self) -> anyhow::Result<()> {
        match self.config.settings.output.as_ref() {
            Some(dir) => Checkpoint::save(dir, self.generation, &self.population).map(|_| ()),
            None => Ok(()),
        }
    }

    /// game length between two survivors and the opening expectation of the first
    fn report(&self) {
        let genomes = self.population.genomes();
        let ref mut rng = self.seed.at(self.generation).rng(Phase::Report, 0);
        let record = self
            .arena
            .duel(&genomes[1], &genomes[0], crate::LENGTH_SAMPLES, rng);
        self.progress.add_games(record.games());
        let opening = genomes[0].partial(&State::default());
        let value = Expectation::from((opening, self.graph)).value();
        log::info!(
            "{:<32}{:<32}{:<32}",
            format!("generation {}", self.generation),
            format!("rounds/game {:.1}", record.length()),
            format!("opening value {:.1}", value),
        );
        log::debug!("{:<32}{:<32}", "opening cutoffs", format!("{:?}", opening.cutoffs()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rules;
    use crate::config::Settings;

    fn config(workers: usize, output: Option<std::path::PathBuf>) -> Config {
        Config {
            rules: Rules {
                limit: 300,
                step: 50,
                levels: 6,
            },
            settings: Settings {
                population: 8,
                generations: 3,
                checkpoint: 2,
                workers,
                games: 2,
                seed: 17,
                output,
            },
        }
    }

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("kostky-{}-{}", name, std::process::id()))
    }

    #[test]
    fn step_keeps_population_size() {
        let ref graph = Graph::build();
        let mut trainer = Trainer::new(graph, config(2, None)).unwrap();
        trainer.step();
        trainer.step();
        assert_eq!(trainer.generation(), 2);
        assert_eq!(trainer.population().size(), 8);
        assert_eq!(trainer.progress().games(), 2 * 4 * 2 * 2);
    }

    #[test]
    fn workers_do_not_change_results() {
        let ref graph = Graph::build();
        let mut a = Trainer::new(graph, config(1, None)).unwrap();
        let mut b = Trainer::new(graph, config(4, None)).unwrap();
        a.step();
        b.step();
        assert_eq!(a.population(), b.population());
    }

    #[test]
    fn trains_and_resumes_from_checkpoint() {
        let ref graph = Graph::build();
        let dir = scratch("resume");
        let trained = Trainer::new(graph, config(2, Some(dir.clone())))
            .unwrap()
            .train()
            .unwrap();
        assert_eq!(trained.size(), 8);
        assert!(dir.join("config.json").exists());
        let path = Checkpoint::path(&dir, 2);
        let checkpoint = Checkpoint::load(&path, graph).unwrap();
        assert_eq!(checkpoint.generation(), 2);
        let resumed = Trainer::resume(graph, config(2, None), checkpoint).unwrap();
        assert_eq!(resumed.generation(), 2);
        assert_eq!(resumed.train().unwrap(), trained);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn resume_rejects_other_rules() {
        let ref graph = Graph::build();
        let dir = scratch("mismatch");
        Trainer::new(graph, config(1, Some(dir.clone())))
            .unwrap()
            .train()
            .unwrap();
        let checkpoint = Checkpoint::load(&Checkpoint::path(&dir, 2), graph).unwrap();
        let mut other = config(1, None);
        other.rules.limit = 400;
        assert!(Trainer::resume(graph, other, checkpoint).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn rejects_invalid_config() {
        let ref graph = Graph::build();
        let mut bad = config(1, None);
        bad.settings.population = 6;
        assert!(Trainer::new(graph, bad).is_err());
    }
}
