//! Game rules and training settings.
//!
//! Defaults come from the constants in the crate root. A `Config` can be
//! round-tripped through JSON so a run's parameters travel with its
//! checkpoints.

use crate::Points;
use anyhow::Context;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;

/// Parameters of the game being played, shared by every genome
/// of a population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// score that ends the game
    pub limit: Points,
    /// score bucket width and cutoff spacing
    pub step: Points,
    /// number of cutoff levels
    pub levels: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            limit: crate::LIMIT,
            step: crate::STEP,
            levels: crate::LEVELS,
        }
    }
}

impl Rules {
    /// score buckets per player
    pub fn buckets(&self) -> usize {
        (self.limit / self.step) as usize
    }
    /// State buckets per genome, one for every (home, away) pair
    pub fn states(&self) -> usize {
        self.buckets() * self.buckets()
    }
    /// cutoff of a level in 1..=levels
    pub fn cutoff(&self, level: usize) -> Points {
        assert!((1..=self.levels).contains(&level), "cutoff level {}", level);
        level as Points * self.step
    }
    /// level of a cutoff, if it sits on the grid
    pub fn level(&self, cutoff: Points) -> Option<usize> {
        match (cutoff % self.step, (cutoff / self.step) as usize) {
            (0, level) if (1..=self.levels).contains(&level) => Some(level),
            _ => None,
        }
    }
    /// smallest and largest cutoff
    pub fn range(&self) -> std::ops::RangeInclusive<Points> {
        self.cutoff(1)..=self.cutoff(self.levels)
    }
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.step > 0, "step must be positive");
        anyhow::ensure!(self.limit > 0, "limit must be positive");
        anyhow::ensure!(
            self.limit % self.step == 0,
            "limit {} is not a multiple of step {}",
            self.limit,
            self.step
        );
        anyhow::ensure!(self.levels >= 2, "need at least 2 cutoff levels");
        anyhow::ensure!(
            (self.levels as u64)
                .checked_mul(self.step as u64)
                .is_some_and(|top| top <= Points::MAX as u64),
            "{} levels of {} overflow the largest cutoff",
            self.levels,
            self.step
        );
        Ok(())
    }
}

/// Parameters of the genetic search itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// genomes per generation
    pub population: usize,
    /// generations to run
    pub generations: usize,
    /// generations between checkpoints
    pub checkpoint: usize,
    /// worker threads
    pub workers: usize,
    /// games per seating in one competition
    pub games: usize,
    /// run seed
    pub seed: u64,
    /// checkpoint directory, none to skip writing
    pub output: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            population: crate::POPULATION,
            generations: crate::GENERATIONS,
            checkpoint: crate::CHECKPOINT_INTERVAL,
            workers: num_cpus::get(),
            games: crate::GAMES_PER_SEATING,
            seed: crate::SEED,
            output: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.population > 0 && self.population % 4 == 0,
            "population {} must be a positive multiple of 4",
            self.population
        );
        anyhow::ensure!(self.generations > 0, "need at least one generation");
        anyhow::ensure!(self.checkpoint > 0, "checkpoint interval must be positive");
        anyhow::ensure!(self.workers > 0, "need at least one worker");
        anyhow::ensure!(self.games > 0, "need at least one game per seating");
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules: Rules,
    pub settings: Settings,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        self.rules.validate().context("invalid rules")?;
        self.settings.validate().context("invalid settings")?;
        Ok(())
    }
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("open config {}", path.display()))?;
        serde_json::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("parse config {}", path.display()))
    }
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("create config {}", path.display()))?;
        let ref mut writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(&mut *writer, self)
            .with_context(|| format!("write config {}", path.display()))?;
        std::io::Write::flush(writer).with_context(|| format!("flush config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        Config::default().validate().unwrap();
        assert_eq!(Rules::default().buckets(), 80);
        assert_eq!(Rules::default().states(), 6400);
        assert_eq!(Rules::default().range(), 50..=1000);
    }

    #[test]
    fn levels() {
        let rules = Rules::default();
        assert_eq!(rules.level(50), Some(1));
        assert_eq!(rules.level(1000), Some(20));
        assert_eq!(rules.level(75), None);
        assert_eq!(rules.level(0), None);
        assert_eq!(rules.level(1050), None);
    }

    #[test]
    fn rejects_bad_rules() {
        let ok = Rules::default();
        assert!(Rules { step: 0, ..ok }.validate().is_err());
        assert!(Rules { limit: 4010, ..ok }.validate().is_err());
        assert!(Rules { levels: 1, ..ok }.validate().is_err());
        assert!(Rules { levels: 100_000_000, ..ok }.validate().is_err());
        assert!(Rules { step: 1 << 20, limit: 1 << 20, levels: 1 << 12 }.validate().is_err());
        assert!(Rules { step: 1 << 20, limit: 1 << 20, levels: 1 << 11 }.validate().is_ok());
    }

    #[test]
    fn rejects_bad_settings() {
        let ok = Settings::default();
        assert!(Settings { population: 0, ..ok.clone() }.validate().is_err());
        assert!(Settings { population: 126, ..ok.clone() }.validate().is_err());
        assert!(Settings { generations: 0, ..ok.clone() }.validate().is_err());
        assert!(Settings { checkpoint: 0, ..ok.clone() }.validate().is_err());
        assert!(Settings { workers: 0, ..ok.clone() }.validate().is_err());
        assert!(Settings { games: 0, ..ok.clone() }.validate().is_err());
    }

    #[test]
    fn json_fills_missing_fields() {
        let config = serde_json::from_str::<Config>(r#"{"rules":{"limit":1000}}"#).unwrap();
        assert_eq!(config.rules.limit, 1000);
        assert_eq!(config.rules.step, crate::STEP);
        assert_eq!(config.settings.population, crate::POPULATION);
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<Config>(&text).unwrap(), config);
    }
}
