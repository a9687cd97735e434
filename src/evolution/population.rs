use super::pool::Pool;
use super::seed::Phase;
use super::seed::Seed;
use crate::config::Rules;
use crate::graph::Graph;
use crate::strategy::Strategy;

/// Ordered, fixed-size collection of genomes sharing one set of rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Population(Vec<Strategy>);

impl Population {
    /// `size` independent random genomes, one seeded generator per genome
    pub fn random(graph: &Graph, rules: &Rules, size: usize, seed: Seed, pool: &Pool) -> Self {
        log::info!("{:<32}{:<32}", "seeding population", size);
        Self(pool.map(size, |i| {
            let ref mut rng = seed.rng(Phase::Init, i);
            Strategy::random(graph, rules, rng)
        }))
    }
    pub fn size(&self) -> usize {
        self.0.len()
    }
    pub fn genomes(&self) -> &[Strategy] {
        &self.0
    }
    pub fn into_inner(self) -> Vec<Strategy> {
        self.0
    }
    /// rules every genome plays by, None when empty
    pub fn rules(&self) -> Option<&Rules> {
        self.0.first().map(Strategy::rules)
    }
}

impl From<Vec<Strategy>> for Population {
    fn from(genomes: Vec<Strategy>) -> Self {
        if let Some(first) = genomes.first() {
            assert!(
                genomes.iter().all(|g| g.rules() == first.rules()),
                "population mixes rules"
            );
        }
        Self(genomes)
    }
}
