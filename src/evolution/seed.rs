use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Which part of a generation a generator is drawn for.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Phase {
    Init = 0,
    Shuffle = 1,
    Select = 2,
    Breed = 3,
    Report = 4,
}

/// Deterministic source of per-task generators.
///
/// Every parallel task folds (run seed, generation, phase, task index)
/// through splitmix64 into its own SmallRng, so results do not depend on
/// how tasks are scheduled across workers, nor on the toolchain.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Seed {
    run: u64,
    generation: usize,
}

impl Seed {
    pub fn new(run: u64) -> Self {
        Self { run, generation: 0 }
    }
    pub fn at(&self, generation: usize) -> Self {
        Self {
            run: self.run,
            generation,
        }
    }
    pub fn generation(&self) -> usize {
        self.generation
    }
    pub fn rng(&self, phase: Phase, index: usize) -> SmallRng {
        SmallRng::seed_from_u64(self.key(phase, index))
    }
    /// stable 64-bit key of one task
    pub fn key(&self, phase: Phase, index: usize) -> u64 {
        [self.generation as u64, phase as u64, index as u64]
            .into_iter()
            .fold(Self::mix(self.run), |h, x| Self::mix(h ^ x))
    }

    /// splitmix64 finalizer
    fn mix(z: u64) -> u64 {
        let z = z.wrapping_add(0x9E3779B97F4A7C15);
        let z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        let z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}
