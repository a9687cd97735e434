use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

/// Shared training counters. Workers add games concurrently and the
/// orchestration thread logs at most once per `TRAINING_LOG_INTERVAL`.
pub struct Progress {
    generation: AtomicUsize,
    games: AtomicUsize,
    genomes: AtomicUsize,
    start: Instant,
    check: Mutex<Instant>,
}

impl Default for Progress {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            generation: AtomicUsize::new(0),
            games: AtomicUsize::new(0),
            genomes: AtomicUsize::new(0),
            start: now,
            check: Mutex::new(now),
        }
    }
}

impl Progress {
    pub fn set_generation(&self, generation: usize) {
        self.generation.store(generation, Ordering::Relaxed);
    }
    pub fn add_games(&self, n: usize) {
        self.games.fetch_add(n, Ordering::Relaxed);
    }
    pub fn add_genomes(&self, n: usize) {
        self.genomes.fetch_add(n, Ordering::Relaxed);
    }
    pub fn generation(&self) -> usize {
        self.generation.load(Ordering::Relaxed)
    }
    pub fn games(&self) -> usize {
        self.games.load(Ordering::Relaxed)
    }
    pub fn genomes(&self) -> usize {
        self.genomes.load(Ordering::Relaxed)
    }
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
    pub fn format(&self) -> String {
        let rate = self.games() as f64 / self.elapsed().as_secs().max(1) as f64;
        format!(
            "{:<20}{:<20}{:<20}{:<20}",
            format!("generation {}", self.generation()),
            format!("games {}", self.games()),
            format!("genomes {}", self.genomes()),
            format!("G/sec {:.1}", rate),
        )
    }
    pub fn summary(&self) -> String {
        format!("training stopped\n{}", self.format())
    }
    /// stats if the log interval has elapsed since the last call that returned some
    pub fn checkpoint(&self) -> Option<String> {
        let mut last = self.check.lock().expect("poison");
        if last.elapsed() >= crate::TRAINING_LOG_INTERVAL {
            *last = Instant::now();
            std::mem::drop(last);
            Some(self.format())
        } else {
            None
        }
    }
}
