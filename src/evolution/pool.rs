use anyhow::Context;
use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;
use rayon::iter::IndexedParallelIterator;
use rayon::iter::IntoParallelIterator;
use rayon::iter::IntoParallelRefIterator;
use rayon::iter::ParallelIterator;

/// Fixed-size worker pool for per-generation fan-out.
/// Results always come back in task order.
pub struct Pool(ThreadPool);

impl Pool {
    pub fn new(workers: usize) -> anyhow::Result<Self> {
        ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("kostky-{}", i))
            .build()
            .map(Self)
            .with_context(|| format!("build pool of {} workers", workers))
    }
    pub fn workers(&self) -> usize {
        self.0.current_num_threads()
    }

    /// runs `f(i)` for every task index in 0..n
    pub fn map<U, F>(&self, n: usize, f: F) -> Vec<U>
    where
        U: Send,
        F: Fn(usize) -> U + Send + Sync,
    {
        self.0.install(|| (0..n).into_par_iter().map(f).collect())
    }

    /// runs `f(i, left[i], right[i])` for every index-aligned pair
    pub fn pairs<T, U, F>(&self, left: &[T], right: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(usize, &T, &T) -> U + Send + Sync,
    {
        assert_eq!(left.len(), right.len(), "unpaired tasks");
        self.0.install(|| {
            left.par_iter()
                .zip(right.par_iter())
                .enumerate()
                .map(|(i, (a, b))| f(i, a, b))
                .collect()
        })
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Pool({})", self.workers())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_preserves_order() {
        let pool = Pool::new(4).unwrap();
        let squares = pool.map(100, |i| i * i);
        assert_eq!(squares, (0..100).map(|i| i * i).collect::<Vec<_>>());
    }

    #[test]
    fn pairs_line_up() {
        let pool = Pool::new(3).unwrap();
        let left = (0..50).collect::<Vec<usize>>();
        let right = (100..150).collect::<Vec<usize>>();
        let sums = pool.pairs(&left, &right, |i, a, b| (i, a + b));
        for (i, (j, sum)) in sums.into_iter().enumerate() {
            assert_eq!(i, j);
            assert_eq!(sum, 100 + 2 * i);
        }
    }

    #[test]
    #[should_panic]
    fn pairs_must_align() {
        let pool = Pool::new(2).unwrap();
        pool.pairs(&[1, 2, 3], &[1, 2], |_, a, b| a + b);
    }
}
