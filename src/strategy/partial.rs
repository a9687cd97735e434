use crate::DICE;
use crate::Points;
use crate::config::Rules;
use crate::dice::Move;
use crate::graph::Graph;
use crate::graph::Node;
use rand::Rng;
use rand::seq::IndexedRandom;

/// The decision policy for one State bucket.
///
/// `play[slot]` indexes into the moves of the non-bust node at that slot.
/// `cutoffs[d - 1]` is the round score at which we bank when `d` dice
/// remain to be rolled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartialStrategy {
    play: Vec<u8>,
    cutoffs: [Points; DICE],
}

impl PartialStrategy {
    /// uniform move for every non-bust node, uniform cutoff level per dice count
    pub fn random<R: Rng>(graph: &Graph, rules: &Rules, rng: &mut R) -> Self {
        Self {
            play: graph
                .slotted()
                .map(|node| rng.random_range(0..node.moves().len()) as u8)
                .collect(),
            cutoffs: std::array::from_fn(|_| rules.cutoff(rng.random_range(1..=rules.levels))),
        }
    }

    /// uniform crossover of moves, per-bucket random interpolation of cutoffs
    pub fn breed<R: Rng>(&self, other: &Self, rng: &mut R) -> Self {
        assert_eq!(
            self.play.len(),
            other.play.len(),
            "parents were built against different graphs"
        );
        Self {
            play: self
                .play
                .iter()
                .zip(other.play.iter())
                .map(|(&a, &b)| if rng.random_bool(0.5) { a } else { b })
                .collect(),
            cutoffs: std::array::from_fn(|i| {
                Self::lerp(self.cutoffs[i], other.cutoffs[i], rng.random())
            }),
        }
    }

    /// change exactly one entry: either one node's move or one cutoff
    pub fn mutate<R: Rng>(mut self, graph: &Graph, rules: &Rules, rng: &mut R) -> Self {
        assert_eq!(self.play.len(), graph.slots(), "genome built against another graph");
        if rng.random_bool(0.5) && !graph.choices().is_empty() {
            self.mutate_play(graph, rng);
        } else {
            self.mutate_cutoff(rules, rng);
        }
        self
    }
    /// resample one node's move among the moves it is not playing.
    /// nodes with a single legal move have nothing to mutate.
    fn mutate_play<R: Rng>(&mut self, graph: &Graph, rng: &mut R) {
        let &slot = graph.choices().choose(rng).expect("graph offers choices");
        let n = graph.slot(slot).moves().len();
        let current = self.play[slot] as usize;
        self.play[slot] = Self::other(rng, n, current) as u8;
    }
    /// resample one cutoff among the grid levels it does not sit on
    fn mutate_cutoff<R: Rng>(&mut self, rules: &Rules, rng: &mut R) {
        let i = rng.random_range(0..DICE);
        let level = match rules.level(self.cutoffs[i]) {
            Some(current) => Self::other(rng, rules.levels, current - 1) + 1,
            None => rng.random_range(1..=rules.levels),
        };
        self.cutoffs[i] = rules.cutoff(level);
    }

    /// chosen move for a node, None on a bust
    pub fn choice<'g>(&self, node: &'g Node) -> Option<&'g Move> {
        node.slot()
            .map(|slot| &node.moves()[self.play[slot] as usize])
    }
    /// banking threshold with this many dice left to roll
    pub fn cutoff(&self, dice: usize) -> Points {
        assert!((1..=DICE).contains(&dice), "no cutoff for {} dice", dice);
        self.cutoffs[dice - 1]
    }
    pub fn cutoffs(&self) -> &[Points; DICE] {
        &self.cutoffs
    }
    pub fn play(&self) -> &[u8] {
        &self.play
    }
    pub(crate) fn set_cutoff(&mut self, dice: usize, cutoff: Points) {
        assert!((1..=DICE).contains(&dice), "no cutoff for {} dice", dice);
        self.cutoffs[dice - 1] = cutoff;
    }
    pub(crate) fn set_choice(&mut self, slot: usize, choice: u8) {
        self.play[slot] = choice;
    }

    /// a*(1-k) + b*k, floored
    fn lerp(a: Points, b: Points, k: f64) -> Points {
        (a as f64 * (1. - k) + b as f64 * k).floor() as Points
    }
    /// uniform over 0..n excluding `current`
    fn other<R: Rng>(rng: &mut R, n: usize, current: usize) -> usize {
        assert!(n > 1, "no alternative among {} options", n);
        match rng.random_range(0..n - 1) {
            r if r >= current => r + 1,
            r => r,
        }
    }
}

/// raw parts, as stored in checkpoints
impl From<(Vec<u8>, [Points; DICE])> for PartialStrategy {
    fn from((play, cutoffs): (Vec<u8>, [Points; DICE])) -> Self {
        Self { play, cutoffs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn differences(a: &PartialStrategy, b: &PartialStrategy) -> usize {
        let play = a.play().iter().zip(b.play()).filter(|(x, y)| x != y).count();
        let cuts = a.cutoffs().iter().zip(b.cutoffs()).filter(|(x, y)| x != y).count();
        play + cuts
    }

    #[test]
    fn random_is_well_formed() {
        let ref mut rng = SmallRng::seed_from_u64(1);
        let ref graph = Graph::build();
        let ref rules = Rules::default();
        let partial = PartialStrategy::random(graph, rules, rng);
        assert_eq!(partial.play().len(), graph.slots());
        for node in graph.slotted() {
            assert!(partial.choice(node).is_some());
        }
        for node in graph.nodes().filter(|n| n.is_bust()) {
            assert!(partial.choice(node).is_none());
        }
        assert!(partial.cutoffs().iter().all(|c| rules.range().contains(c)));
    }

    #[test]
    fn breed_takes_moves_from_parents() {
        let ref mut rng = SmallRng::seed_from_u64(2);
        let ref graph = Graph::build();
        let ref rules = Rules::default();
        let a = PartialStrategy::random(graph, rules, rng);
        let b = PartialStrategy::random(graph, rules, rng);
        let child = a.breed(&b, rng);
        assert_eq!(child.play().len(), a.play().len());
        for (i, m) in child.play().iter().enumerate() {
            assert!(*m == a.play()[i] || *m == b.play()[i]);
        }
        for i in 0..DICE {
            let lo = a.cutoffs()[i].min(b.cutoffs()[i]);
            let hi = a.cutoffs()[i].max(b.cutoffs()[i]);
            assert!((lo..=hi).contains(&child.cutoffs()[i]));
        }
    }

    #[test]
    fn mutate_changes_exactly_one_entry() {
        let ref mut rng = SmallRng::seed_from_u64(3);
        let ref graph = Graph::build();
        let ref rules = Rules::default();
        let mut partial = PartialStrategy::random(graph, rules, rng);
        for _ in 0..1000 {
            let mutant = partial.clone().mutate(graph, rules, rng);
            assert_eq!(differences(&partial, &mutant), 1);
            assert_eq!(mutant.play().len(), partial.play().len());
            partial = mutant.breed(&partial, rng);
        }
    }

    #[test]
    fn lerp_floors_between_parents() {
        assert_eq!(PartialStrategy::lerp(100, 200, 0.0), 100);
        assert_eq!(PartialStrategy::lerp(100, 200, 0.999), 199);
        assert_eq!(PartialStrategy::lerp(200, 100, 0.5), 150);
    }
}
