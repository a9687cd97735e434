use super::partial::PartialStrategy;
use super::state::State;
use crate::config::Rules;
use crate::graph::Graph;
use rand::Rng;

/// A complete genome: one PartialStrategy for every State bucket pair,
/// stored densely in `State::index` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    rules: Rules,
    partials: Vec<PartialStrategy>,
}

impl Strategy {
    pub fn random<R: Rng>(graph: &Graph, rules: &Rules, rng: &mut R) -> Self {
        Self {
            rules: *rules,
            partials: (0..rules.states())
                .map(|_| PartialStrategy::random(graph, rules, rng))
                .collect(),
        }
    }
    /// bucket-wise crossover
    pub fn breed<R: Rng>(&self, other: &Self, rng: &mut R) -> Self {
        assert_eq!(self.rules, other.rules, "parents play by different rules");
        Self {
            rules: self.rules,
            partials: self
                .partials
                .iter()
                .zip(other.partials.iter())
                .map(|(a, b)| a.breed(b, rng))
                .collect(),
        }
    }
    /// mutates every bucket's PartialStrategy once
    pub fn mutate<R: Rng>(self, graph: &Graph, rng: &mut R) -> Self {
        let rules = self.rules;
        Self {
            rules,
            partials: self
                .partials
                .into_iter()
                .map(|partial| partial.mutate(graph, &rules, rng))
                .collect(),
        }
    }

    /// policy for the bucket this State falls in
    pub fn partial(&self, state: &State) -> &PartialStrategy {
        &self.partials[state.index(&self.rules)]
    }
    pub fn partials(&self) -> &[PartialStrategy] {
        &self.partials
    }
    pub fn rules(&self) -> &Rules {
        &self.rules
    }
    /// the lowest State of every bucket pair, in storage order
    pub fn states(&self) -> impl Iterator<Item = State> + '_ {
        (0..self.partials.len()).map(|i| State::bucket(i, &self.rules))
    }
}

/// raw parts, as stored in checkpoints
impl From<(Rules, Vec<PartialStrategy>)> for Strategy {
    fn from((rules, partials): (Rules, Vec<PartialStrategy>)) -> Self {
        assert_eq!(partials.len(), rules.states(), "genome does not cover every state");
        Self { rules, partials }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn small() -> Rules {
        Rules {
            limit: 500,
            step: 50,
            levels: 10,
        }
    }

    #[test]
    fn covers_every_state() {
        let ref mut rng = SmallRng::seed_from_u64(11);
        let ref graph = Graph::build();
        let strategy = Strategy::random(graph, &small(), rng);
        assert_eq!(strategy.partials().len(), 100);
        let states = strategy.states().collect::<Vec<_>>();
        assert_eq!(states.len(), 100);
        for (i, state) in states.iter().enumerate() {
            assert_eq!(state.index(strategy.rules()), i);
            assert!(std::ptr::eq(strategy.partial(state), &strategy.partials()[i]));
        }
    }

    #[test]
    fn operators_preserve_keys() {
        let ref mut rng = SmallRng::seed_from_u64(12);
        let ref graph = Graph::build();
        let a = Strategy::random(graph, &small(), rng);
        let b = Strategy::random(graph, &small(), rng);
        let child = a.breed(&b, rng);
        let mutant = child.clone().mutate(graph, rng);
        for genome in [&child, &mutant] {
            assert_eq!(genome.rules(), a.rules());
            assert_eq!(genome.states().collect::<Vec<_>>(), a.states().collect::<Vec<_>>());
            assert!(genome.partials().iter().all(|p| p.play().len() == graph.slots()));
        }
        for (before, after) in child.partials().iter().zip(mutant.partials()) {
            assert_ne!(before, after);
        }
    }

    #[test]
    #[should_panic]
    fn breeding_across_rules_panics() {
        let ref mut rng = SmallRng::seed_from_u64(13);
        let ref graph = Graph::build();
        let a = Strategy::random(graph, &small(), rng);
        let b = Strategy::random(graph, &Rules { limit: 1000, ..small() }, rng);
        a.breed(&b, rng);
    }
}
