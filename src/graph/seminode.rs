use super::factorials::Factorials;
use super::node::Node;
use crate::Probability;
use crate::dice::RollIterator;
use rand::Rng;

/// Every distinct roll of a fixed number of dice, each paired with
/// its exact probability. The probabilities form a distribution.
#[derive(Debug, Clone)]
pub struct Seminode {
    dice: usize,
    edges: Vec<(Node, Probability)>,
}

impl Seminode {
    pub(crate) fn build(dice: usize, factorials: &Factorials) -> Self {
        Self {
            dice,
            edges: RollIterator::from(dice)
                .map(|roll| (Node::from(roll), factorials.probability(&roll)))
                .collect(),
        }
    }
    pub(crate) fn edges_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.edges.iter_mut().map(|(node, _)| node)
    }

    /// number of dice rolled
    pub fn dice(&self) -> usize {
        self.dice
    }
    pub fn edges(&self) -> &[(Node, Probability)] {
        &self.edges
    }
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.edges.iter().map(|(node, _)| node)
    }
    /// sum of edge probabilities, 1 up to rounding
    pub fn total(&self) -> Probability {
        self.edges.iter().map(|(_, p)| p).sum()
    }
    /// probability of rolling a bust with this many dice
    pub fn bust(&self) -> Probability {
        self.edges
            .iter()
            .filter(|(node, _)| node.is_bust())
            .map(|(_, p)| p)
            .sum()
    }

    /// inverse-CDF sampling: subtract edge probabilities from a uniform
    /// draw until it drops to zero. rounding can leave a sliver of mass
    /// past the final edge, which belongs to the final edge.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> &Node {
        let mut seed = rng.random::<Probability>();
        self.edges
            .iter()
            .find(|(_, p)| {
                seed -= p;
                seed <= 0.
            })
            .or_else(|| self.edges.last())
            .map(|(node, _)| node)
            .expect("seminode holds at least one roll")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn distribution_sums_to_one() {
        let factorials = Factorials::default();
        for dice in 1..=crate::DICE {
            let seminode = Seminode::build(dice, &factorials);
            assert!((seminode.total() - 1.).abs() < 1e-9, "{} dice", dice);
        }
    }

    #[test]
    fn single_die_busts_two_thirds() {
        let seminode = Seminode::build(1, &Factorials::default());
        assert_eq!(seminode.edges().len(), 6);
        assert!((seminode.bust() - 4. / 6.).abs() < 1e-12);
    }

    #[test]
    fn sampling_tracks_probabilities() {
        let ref mut rng = SmallRng::seed_from_u64(7);
        let seminode = Seminode::build(2, &Factorials::default());
        let n = 100_000;
        let pairs = (0..n)
            .map(|_| seminode.sample(rng))
            .filter(|node| node.dice()[0] == node.dice()[1])
            .count();
        let observed = pairs as Probability / n as Probability;
        assert!((observed - 1. / 6.).abs() < 0.01, "{}", observed);
    }
}
