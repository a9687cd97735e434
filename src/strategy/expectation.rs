use super::partial::PartialStrategy;
use crate::DICE;
use crate::Points;
use crate::Probability;
use crate::graph::Graph;

/// Exact expected round score of a PartialStrategy.
///
/// `table[i][d - 1]` is the expected final score of a round that is about
/// to roll `d` dice holding `i * grain` points. Every move scores a
/// positive multiple of the grain, so each entry depends only on entries
/// with more points and the table fills from the top down. Rounds that
/// reach the largest cutoff always bank, which bounds the table.
#[derive(Debug, Clone)]
pub struct Expectation {
    grain: Points,
    table: Vec<[Probability; DICE]>,
}

impl From<(&PartialStrategy, &Graph)> for Expectation {
    fn from((partial, graph): (&PartialStrategy, &Graph)) -> Self {
        let grain = graph.grain();
        let ceiling = partial.cutoffs().iter().copied().max().unwrap_or_default();
        let top = ceiling.div_ceil(grain) as usize;
        let mut table = vec![[0.; DICE]; top + 1];
        for i in (0..=top).rev() {
            for dice in 1..=DICE {
                let value: Probability = graph
                    .seminode(dice)
                    .edges()
                    .iter()
                    .filter_map(|(node, p)| partial.choice(node).map(|m| (m, p)))
                    .map(|(m, p)| {
                        let left = match dice - m.dice() {
                            0 => DICE,
                            n => n,
                        };
                        let j = i + (m.score() / grain) as usize;
                        let points = j as Points * grain;
                        if points >= partial.cutoff(left) {
                            p * points as Probability
                        } else {
                            p * table[j][left - 1]
                        }
                    })
                    .sum();
                table[i][dice - 1] = value;
            }
        }
        Self { grain, table }
    }
}

impl Expectation {
    /// expected score of a fresh round
    pub fn value(&self) -> Probability {
        self.at(DICE, 0)
    }
    /// expected final score when about to roll `dice` dice holding `points`
    pub fn at(&self, dice: usize, points: Points) -> Probability {
        assert!((1..=DICE).contains(&dice), "cannot roll {} dice", dice);
        assert!(points % self.grain == 0, "{} is off the {} grain", points, self.grain);
        self.table
            .get((points / self.grain) as usize)
            .map(|row| row[dice - 1])
            .unwrap_or(points as Probability)
    }
}
