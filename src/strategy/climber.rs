use super::expectation::Expectation;
use super::partial::PartialStrategy;
use crate::DICE;
use crate::Probability;
use crate::config::Rules;
use crate::graph::Graph;
use rand::Rng;

/// Coordinate ascent on the exact expected round score of one
/// PartialStrategy.
///
/// Each step picks one coordinate at random, either a cutoff or the move
/// of a node with alternatives, and sets it to its best value with every
/// other coordinate held fixed. A coordinate only changes on a strict
/// improvement, so the tracked value never goes down.
#[derive(Debug, Clone)]
pub struct Climber<'g> {
    graph: &'g Graph,
    rules: Rules,
    partial: PartialStrategy,
    value: Probability,
}

impl<'g> Climber<'g> {
    pub fn new(graph: &'g Graph, rules: &Rules, partial: PartialStrategy) -> Self {
        assert_eq!(partial.play().len(), graph.slots(), "policy built against another graph");
        let value = Expectation::from((&partial, graph)).value();
        Self {
            graph,
            rules: *rules,
            partial,
            value,
        }
    }
    pub fn value(&self) -> Probability {
        self.value
    }
    pub fn partial(&self) -> &PartialStrategy {
        &self.partial
    }
    pub fn into_partial(self) -> PartialStrategy {
        self.partial
    }

    /// re-optimise one random coordinate
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Probability {
        let graph = self.graph;
        let choices = graph.choices();
        match rng.random_range(0..DICE + choices.len()) {
            i if i < DICE => self.cutoff(i + 1),
            i => self.choice(choices[i - DICE]),
        }
        self.value
    }

    pub fn climb<R: Rng>(&mut self, steps: usize, rng: &mut R) -> Probability {
        let start = self.value;
        for i in 0..steps {
            let before = self.value;
            if self.step(rng) > before {
                log::debug!("{:<32}{:<32}", format!("climb step {}", i), format!("{:.3}", self.value));
            }
        }
        log::info!(
            "{:<32}{:<32}",
            format!("climbed {} steps", steps),
            format!("{:.1} -> {:.1}", start, self.value)
        );
        self.value
    }

    /// best grid level for the cutoff with `dice` dice left
    fn cutoff(&mut self, dice: usize) {
        let current = self.partial.cutoff(dice);
        let mut best = (self.value, current);
        for level in 1..=self.rules.levels {
            let cutoff = self.rules.cutoff(level);
            if cutoff == current {
                continue;
            }
            self.partial.set_cutoff(dice, cutoff);
            let value = self.evaluate();
            if value > best.0 {
                best = (value, cutoff);
            }
        }
        self.partial.set_cutoff(dice, best.1);
        self.value = best.0;
    }

    /// best move for the node at `slot`
    fn choice(&mut self, slot: usize) {
        let current = self.partial.play()[slot];
        let mut best = (self.value, current);
        for choice in 0..self.graph.slot(slot).moves().len() as u8 {
            if choice == current {
                continue;
            }
            self.partial.set_choice(slot, choice);
            let value = self.evaluate();
            if value > best.0 {
                best = (value, choice);
            }
        }
        self.partial.set_choice(slot, best.1);
        self.value = best.0;
    }

    fn evaluate(&self) -> Probability {
        Expectation::from((&self.partial, self.graph)).value()
    }
}
