use super::outcome::Outcome;
use super::outcome::Side;
use super::record::Record;
use crate::DICE;
use crate::Points;
use crate::graph::Graph;
use crate::strategy::PartialStrategy;
use crate::strategy::State;
use crate::strategy::Strategy;
use rand::Rng;

/// Monte Carlo game simulator over a shared outcome graph.
///
/// `games` is the number of games played per seating in `compete`.
#[derive(Debug, Clone, Copy)]
pub struct Arena<'g> {
    graph: &'g Graph,
    games: usize,
}

impl<'g> Arena<'g> {
    pub fn new(graph: &'g Graph, games: usize) -> Self {
        assert!(games > 0, "arena needs at least one game per seating");
        Self { graph, games }
    }
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }
    pub fn games(&self) -> usize {
        self.games
    }

    /// One turn under a single policy. Returns the banked score, 0 on a bust.
    /// Scoring with every remaining die hands all six back.
    pub fn round<R: Rng>(&self, partial: &PartialStrategy, rng: &mut R) -> Points {
        let mut dice = DICE;
        let mut score = 0;
        loop {
            let node = self.graph.seminode(dice).sample(rng);
            match partial.choice(node) {
                None => return 0,
                Some(m) => {
                    score += m.score();
                    dice = match dice - m.dice() {
                        0 => DICE,
                        n => n,
                    };
                    if score >= partial.cutoff(dice) {
                        return score;
                    }
                }
            }
        }
    }

    /// Alternate turns from 0-0 until either score reaches the limit.
    /// Each player looks up its policy from its own seat.
    pub fn game<R: Rng>(&self, home: &Strategy, away: &Strategy, rng: &mut R) -> Outcome {
        assert_eq!(home.rules(), away.rules(), "players disagree on the rules");
        let limit = home.rules().limit;
        let mut state = State::default();
        let mut turns = 0;
        loop {
            turns += 1;
            let points = self.round(home.partial(&state), rng);
            state.bank_home(points);
            if state.finished(limit) {
                return Outcome::from((state, turns));
            }
            turns += 1;
            let points = self.round(away.partial(&state.flip()), rng);
            state.bank_away(points);
            if state.finished(limit) {
                return Outcome::from((state, turns));
            }
        }
    }

    /// Tournament fitness. Plays `games` games with `a` rolling first and
    /// `games` with `b` rolling first, and prefers whoever wins more often
    /// from the first seat. Equal counts are settled by a coin flip.
    pub fn compete<R: Rng>(&self, a: &Strategy, b: &Strategy, rng: &mut R) -> bool {
        let a_first = self.duel(a, b, self.games, rng).wins();
        let b_first = self.duel(b, a, self.games, rng).wins();
        match a_first.cmp(&b_first) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => rng.random_bool(0.5),
        }
    }

    /// `n` games with `home` always seated first.
    pub fn duel<R: Rng>(&self, home: &Strategy, away: &Strategy, n: usize, rng: &mut R) -> Record {
        (0..n).map(|_| self.game(home, away, rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rules;
    use crate::strategy::Expectation;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn small() -> Rules {
        Rules {
            limit: 1000,
            step: 50,
            levels: 20,
        }
    }

    /// every state plays the same partial
    fn uniform(partial: PartialStrategy, rules: &Rules) -> Strategy {
        Strategy::from((*rules, vec![partial; rules.states()]))
    }

    /// highest-scoring move everywhere, banks at 300
    fn greedy(graph: &Graph) -> PartialStrategy {
        let play = graph
            .slotted()
            .map(|node| {
                (0..node.moves().len())
                    .max_by_key(|&i| node.moves()[i].score())
                    .unwrap() as u8
            })
            .collect();
        PartialStrategy::from((play, [300; DICE]))
    }

    /// lowest-scoring move everywhere, banks at the first opportunity
    fn timid(graph: &Graph) -> PartialStrategy {
        let play = graph
            .slotted()
            .map(|node| {
                (0..node.moves().len())
                    .min_by_key(|&i| node.moves()[i].score())
                    .unwrap() as u8
            })
            .collect();
        PartialStrategy::from((play, [50; DICE]))
    }

    #[test]
    fn round_banks_past_cutoff() {
        let ref mut rng = SmallRng::seed_from_u64(31);
        let ref graph = Graph::build();
        let arena = Arena::new(graph, 1);
        let partial = greedy(graph);
        for _ in 0..10_000 {
            let score = arena.round(&partial, rng);
            assert!(score == 0 || score >= 300, "{}", score);
            assert!(score % graph.grain() == 0);
        }
    }

    #[test]
    fn game_ends_at_limit_with_one_winner() {
        let ref mut rng = SmallRng::seed_from_u64(32);
        let ref graph = Graph::build();
        let ref rules = small();
        let arena = Arena::new(graph, 1);
        for _ in 0..200 {
            let home = Strategy::random(graph, rules, rng);
            let away = Strategy::random(graph, rules, rng);
            let outcome = arena.game(&home, &away, rng);
            let state = outcome.state();
            assert!(state.finished(rules.limit));
            assert!(!(state.home() >= rules.limit && state.away() >= rules.limit));
            match outcome.winner() {
                Side::Home => assert!(state.home() >= rules.limit),
                Side::Away => assert!(state.away() >= rules.limit),
            }
            match outcome.winner() {
                Side::Home => assert!(outcome.turns() % 2 == 1),
                Side::Away => assert!(outcome.turns() % 2 == 0),
            }
            assert_eq!(outcome.rounds(), outcome.turns().div_ceil(2));
        }
    }

    #[test]
    fn compete_favors_higher_expectation() {
        let ref mut rng = SmallRng::seed_from_u64(33);
        let ref graph = Graph::build();
        let ref rules = small();
        let strong = greedy(graph);
        let weak = timid(graph);
        let strong_value = Expectation::from((&strong, graph)).value();
        let weak_value = Expectation::from((&weak, graph)).value();
        assert!(strong_value > weak_value, "{} vs {}", strong_value, weak_value);
        let strong = uniform(strong, rules);
        let weak = uniform(weak, rules);
        let arena = Arena::new(graph, 100);
        for _ in 0..5 {
            assert!(arena.compete(&strong, &weak, rng));
            assert!(!arena.compete(&weak, &strong, rng));
        }
    }

    #[test]
    fn mirror_match_is_balanced() {
        let ref mut rng = SmallRng::seed_from_u64(34);
        let ref graph = Graph::build();
        let ref rules = small();
        let genome = Strategy::random(graph, rules, rng);
        let arena = Arena::new(graph, 20);
        let trials = 40;
        let wins = (0..trials)
            .filter(|_| arena.compete(&genome, &genome, rng))
            .count();
        assert!((8..=32).contains(&wins), "{} of {}", wins, trials);
    }

    #[test]
    fn duel_counts_home_wins() {
        let ref mut rng = SmallRng::seed_from_u64(35);
        let ref graph = Graph::build();
        let ref rules = small();
        let arena = Arena::new(graph, 1);
        let strong = uniform(greedy(graph), rules);
        let weak = uniform(timid(graph), rules);
        let record = arena.duel(&strong, &weak, 50, rng);
        assert_eq!(record.games(), 50);
        assert!(record.rate() > 0.5, "{}", record);
        assert!(record.length() > 1.);
    }
}
