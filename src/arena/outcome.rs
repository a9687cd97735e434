use crate::strategy::State;

/// Seat at the table. Home rolls first.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Side {
    Home,
    Away,
}

/// Result of one full game: final scores as seen from the home seat
/// and the number of turns both players took together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    state: State,
    turns: usize,
}

impl Outcome {
    /// the game stops the moment either score reaches the limit,
    /// so at most one side can be holding the larger score.
    pub fn winner(&self) -> Side {
        if self.state.home() > self.state.away() {
            Side::Home
        } else {
            Side::Away
        }
    }
    pub fn state(&self) -> State {
        self.state
    }
    pub fn turns(&self) -> usize {
        self.turns
    }
    /// a round is one turn for each player. a home win cuts the last one short.
    pub fn rounds(&self) -> usize {
        self.turns.div_ceil(2)
    }
}

impl From<(State, usize)> for Outcome {
    fn from((state, turns): (State, usize)) -> Self {
        Self { state, turns }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?} {} after {} rounds", self.winner(), self.state, self.rounds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_pair_up_turns() {
        let home = Outcome::from((State::from((1000, 800)), 5));
        assert_eq!(home.winner(), Side::Home);
        assert_eq!(home.turns(), 5);
        assert_eq!(home.rounds(), 3);
        let away = Outcome::from((State::from((800, 1000)), 6));
        assert_eq!(away.winner(), Side::Away);
        assert_eq!(away.rounds(), 3);
    }
}
