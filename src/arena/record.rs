use super::outcome::Outcome;
use super::outcome::Side;

/// Tally of a series of games from the home player's point of view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    games: usize,
    wins: usize,
    rounds: usize,
}

impl Record {
    pub fn witness(&mut self, outcome: &Outcome) {
        self.games += 1;
        self.rounds += outcome.rounds();
        if outcome.winner() == Side::Home {
            self.wins += 1;
        }
    }
    pub fn games(&self) -> usize {
        self.games
    }
    pub fn wins(&self) -> usize {
        self.wins
    }
    pub fn losses(&self) -> usize {
        self.games - self.wins
    }
    pub fn rate(&self) -> f64 {
        self.wins as f64 / self.games.max(1) as f64
    }
    /// mean rounds per game
    pub fn length(&self) -> f64 {
        self.rounds as f64 / self.games.max(1) as f64
    }
}

impl FromIterator<Outcome> for Record {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        let mut record = Self::default();
        for ref outcome in iter {
            record.witness(outcome);
        }
        record
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}-{} ({:.1}%) {:.1} rounds/game",
            self.wins,
            self.losses(),
            100. * self.rate(),
            self.length()
        )
    }
}
