use crate::Points;
use crate::config::Rules;

/// Both players' banked scores, from the point of view of whoever is
/// about to roll: home is their own score, away their opponent's.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct State {
    home: Points,
    away: Points,
}

impl State {
    pub fn home(&self) -> Points {
        self.home
    }
    pub fn away(&self) -> Points {
        self.away
    }
    pub fn finished(&self, limit: Points) -> bool {
        self.home >= limit || self.away >= limit
    }
    /// same scores, seen from the other player's seat
    pub fn flip(&self) -> Self {
        Self {
            home: self.away,
            away: self.home,
        }
    }
    pub fn bank_home(&mut self, points: Points) {
        self.home += points;
    }
    pub fn bank_away(&mut self, points: Points) {
        self.away += points;
    }
    /// dense index of this State's bucket pair. scores at or past the
    /// limit share the last bucket.
    pub fn index(&self, rules: &Rules) -> usize {
        let last = rules.buckets() - 1;
        let home = ((self.home / rules.step) as usize).min(last);
        let away = ((self.away / rules.step) as usize).min(last);
        home * rules.buckets() + away
    }
    /// lowest State of the bucket pair at this dense index
    pub fn bucket(index: usize, rules: &Rules) -> Self {
        assert!(index < rules.states(), "state index {} out of range", index);
        Self {
            home: (index / rules.buckets()) as Points * rules.step,
            away: (index % rules.buckets()) as Points * rules.step,
        }
    }
}

impl From<(Points, Points)> for State {
    fn from((home, away): (Points, Points)) -> Self {
        Self { home, away }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.home, self.away)
    }
}
