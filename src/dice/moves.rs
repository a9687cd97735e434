use crate::Points;

/// One legal way to bank part of a roll: the points it is worth
/// and how many dice it sets aside.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Move {
    score: Points,
    dice: usize,
}

impl Move {
    pub fn score(&self) -> Points {
        self.score
    }
    pub fn dice(&self) -> usize {
        self.dice
    }
}

impl From<(Points, usize)> for Move {
    fn from((score, dice): (Points, usize)) -> Self {
        assert!((1..=crate::DICE).contains(&dice), "move consumes {} dice", dice);
        Self { score, dice }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.score, self.dice)
    }
}
