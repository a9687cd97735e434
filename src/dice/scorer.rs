use super::moves::Move;
use super::roll::Roll;
use crate::FACES;
use crate::Face;
use crate::Points;

/// Scores dice against the fixed table.
///
/// Patterns are consumed from a per-face histogram in a fixed order:
/// the full run, the high run, the low run, multiples of a kind, then
/// loose ones and fives. A set of dice scores only if every die ends up
/// consumed by some pattern; a single unscored die voids the whole set.
pub struct Scorer(Roll);
impl From<Roll> for Scorer {
    fn from(roll: Roll) -> Self {
        Self(roll)
    }
}

impl Scorer {
    const FULL_RUN: Points = 1500;
    const HIGH_RUN: Points = 750;
    const LOW_RUN: Points = 500;
    const ONES_KIND: Points = 1000;
    const KIND: Points = 100;
    const SINGLE_ONE: Points = 100;
    const SINGLE_FIVE: Points = 50;

    /// value of banking exactly these dice, or None if any die is left unscored
    pub fn score(&self) -> Option<Move> {
        let ref mut counts = self.0.counts();
        let mut points = 0;
        points += Self::take_run(counts, 1..=6, Self::FULL_RUN);
        points += Self::take_run(counts, 2..=6, Self::HIGH_RUN);
        points += Self::take_run(counts, 1..=5, Self::LOW_RUN);
        for face in 2..=FACES as Face {
            points += Self::take_kind(counts, face, Self::KIND * face as Points);
        }
        points += Self::take_kind(counts, 1, Self::ONES_KIND);
        points += Self::take_singles(counts, 1, Self::SINGLE_ONE);
        points += Self::take_singles(counts, 5, Self::SINGLE_FIVE);
        match (self.0.size(), counts.iter().all(|&n| n == 0)) {
            (0, _) => None,
            (_, false) => None,
            (n, true) => Some(Move::from((points, n))),
        }
    }

    /// every way to bank a non-empty part of the roll. empty means bust.
    pub fn moves(&self) -> Vec<Move> {
        self.0
            .subsets()
            .filter_map(|subset| Scorer::from(subset).score())
            .collect()
    }

    /// every face in the run present exactly once
    fn take_run(
        counts: &mut [usize; FACES],
        run: std::ops::RangeInclusive<Face>,
        points: Points,
    ) -> Points {
        if run.clone().all(|face| counts[face as usize - 1] == 1) {
            run.for_each(|face| counts[face as usize - 1] -= 1);
            points
        } else {
            0
        }
    }
    /// three or more of a face, doubling per die beyond the third
    fn take_kind(counts: &mut [usize; FACES], face: Face, base: Points) -> Points {
        match counts[face as usize - 1] {
            n if n >= 3 => {
                counts[face as usize - 1] = 0;
                base << (n - 3)
            }
            _ => 0,
        }
    }
    fn take_singles(counts: &mut [usize; FACES], face: Face, each: Points) -> Points {
        let n = std::mem::take(&mut counts[face as usize - 1]);
        each * n as Points
    }
}
