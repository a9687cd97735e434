use super::roll::Roll;
use crate::DICE;
use crate::FACES;
use crate::Face;

/// Iterates over every distinct roll of a fixed number of dice,
/// i.e. combinations with repetition of the faces, in lexicographic
/// order of their sorted dice: 11, 12, ..., 16, 22, 23, ..., 66.
pub struct RollIterator {
    size: usize,
    next: Option<[Face; DICE]>,
}

impl RollIterator {
    /// C(size + FACES - 1, size)
    pub fn combinations(&self) -> usize {
        (0..self.size).fold(1, |n, k| n * (FACES + k) / (k + 1))
    }
}

impl From<usize> for RollIterator {
    fn from(size: usize) -> Self {
        assert!((1..=DICE).contains(&size), "cannot roll {} dice", size);
        Self {
            size,
            next: Some([1; DICE]),
        }
    }
}

impl Iterator for RollIterator {
    type Item = Roll;
    fn next(&mut self) -> Option<Self::Item> {
        let mut dice = self.next?;
        let roll = Roll::from(&dice[..self.size]);
        self.next = match (0..self.size).rev().find(|&i| dice[i] < FACES as Face) {
            None => None,
            Some(i) => {
                let face = dice[i] + 1;
                dice[i..self.size].fill(face);
                Some(dice)
            }
        };
        Some(roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_match_multichoose() {
        for (size, expected) in [(1, 6), (2, 21), (3, 56), (4, 126), (5, 252), (6, 462)] {
            let iter = RollIterator::from(size);
            assert_eq!(iter.combinations(), expected);
            assert_eq!(iter.count(), expected);
        }
    }

    #[test]
    fn lexicographic_and_distinct() {
        let rolls = RollIterator::from(3).collect::<Vec<_>>();
        let dice = rolls.iter().map(|r| r.dice()).collect::<Vec<_>>();
        assert!(dice.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(dice.first(), Some(&vec![1, 1, 1]));
        assert_eq!(dice.last(), Some(&vec![6, 6, 6]));
        assert!(rolls.iter().all(|r| r.size() == 3));
    }
}
