use crate::DICE;
use crate::FACES;
use crate::Face;

/// Roll represents an unordered multiset of dice. the count of each face
/// lives in its own nibble of a u32, face f in bits 4(f-1)..4f, so two rolls
/// holding the same faces in any order share one word. that word is the
/// canonical key we hash, compare, and index by.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Roll(u32);

impl Roll {
    /// number of dice in the roll
    pub fn size(&self) -> usize {
        self.counts().iter().sum()
    }
    /// how many dice show this face
    pub fn count(&self, face: Face) -> usize {
        ((self.0 >> Self::shift(face)) & 0xF) as usize
    }
    /// per-face histogram, index 0 holds the ones
    pub fn counts(&self) -> [usize; FACES] {
        std::array::from_fn(|i| self.count(i as Face + 1))
    }
    /// faces in ascending order
    pub fn dice(&self) -> Vec<Face> {
        (1..=FACES as Face)
            .flat_map(|face| std::iter::repeat_n(face, self.count(face)))
            .collect()
    }
    /// every non-empty sub-multiset, each face-count vector exactly once.
    /// we walk the mixed-radix counter whose digit for face f runs 0..=count(f),
    /// skipping the all-zero digit string.
    pub fn subsets(&self) -> impl Iterator<Item = Roll> {
        let counts = self.counts();
        let total = counts.iter().map(|c| c + 1).product::<usize>();
        (1..total).map(move |mut index| {
            let mut sub = [0; FACES];
            for (digit, count) in sub.iter_mut().zip(counts.iter()) {
                *digit = index % (count + 1);
                index /= count + 1;
            }
            Roll::from(sub)
        })
    }

    fn shift(face: Face) -> u32 {
        assert!(
            (1..=FACES as Face).contains(&face),
            "die face out of range: {}",
            face
        );
        4 * (face as u32 - 1)
    }
}

/// u32 isomorphism
impl From<Roll> for u32 {
    fn from(roll: Roll) -> u32 {
        roll.0
    }
}

/// histogram isomorphism
impl From<[usize; FACES]> for Roll {
    fn from(counts: [usize; FACES]) -> Self {
        assert!(
            counts.iter().sum::<usize>() <= DICE,
            "too many dice: {:?}",
            counts
        );
        Self(
            counts
                .iter()
                .enumerate()
                .map(|(i, &n)| (n as u32) << Self::shift(i as Face + 1))
                .fold(0u32, |a, b| a | b),
        )
    }
}

/// dice isomorphism (up to permutation, this always comes out sorted)
impl From<&[Face]> for Roll {
    fn from(dice: &[Face]) -> Self {
        assert!(
            (1..=DICE).contains(&dice.len()),
            "a roll holds 1 to {} dice, got {}",
            DICE,
            dice.len()
        );
        let mut counts = [0; FACES];
        for &face in dice {
            assert!(
                (1..=FACES as Face).contains(&face),
                "die face out of range: {}",
                face
            );
            counts[face as usize - 1] += 1;
        }
        Self::from(counts)
    }
}
impl From<Vec<Face>> for Roll {
    fn from(dice: Vec<Face>) -> Self {
        Self::from(dice.as_slice())
    }
}

/// str isomorphism, digits with optional whitespace: "1134" or "1 1 3 4"
impl TryFrom<&str> for Roll {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let dice = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c.to_digit(10) {
                Some(d) if (1..=FACES as u32).contains(&d) => Ok(d as Face),
                _ => Err(anyhow::anyhow!("invalid die face: {}", c)),
            })
            .collect::<Result<Vec<Face>, _>>()?;
        if (1..=DICE).contains(&dice.len()) {
            Ok(Self::from(dice))
        } else {
            Err(anyhow::anyhow!("a roll holds 1 to {} dice: {}", DICE, s))
        }
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for face in self.dice() {
            write!(f, "{}", face)?;
        }
        Ok(())
    }
}
