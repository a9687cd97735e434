use crate::DICE;
use crate::FACES;
use crate::Probability;
use crate::dice::Roll;

/// 0! through DICE!, built eagerly.
#[derive(Debug, Clone, Copy)]
pub struct Factorials([u64; DICE + 1]);

impl Default for Factorials {
    fn default() -> Self {
        let mut table = [1u64; DICE + 1];
        for n in 1..=DICE {
            table[n] = table[n - 1] * n as u64;
        }
        Self(table)
    }
}

impl Factorials {
    pub fn get(&self, n: usize) -> u64 {
        self.0[n]
    }
    /// multinomial probability of rolling exactly this multiset
    /// with as many fair dice as it holds:
    /// n! / (Π count_f!) / FACES^n
    pub fn probability(&self, roll: &Roll) -> Probability {
        let n = roll.size();
        let orderings = roll
            .counts()
            .iter()
            .map(|&k| self.get(k))
            .fold(self.get(n), |a, b| a / b);
        orderings as Probability / (FACES as Probability).powi(n as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table() {
        let f = Factorials::default();
        assert_eq!(f.get(0), 1);
        assert_eq!(f.get(1), 1);
        assert_eq!(f.get(6), 720);
    }

    #[test]
    fn multinomial() {
        let f = Factorials::default();
        let run = Roll::try_from("123456").unwrap();
        let sixes = Roll::try_from("666666").unwrap();
        let pair = Roll::try_from("15").unwrap();
        assert!((f.probability(&run) - 720. / 46656.).abs() < 1e-12);
        assert!((f.probability(&sixes) - 1. / 46656.).abs() < 1e-12);
        assert!((f.probability(&pair) - 2. / 36.).abs() < 1e-12);
    }
}
