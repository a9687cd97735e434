use crate::Face;
use crate::dice::Move;
use crate::dice::Roll;
use crate::dice::Scorer;

/// A canonical roll together with every legal way to bank part of it.
///
/// Non-bust nodes also carry a slot: their position among all non-bust
/// nodes of the graph. Play tables are indexed by slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    roll: Roll,
    moves: Vec<Move>,
    slot: Option<usize>,
}

impl Node {
    pub fn roll(&self) -> Roll {
        self.roll
    }
    /// sorted faces
    pub fn dice(&self) -> Vec<Face> {
        self.roll.dice()
    }
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }
    pub fn slot(&self) -> Option<usize> {
        self.slot
    }
    pub fn is_bust(&self) -> bool {
        self.moves.is_empty()
    }
    /// only the graph hands out slots, once, while it is being built
    pub(crate) fn assign(&mut self, slot: usize) {
        assert!(!self.is_bust(), "bust node {} cannot hold a slot", self);
        assert!(self.slot.is_none(), "node {} already slotted", self);
        self.slot = Some(slot);
    }
}

impl From<Roll> for Node {
    fn from(roll: Roll) -> Self {
        Self {
            roll,
            moves: Scorer::from(roll).moves(),
            slot: None,
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.roll)
    }
}
