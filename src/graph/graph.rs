use super::factorials::Factorials;
use super::node::Node;
use super::seminode::Seminode;
use crate::DICE;
use crate::Points;
use crate::dice::Roll;
use std::collections::BTreeMap;

/// The outcome graph: one Seminode per dice count, 1 through DICE.
///
/// Built once, single-threaded, before any training starts. From then on
/// it is only ever read, so every worker shares it by plain reference.
/// Besides the Seminodes it owns the lookup tables derived from them:
/// canonical roll to node, slot to node, and the slots whose node offers
/// a real choice of moves.
#[derive(Debug, Clone)]
pub struct Graph {
    seminodes: Vec<Seminode>,
    index: BTreeMap<Roll, (usize, usize)>,
    slots: Vec<(usize, usize)>,
    choices: Vec<usize>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::build()
    }
}

impl Graph {
    pub fn build() -> Self {
        let factorials = Factorials::default();
        let mut seminodes = (1..=DICE)
            .map(|dice| Seminode::build(dice, &factorials))
            .collect::<Vec<_>>();
        let mut index = BTreeMap::new();
        let mut slots = Vec::new();
        let mut choices = Vec::new();
        for (s, seminode) in seminodes.iter_mut().enumerate() {
            for (e, node) in seminode.edges_mut().enumerate() {
                index.insert(node.roll(), (s, e));
                if node.is_bust() {
                    continue;
                }
                if node.moves().len() > 1 {
                    choices.push(slots.len());
                }
                node.assign(slots.len());
                slots.push((s, e));
            }
        }
        let graph = Self {
            seminodes,
            index,
            slots,
            choices,
        };
        log::info!("{:<32}{:<32}", "built outcome graph", format!("{} nodes", graph.size()));
        log::info!("{:<32}{:<32}", "bust rolls", format!("{} nodes", graph.size() - graph.slots()));
        log::info!("{:<32}{:<32}", "legal moves", format!("{} moves", graph.moves()));
        graph
    }

    /// the Seminode for this many dice
    pub fn seminode(&self, dice: usize) -> &Seminode {
        assert!((1..=DICE).contains(&dice), "cannot roll {} dice", dice);
        &self.seminodes[dice - 1]
    }
    pub fn seminodes(&self) -> &[Seminode] {
        &self.seminodes
    }
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.seminodes.iter().flat_map(|s| s.nodes())
    }
    /// node for a canonical roll of 1 to DICE dice
    pub fn node(&self, roll: &Roll) -> Option<&Node> {
        self.index
            .get(roll)
            .map(|&(s, e)| &self.seminodes[s].edges()[e].0)
    }
    /// non-bust node at this slot
    pub fn slot(&self, slot: usize) -> &Node {
        let (s, e) = self.slots[slot];
        &self.seminodes[s].edges()[e].0
    }
    /// non-bust nodes in slot order
    pub fn slotted(&self) -> impl Iterator<Item = &Node> {
        (0..self.slots()).map(|slot| self.slot(slot))
    }
    /// slots whose node offers more than one move
    pub fn choices(&self) -> &[usize] {
        &self.choices
    }

    /// total number of nodes
    pub fn size(&self) -> usize {
        self.index.len()
    }
    /// number of non-bust nodes
    pub fn slots(&self) -> usize {
        self.slots.len()
    }
    /// total number of moves over all nodes
    pub fn moves(&self) -> usize {
        self.nodes().map(|n| n.moves().len()).sum()
    }
    /// greatest common divisor of all move scores. every accumulated
    /// round score is a multiple of it.
    pub fn grain(&self) -> Points {
        fn gcd(a: Points, b: Points) -> Points {
            if b == 0 { a } else { gcd(b, a % b) }
        }
        self.nodes()
            .flat_map(|n| n.moves())
            .map(|m| m.score())
            .fold(0, gcd)
    }
}
