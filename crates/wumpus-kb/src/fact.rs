use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Symbolic assertion about exactly one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Fact {
    /// Confirmed live (or not yet known dead) wumpus.
    Wumpus,
    Pit,
    Gold,
    Safe,
    NoWumpus,
    NoPit,
    MaybeWumpus,
    MaybePit,
    /// Stench was sensed while standing on this cell.
    Stench,
    /// Breeze was sensed while standing on this cell.
    Breeze,
    DeadWumpus,
}

impl Fact {
    pub const ALL: [Fact; 11] = [
        Fact::Wumpus,
        Fact::Pit,
        Fact::Gold,
        Fact::Safe,
        Fact::NoWumpus,
        Fact::NoPit,
        Fact::MaybeWumpus,
        Fact::MaybePit,
        Fact::Stench,
        Fact::Breeze,
        Fact::DeadWumpus,
    ];

    pub(crate) fn bit(self) -> u16 {
        1 << (self as u16)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Fact::Wumpus => "W",
            Fact::Pit => "P",
            Fact::Gold => "G",
            Fact::Safe => "S",
            Fact::NoWumpus => "-W",
            Fact::NoPit => "-P",
            Fact::MaybeWumpus => "W?",
            Fact::MaybePit => "P?",
            Fact::Stench => "HasStench",
            Fact::Breeze => "HasBreeze",
            Fact::DeadWumpus => "DeadW",
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Bitset over [`Fact`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FactSet(u16);

impl FactSet {
    pub const EMPTY: FactSet = FactSet(0);

    pub fn contains(self, fact: Fact) -> bool {
        (self.0 & fact.bit()) != 0
    }

    pub fn insert(&mut self, fact: Fact) -> bool {
        let had = self.contains(fact);
        self.0 |= fact.bit();
        !had
    }

    pub fn remove(&mut self, fact: Fact) -> bool {
        let had = self.contains(fact);
        self.0 &= !fact.bit();
        had
    }

    pub fn union(self, other: FactSet) -> FactSet {
        FactSet(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Fact> {
        Fact::ALL.into_iter().filter(move |f| self.contains(*f))
    }

    /// Holds a wumpus that has not been confirmed dead.
    pub fn has_live_wumpus(self) -> bool {
        self.contains(Fact::Wumpus) && !self.contains(Fact::DeadWumpus)
    }
}

impl fmt::Debug for FactSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Fact::symbol)).finish()
    }
}

impl FromIterator<Fact> for FactSet {
    fn from_iter<I: IntoIterator<Item = Fact>>(iter: I) -> Self {
        let mut out = FactSet::EMPTY;
        for f in iter {
            out.insert(f);
        }
        out
    }
}
