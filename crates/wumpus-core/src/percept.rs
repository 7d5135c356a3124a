use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sensory tag available at the agent's current cell for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Percept {
    Stench,
    Breeze,
    Glitter,
    Bump,
    Scream,
}

impl Percept {
    pub const ALL: [Percept; 5] = [
        Percept::Stench,
        Percept::Breeze,
        Percept::Glitter,
        Percept::Bump,
        Percept::Scream,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Percept::Stench => "Stench",
            Percept::Breeze => "Breeze",
            Percept::Glitter => "Glitter",
            Percept::Bump => "Bump",
            Percept::Scream => "Scream",
        }
    }
}

/// Small set of percepts, one bit per tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Percepts(u8);

impl fmt::Debug for Percepts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Percept::as_str)).finish()
    }
}

impl Percepts {
    pub const NONE: Percepts = Percepts(0);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, p: Percept) {
        self.0 |= p.bit();
    }

    pub fn contains(self, p: Percept) -> bool {
        (self.0 & p.bit()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Percept> {
        Percept::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

impl FromIterator<Percept> for Percepts {
    fn from_iter<I: IntoIterator<Item = Percept>>(iter: I) -> Self {
        let mut out = Percepts::new();
        for p in iter {
            out.insert(p);
        }
        out
    }
}

impl<const N: usize> From<[Percept; N]> for Percepts {
    fn from(value: [Percept; N]) -> Self {
        value.into_iter().collect()
    }
}

#[cfg(feature = "serde")]
impl Serialize for Percepts {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Percepts {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tags = Vec::<Percept>::deserialize(deserializer)?;
        Ok(tags.into_iter().collect())
    }
}
