//! NSFW classification bitmask.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Content maturity level as a bitmask of canonical levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NsfwLevel(pub u32);

impl NsfwLevel {
    pub const PG: NsfwLevel = NsfwLevel(1);
    pub const PG13: NsfwLevel = NsfwLevel(2);
    pub const R: NsfwLevel = NsfwLevel(4);
    pub const X: NsfwLevel = NsfwLevel(8);
    pub const XXX: NsfwLevel = NsfwLevel(16);
    /// Every canonical level combined.
    pub const ALL: NsfwLevel = NsfwLevel(31);

    const NAMED: [(NsfwLevel, &'static str); 5] = [
        (Self::PG, "PG"),
        (Self::PG13, "PG-13"),
        (Self::R, "R"),
        (Self::X, "X"),
        (Self::XXX, "XXX"),
    ];

    /// Whether only canonical bits are set.
    pub fn is_valid(self) -> bool {
        self.0 & !Self::ALL.0 == 0
    }

    /// Whether every bit of `other` is set in `self`.
    pub fn contains(self, other: NsfwLevel) -> bool {
        self.0 & other.0 == other.0
    }

    /// Names of the canonical levels set in this mask, lowest first.
    pub fn labels(self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(level, _)| self.contains(*level))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl fmt::Display for NsfwLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.labels();
        if labels.is_empty() {
            write!(f, "none ({})", self.0)
        } else {
            write!(f, "{} ({})", labels.join("|"), self.0)
        }
    }
}
