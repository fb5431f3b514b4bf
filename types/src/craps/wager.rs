use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an open wager. Assigned by the player ledger, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WagerId(pub u64);

impl fmt::Display for WagerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Wager kinds a player can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WagerKind {
    /// Against the shooter, placed while the point is on; travels to the next point number.
    DontCome,
    /// Wins when its number rolls before a 7.
    Place,
    /// True odds laid behind a travelled don't come.
    LayOdds,
}

impl fmt::Display for WagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WagerKind::DontCome => "DontCome",
            WagerKind::Place => "Place",
            WagerKind::LayOdds => "LayOdds",
        };
        f.write_str(label)
    }
}

/// An open wager.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wager {
    pub id: WagerId,
    pub kind: WagerKind,
    pub amount: f64,
    /// Set once the wager has travelled (or at creation for numbered wagers).
    pub number: Option<u8>,
    /// The wager this one is attached to (lay odds only).
    pub parent: Option<WagerId>,
}

impl Wager {
    /// Returns true if the wager matches `kind` and, when given, `number`.
    pub fn is(&self, kind: WagerKind, number: Option<u8>) -> bool {
        self.kind == kind && (number.is_none() || self.number == number)
    }

    pub fn has_travelled(&self) -> bool {
        self.number.is_some()
    }
}

impl fmt::Display for Wager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(number) => write!(f, "{}({number}) {} ${}", self.kind, self.id, self.amount),
            None => write!(f, "{} {} ${}", self.kind, self.id, self.amount),
        }
    }
}
