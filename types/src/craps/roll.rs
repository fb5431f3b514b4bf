use serde::{Deserialize, Serialize};
use std::fmt;

use super::{WagerError, DIE_FACES};

/// A single throw of two dice.
///
/// `seq` is the table's roll counter. Two `Roll`s with the same `seq` describe the same
/// throw, which is what makes repeated resolution of a roll detectable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    seq: u64,
    dice: [u8; 2],
}

impl Roll {
    pub fn new(seq: u64, dice: [u8; 2]) -> Result<Self, WagerError> {
        let valid = |die: u8| (1..=DIE_FACES).contains(&die);
        if !valid(dice[0]) || !valid(dice[1]) {
            return Err(WagerError::InvalidDice(dice[0], dice[1]));
        }
        Ok(Self { seq, dice })
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn dice(&self) -> [u8; 2] {
        self.dice
    }

    pub fn total(&self) -> u8 {
        self.dice[0] + self.dice[1]
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {}+{}={}",
            self.seq,
            self.dice[0],
            self.dice[1],
            self.total()
        )
    }
}
