use serde::{Deserialize, Serialize};
use std::fmt;

/// Betting-round phase of the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Point {
    /// Come-out: no point is established.
    #[default]
    Off,
    /// The point is on this number.
    On(u8),
}

impl Point {
    pub fn is_on(&self) -> bool {
        matches!(self, Point::On(_))
    }

    pub fn number(&self) -> Option<u8> {
        match self {
            Point::Off => None,
            Point::On(number) => Some(*number),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Off => write!(f, "off"),
            Point::On(number) => write!(f, "on({number})"),
        }
    }
}
