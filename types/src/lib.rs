//! Shared types for layline.

pub mod craps;

pub use craps::{
    InvariantViolation, Point, PolicyError, Roll, StrategyError, Wager, WagerError, WagerId,
    WagerKind,
};
