use thiserror::Error;

use super::WagerId;

/// Bad input handed to one of the pure policy functions.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum PolicyError {
    #[error("not a point number (got={0})")]
    InvalidPointNumber(u8),
    #[error("odds multiple out of range (got={0}, allowed=1..=3)")]
    InvalidMultiple(u8),
    #[error("base amount must be positive (got={0})")]
    NonPositiveAmount(f64),
}

/// A broken money-correctness invariant. Always fatal for the run.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InvariantViolation {
    #[error("lay odds {wager} attached to non-point number {number:?}")]
    LayOddsOffPoint { wager: WagerId, number: Option<u8> },
    #[error("lay odds {wager} has no parent wager")]
    LayOddsWithoutParent { wager: WagerId },
    #[error("wager {wager} settled twice")]
    AlreadySettled { wager: WagerId },
    #[error("wager {wager} is not a lay odds wager")]
    NotLayOdds { wager: WagerId },
    #[error("{count} tracked don't come wagers open at once")]
    DuplicateTrackedWager { count: usize },
}

/// Rejected ledger operation.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum WagerError {
    #[error("insufficient bankroll (needed={needed}, available={available})")]
    InsufficientBankroll { needed: f64, available: f64 },
    #[error("wager amount must be positive (got={0})")]
    NonPositiveAmount(f64),
    #[error("unknown wager {0}")]
    UnknownWager(WagerId),
    #[error("invalid dice ({0}, {1})")]
    InvalidDice(u8, u8),
}

/// Anything a strategy hook can fail with.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum StrategyError {
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    #[error(transparent)]
    Wager(#[from] WagerError),
}
