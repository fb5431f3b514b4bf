//! Test helpers: scripted dice and single-seat tables.

use crate::{
    player::Player,
    strategy::StrategyStack,
    table::{DiceSource, Table},
};
use std::collections::VecDeque;

/// Dice that replay a fixed sequence of throws.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    throws: VecDeque<[u8; 2]>,
}

impl ScriptedDice {
    pub fn new(throws: Vec<[u8; 2]>) -> Self {
        Self {
            throws: throws.into(),
        }
    }

    /// Throws that add up to each of `totals` (2..=12).
    pub fn totals(totals: &[u8]) -> Self {
        Self::new(totals.iter().map(|total| dice_for(*total)).collect())
    }
}

impl DiceSource for ScriptedDice {
    fn throw(&mut self) -> Option<[u8; 2]> {
        self.throws.pop_front()
    }
}

/// A pair of dice showing `total`.
pub fn dice_for(total: u8) -> [u8; 2] {
    [total / 2, total - total / 2]
}

/// Table with one seat named "todd" that will replay `totals`.
pub fn single_seat(totals: &[u8], bankroll: f64, strategy: StrategyStack) -> Table<ScriptedDice> {
    let mut table = Table::new(ScriptedDice::totals(totals));
    table.add_player(Player::new("todd", bankroll), strategy);
    table
}
