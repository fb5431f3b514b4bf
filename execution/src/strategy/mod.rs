//! Player strategies.
//!
//! A strategy is an ordered [StrategyStack] of small policies. The table drives every
//! policy through the same three hooks:
//! - `make_bets` once per roll, before the dice.
//! - `update_bets` once per roll, after the table has settled its own wagers and moved
//!   the point.
//! - `completed` to let the runner stop early.

mod dont_come;
mod lay_odds;
mod next_point;
mod odds;
mod place;
pub mod presets;
mod tracker;

pub use dont_come::DontComeEveryPoint;
pub use lay_odds::{resolve, LayOdds, LayOddsBehindDontCome, Resolution};
pub use next_point::{Decision, DontComeNextPoint, Reason};
pub use odds::OddsPolicy;
pub use place::PlaceNumbers;
pub use tracker::{PointTracker, Transition};

use crate::{events::EventSink, player::Player, table::TableState};
use layline_types::StrategyError;

pub trait Strategy {
    /// Add wagers before the dice are thrown.
    fn make_bets(
        &mut self,
        player: &mut Player,
        table: &TableState,
        events: &mut dyn EventSink,
    ) -> Result<(), StrategyError>;

    /// React to the roll the table just settled.
    fn update_bets(
        &mut self,
        player: &mut Player,
        table: &TableState,
        events: &mut dyn EventSink,
    ) -> Result<(), StrategyError>;

    /// True once the strategy has nothing further to do.
    fn completed(&self, player: &Player) -> bool;
}

/// Policies evaluated in insertion order.
#[derive(Default)]
pub struct StrategyStack {
    policies: Vec<Box<dyn Strategy>>,
}

impl StrategyStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, policy: impl Strategy + 'static) -> Self {
        self.policies.push(Box::new(policy));
        self
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl Strategy for StrategyStack {
    fn make_bets(
        &mut self,
        player: &mut Player,
        table: &TableState,
        events: &mut dyn EventSink,
    ) -> Result<(), StrategyError> {
        for policy in self.policies.iter_mut() {
            policy.make_bets(player, table, events)?;
        }
        Ok(())
    }

    fn update_bets(
        &mut self,
        player: &mut Player,
        table: &TableState,
        events: &mut dyn EventSink,
    ) -> Result<(), StrategyError> {
        for policy in self.policies.iter_mut() {
            policy.update_bets(player, table, events)?;
        }
        Ok(())
    }

    fn completed(&self, player: &Player) -> bool {
        self.policies.iter().all(|policy| policy.completed(player))
    }
}
