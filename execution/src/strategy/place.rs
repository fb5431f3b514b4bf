use super::Strategy;
use crate::{events::EventSink, player::Player, table::TableState};
use layline_types::{craps::is_point_number, PolicyError, StrategyError, WagerError, WagerKind};
use tracing::debug;

/// Keeps Place bets up on a fixed set of numbers while the point is on.
#[derive(Clone, Debug)]
pub struct PlaceNumbers {
    numbers: Vec<u8>,
    amount: f64,
}

impl PlaceNumbers {
    pub fn new(numbers: &[u8], amount: f64) -> Result<Self, PolicyError> {
        if let Some(bad) = numbers.iter().find(|number| !is_point_number(**number)) {
            return Err(PolicyError::InvalidPointNumber(*bad));
        }
        Ok(Self {
            numbers: numbers.to_vec(),
            amount,
        })
    }
}

impl Strategy for PlaceNumbers {
    fn make_bets(
        &mut self,
        player: &mut Player,
        table: &TableState,
        _events: &mut dyn EventSink,
    ) -> Result<(), StrategyError> {
        if !table.point.is_on() {
            return Ok(());
        }
        for number in &self.numbers {
            if player.has_wager(WagerKind::Place, Some(*number)) {
                continue;
            }
            match player.add_wager(WagerKind::Place, self.amount, Some(*number), None) {
                Ok(_) => {}
                Err(WagerError::InsufficientBankroll { needed, available }) => {
                    debug!(player = player.name(), number, needed, available, "Cannot cover place bet");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    fn update_bets(
        &mut self,
        _player: &mut Player,
        _table: &TableState,
        _events: &mut dyn EventSink,
    ) -> Result<(), StrategyError> {
        Ok(())
    }

    fn completed(&self, _player: &Player) -> bool {
        false
    }
}
