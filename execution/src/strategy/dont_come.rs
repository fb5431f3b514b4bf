use super::Strategy;
use crate::{events::EventSink, player::Player, table::TableState};
use layline_types::{StrategyError, WagerError, WagerKind};
use tracing::debug;

/// Keeps one don't come working whenever the point is on.
#[derive(Clone, Debug)]
pub struct DontComeEveryPoint {
    amount: f64,
}

impl DontComeEveryPoint {
    pub fn new(amount: f64) -> Self {
        Self { amount }
    }
}

impl Strategy for DontComeEveryPoint {
    fn make_bets(
        &mut self,
        player: &mut Player,
        table: &TableState,
        _events: &mut dyn EventSink,
    ) -> Result<(), StrategyError> {
        if !table.point.is_on() || player.has_wager(WagerKind::DontCome, None) {
            return Ok(());
        }
        match player.add_wager(WagerKind::DontCome, self.amount, None, None) {
            Ok(_) => Ok(()),
            Err(WagerError::InsufficientBankroll { needed, available }) => {
                debug!(player = player.name(), needed, available, "Cannot cover don't come");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
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
