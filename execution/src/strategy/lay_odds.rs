//! Lay odds behind a travelled don't come.
//!
//! A lay odds wager references its don't come by [WagerId] and inherits the number the
//! don't come travelled to. It wins on a 7 at true odds, loses when its number repeats and
//! pushes on everything else.

use super::{OddsPolicy, Strategy};
use crate::{
    events::{EventSink, StrategyEvent},
    player::Player,
    table::TableState,
};
use layline_types::{
    craps::{is_point_number, SEVEN},
    InvariantViolation, Roll, StrategyError, Wager, WagerError, WagerId, WagerKind,
};
use tracing::{debug, warn};

/// Outcome of evaluating a lay odds wager against one roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolution {
    /// Rolled a 7. `payout` is credited on top of the returned stake.
    Win { payout: f64 },
    /// Rolled the wager's number. `stake` is lost.
    Lose { stake: f64 },
    /// Nothing happens.
    Push,
}

/// Validated view of a lay odds entry in the open-wager set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayOdds {
    pub id: WagerId,
    pub parent: WagerId,
    pub number: u8,
    pub amount: f64,
}

impl LayOdds {
    pub fn from_wager(wager: &Wager) -> Result<Self, InvariantViolation> {
        if wager.kind != WagerKind::LayOdds {
            return Err(InvariantViolation::NotLayOdds { wager: wager.id });
        }
        let parent = wager
            .parent
            .ok_or(InvariantViolation::LayOddsWithoutParent { wager: wager.id })?;
        let number = match wager.number {
            Some(number) if is_point_number(number) => number,
            number => {
                return Err(InvariantViolation::LayOddsOffPoint {
                    wager: wager.id,
                    number,
                })
            }
        };
        Ok(Self {
            id: wager.id,
            parent,
            number,
            amount: wager.amount,
        })
    }

    /// True-odds winnings for the laid amount.
    ///
    /// | number | pays |
    /// |---|---|
    /// | 4, 10 | 1:2 |
    /// | 5, 9 | 2:3 |
    /// | 6, 8 | 5:6 |
    pub fn calculate_payout(&self) -> Result<f64, InvariantViolation> {
        match self.number {
            4 | 10 => Ok(self.amount / 2.0),
            5 | 9 => Ok(self.amount * (2.0 / 3.0)),
            6 | 8 => Ok(self.amount * (5.0 / 6.0)),
            number => Err(InvariantViolation::LayOddsOffPoint {
                wager: self.id,
                number: Some(number),
            }),
        }
    }

    /// Win on 7, lose on the number, push otherwise (checked in that order).
    pub fn evaluate(&self, total: u8) -> Result<Resolution, InvariantViolation> {
        if total == SEVEN {
            return Ok(Resolution::Win {
                payout: self.calculate_payout()?,
            });
        }
        if total == self.number {
            return Ok(Resolution::Lose {
                stake: self.amount,
            });
        }
        Ok(Resolution::Push)
    }
}

/// Settle lay odds wager `id` against `roll`, removing it on a win or a loss.
///
/// Fails with [InvariantViolation::AlreadySettled] if the wager is no longer open.
pub fn resolve(player: &mut Player, id: WagerId, roll: &Roll) -> Result<Resolution, StrategyError> {
    let wager = player
        .get(id)
        .ok_or(InvariantViolation::AlreadySettled { wager: id })?;
    let lay = LayOdds::from_wager(wager)?;
    let resolution = lay.evaluate(roll.total())?;
    match resolution {
        Resolution::Win { payout } => {
            player.settle_win(id, payout)?;
        }
        Resolution::Lose { .. } => {
            player.settle_loss(id)?;
        }
        Resolution::Push => {}
    }
    Ok(resolution)
}

/// Lays odds behind every travelled don't come and settles them each roll.
#[derive(Clone, Debug)]
pub struct LayOddsBehindDontCome {
    policy: OddsPolicy,
    last_resolved: Option<u64>,
}

impl LayOddsBehindDontCome {
    pub fn new(policy: OddsPolicy) -> Self {
        Self {
            policy,
            last_resolved: None,
        }
    }

    fn sweep_orphans(
        &self,
        player: &mut Player,
        events: &mut dyn EventSink,
    ) -> Result<(), StrategyError> {
        let orphans: Vec<(WagerId, WagerId)> = player
            .wagers_of(WagerKind::LayOdds)
            .filter_map(|wager| {
                let parent = wager.parent?;
                // Covered only while the parent sits on the lay's own number.
                let working = player.get(parent).is_some_and(|parent| {
                    parent.kind == WagerKind::DontCome
                        && parent.has_travelled()
                        && parent.number == wager.number
                });
                (!working).then_some((wager.id, parent))
            })
            .collect();
        for (wager, parent) in orphans {
            let refunded = player.withdraw(wager)?;
            warn!(player = player.name(), %wager, %parent, "Swept orphaned lay odds");
            events.emit(
                player.name(),
                StrategyEvent::OrphanSwept {
                    wager,
                    parent,
                    refund: refunded.amount,
                },
            );
        }
        Ok(())
    }
}

impl Strategy for LayOddsBehindDontCome {
    fn make_bets(
        &mut self,
        player: &mut Player,
        _table: &TableState,
        events: &mut dyn EventSink,
    ) -> Result<(), StrategyError> {
        let travelled: Vec<(WagerId, u8, f64)> = player
            .wagers_of(WagerKind::DontCome)
            .filter_map(|wager| wager.number.map(|number| (wager.id, number, wager.amount)))
            .collect();
        for (parent, number, base) in travelled {
            let covered = player
                .wagers_of(WagerKind::LayOdds)
                .any(|wager| wager.parent == Some(parent));
            if covered {
                continue;
            }
            let amount = base * f64::from(self.policy.multiplier(number)?);
            match player.add_wager(WagerKind::LayOdds, amount, Some(number), Some(parent)) {
                Ok(wager) => events.emit(
                    player.name(),
                    StrategyEvent::LayOddsAttached {
                        wager,
                        parent,
                        number,
                        amount,
                    },
                ),
                Err(WagerError::InsufficientBankroll { needed, available }) => {
                    debug!(player = player.name(), needed, available, "Cannot cover lay odds");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    fn update_bets(
        &mut self,
        player: &mut Player,
        table: &TableState,
        events: &mut dyn EventSink,
    ) -> Result<(), StrategyError> {
        let Some(roll) = table.last_roll else {
            return Ok(());
        };
        if self.last_resolved == Some(roll.seq()) {
            debug!(player = player.name(), %roll, "Lay odds already resolved for roll");
            return Ok(());
        }
        self.last_resolved = Some(roll.seq());

        let open: Vec<(WagerId, Option<u8>)> = player
            .wagers_of(WagerKind::LayOdds)
            .map(|wager| (wager.id, wager.number))
            .collect();
        for (wager, number) in open {
            let resolution = resolve(player, wager, &roll)?;
            if resolution == Resolution::Push {
                continue;
            }
            let Some(number) = number else {
                return Err(InvariantViolation::LayOddsOffPoint {
                    wager,
                    number: None,
                }
                .into());
            };
            events.emit(
                player.name(),
                StrategyEvent::LayOddsResolved {
                    wager,
                    number,
                    resolution,
                },
            );
        }
        self.sweep_orphans(player, events)
    }

    fn completed(&self, player: &Player) -> bool {
        player.count_of(WagerKind::LayOdds) == 0
    }
}
