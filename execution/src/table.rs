//! Minimal craps table used to drive strategies.
//!
//! The table owns the dice and the point and settles the standard wagers the strategies
//! use:
//! - Don't Come (no number): 2/3 win even money, 12 pushes, 7/11 lose, point numbers travel.
//! - Don't Come (travelled to n): 7 wins even money, n loses.
//! - Place n (working only while the point is on): n wins and stays up, 7 loses.
//!
//! Lay odds are left alone; the strategy that laid them settles them in `update_bets`.
//!
//! Per roll: every seat's `make_bets`, throw, settle standard wagers, move the point, every
//! seat's `update_bets`.

use crate::{
    events::{EventSink, NoopSink},
    player::Player,
    strategy::{Strategy, StrategyStack},
};
use layline_types::{
    craps::{is_point_number, SEVEN},
    Point, Roll, StrategyError, WagerError, WagerId, WagerKind,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

/// What a strategy may see of the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableState {
    pub point: Point,
    pub last_roll: Option<Roll>,
}

/// Source of dice throws. `None` ends the run.
pub trait DiceSource {
    fn throw(&mut self) -> Option<[u8; 2]>;
}

/// Dice driven by a seeded ChaCha20 stream.
pub struct SeededDice {
    rng: ChaCha20Rng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }
}

impl DiceSource for SeededDice {
    fn throw(&mut self) -> Option<[u8; 2]> {
        Some([self.rng.gen_range(1..=6), self.rng.gen_range(1..=6)])
    }
}

/// Winnings on a Place bet of `amount` on `number`, excluding the stake.
pub fn place_winnings(number: u8, amount: f64) -> f64 {
    match number {
        4 | 10 => amount * 9.0 / 5.0,
        5 | 9 => amount * 7.0 / 5.0,
        _ => amount * 7.0 / 6.0,
    }
}

/// Point after a roll of `total`.
pub fn next_point(point: Point, total: u8) -> Point {
    match point {
        Point::Off if is_point_number(total) => Point::On(total),
        Point::On(number) if total == SEVEN || total == number => Point::Off,
        point => point,
    }
}

/// Settle the table's own wagers for one roll. `point` is the phase the roll was thrown in.
fn settle_standard(player: &mut Player, point: Point, total: u8) -> Result<(), WagerError> {
    let open: Vec<(WagerId, WagerKind, Option<u8>, f64)> = player
        .wagers()
        .map(|wager| (wager.id, wager.kind, wager.number, wager.amount))
        .collect();
    for (id, kind, number, amount) in open {
        match (kind, number) {
            (WagerKind::DontCome, None) => match total {
                2 | 3 => {
                    player.settle_win(id, amount)?;
                }
                7 | 11 => {
                    player.settle_loss(id)?;
                }
                12 => {}
                number => player.travel(id, number)?,
            },
            (WagerKind::DontCome, Some(number)) => {
                if total == SEVEN {
                    player.settle_win(id, amount)?;
                } else if total == number {
                    player.settle_loss(id)?;
                }
            }
            (WagerKind::Place, Some(number)) if point.is_on() => {
                if total == number {
                    player.pay(id, place_winnings(number, amount))?;
                } else if total == SEVEN {
                    player.settle_loss(id)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// A player and the strategy playing for them.
struct Seat {
    player: Player,
    strategy: StrategyStack,
}

pub struct Table<D: DiceSource> {
    dice: D,
    state: TableState,
    rolls: u64,
    seats: Vec<Seat>,
    events: Box<dyn EventSink>,
}

impl<D: DiceSource> Table<D> {
    pub fn new(dice: D) -> Self {
        Self {
            dice,
            state: TableState::default(),
            rolls: 0,
            seats: Vec::new(),
            events: Box::new(NoopSink),
        }
    }

    /// Deliver strategy events to `sink` instead of dropping them.
    pub fn with_events(mut self, sink: impl EventSink + 'static) -> Self {
        self.events = Box::new(sink);
        self
    }

    pub fn add_player(&mut self, player: Player, strategy: StrategyStack) {
        self.seats.push(Seat { player, strategy });
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Rolls thrown so far.
    pub fn rolls(&self) -> u64 {
        self.rolls
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter().map(|seat| &seat.player)
    }

    /// True when every seated strategy reports it is done.
    pub fn completed(&self) -> bool {
        self.seats
            .iter()
            .all(|seat| seat.strategy.completed(&seat.player))
    }

    /// Play one roll. Returns `None` when the dice run out; bets made ahead of that
    /// throw stay on the layout.
    pub fn roll(&mut self) -> Result<Option<Roll>, StrategyError> {
        for seat in self.seats.iter_mut() {
            seat.strategy
                .make_bets(&mut seat.player, &self.state, self.events.as_mut())?;
        }

        let Some(dice) = self.dice.throw() else {
            return Ok(None);
        };
        let roll = Roll::new(self.rolls + 1, dice)?;
        self.rolls += 1;

        let thrown_in = self.state.point;
        for seat in self.seats.iter_mut() {
            settle_standard(&mut seat.player, thrown_in, roll.total())?;
        }
        self.state = TableState {
            point: next_point(thrown_in, roll.total()),
            last_roll: Some(roll),
        };
        debug!(%roll, from = %thrown_in, to = %self.state.point, "Rolled");

        for seat in self.seats.iter_mut() {
            seat.strategy
                .update_bets(&mut seat.player, &self.state, self.events.as_mut())?;
        }
        Ok(Some(roll))
    }

    /// Play up to `max_rolls` rolls, stopping early once every strategy is completed or
    /// the dice run out. Returns the number of rolls played.
    pub fn run(&mut self, max_rolls: u64) -> Result<u64, StrategyError> {
        let start = self.rolls;
        while self.rolls - start < max_rolls {
            if !self.seats.is_empty() && self.completed() {
                info!(rolls = self.rolls, "All strategies completed");
                break;
            }
            if self.roll()?.is_none() {
                break;
            }
        }
        Ok(self.rolls - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        events::{Recorder, StrategyEvent},
        mocks::ScriptedDice,
        strategy::{presets, Decision, OddsPolicy, Reason},
    };
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn test_point_moves() {
        assert_eq!(next_point(Point::Off, 7), Point::Off);
        assert_eq!(next_point(Point::Off, 2), Point::Off);
        assert_eq!(next_point(Point::Off, 11), Point::Off);
        for number in [4, 5, 6, 8, 9, 10] {
            assert_eq!(next_point(Point::Off, number), Point::On(number));
            assert_eq!(next_point(Point::On(number), number), Point::Off);
            assert_eq!(next_point(Point::On(number), 7), Point::Off);
        }
        assert_eq!(next_point(Point::On(6), 8), Point::On(6));
        assert_eq!(next_point(Point::On(6), 12), Point::On(6));
    }

    #[test]
    fn test_place_winnings() {
        assert_eq!(place_winnings(4, 5.0), 9.0);
        assert_eq!(place_winnings(9, 5.0), 7.0);
        assert_eq!(place_winnings(6, 6.0), 7.0);
    }

    #[test]
    fn test_dont_come_settlement() {
        for (total, bankroll, open) in [
            (2, 110.0, false),
            (3, 110.0, false),
            (12, 90.0, true),
            (7, 90.0, false),
            (11, 90.0, false),
        ] {
            let mut player = Player::new("todd", 100.0);
            let id = player
                .add_wager(WagerKind::DontCome, 10.0, None, None)
                .unwrap();
            settle_standard(&mut player, Point::On(4), total).unwrap();
            assert_eq!(player.bankroll(), bankroll, "total {total}");
            assert_eq!(player.contains(id), open, "total {total}");
        }

        let mut player = Player::new("todd", 100.0);
        let id = player
            .add_wager(WagerKind::DontCome, 10.0, None, None)
            .unwrap();
        settle_standard(&mut player, Point::On(4), 9).unwrap();
        assert_eq!(player.get(id).unwrap().number, Some(9));
        settle_standard(&mut player, Point::On(4), 5).unwrap();
        assert!(player.contains(id));
        settle_standard(&mut player, Point::On(4), 7).unwrap();
        assert!(!player.contains(id));
        assert_eq!(player.bankroll(), 110.0);
    }

    #[test]
    fn test_place_is_off_during_come_out() {
        let mut player = Player::new("todd", 100.0);
        let id = player.add_wager(WagerKind::Place, 6.0, Some(6), None).unwrap();
        settle_standard(&mut player, Point::Off, 7).unwrap();
        assert!(player.contains(id));
        settle_standard(&mut player, Point::On(4), 6).unwrap();
        assert_eq!(player.bankroll(), 94.0 + 7.0);
        settle_standard(&mut player, Point::On(4), 7).unwrap();
        assert!(!player.contains(id));
    }

    #[test]
    fn test_lay_odds_untouched_by_table() {
        let mut player = Player::new("todd", 100.0);
        let parent = player
            .add_wager(WagerKind::DontCome, 5.0, Some(4), None)
            .unwrap();
        let lay = player
            .add_wager(WagerKind::LayOdds, 10.0, Some(4), Some(parent))
            .unwrap();
        settle_standard(&mut player, Point::On(6), 7).unwrap();
        assert!(!player.contains(parent));
        assert!(player.contains(lay));
    }

    #[test]
    fn test_run_stops_when_dice_run_out() {
        let mut table = Table::new(ScriptedDice::totals(&[6, 8, 7]));
        table.add_player(
            Player::new("todd", 300.0),
            presets::dont_come_next_point(5.0, OddsPolicy::Fixed(1)).unwrap(),
        );
        assert_eq!(table.run(10).unwrap(), 3);
        assert_eq!(table.rolls(), 3);
        assert_eq!(table.state().point, Point::Off);
        assert_eq!(table.roll().unwrap(), None);
    }

    #[test]
    fn test_run_stops_when_completed() {
        let mut table = Table::new(ScriptedDice::totals(&[6, 8, 7]));
        table.add_player(Player::new("todd", 300.0), StrategyStack::new());
        assert_eq!(table.run(10).unwrap(), 0);
    }

    #[test]
    fn test_seeded_dice_are_reproducible() {
        let mut a = SeededDice::new(1234);
        let mut b = SeededDice::new(1234);
        for _ in 0..100 {
            let throw = a.throw().unwrap();
            assert_eq!(Some(throw), b.throw());
            assert!(throw.iter().all(|die| (1..=6).contains(die)));
        }
    }

    #[test]
    fn test_bad_dice_abort_the_run() {
        let mut table = Table::new(ScriptedDice::new(vec![[0, 7]]));
        table.add_player(
            Player::new("todd", 300.0),
            presets::dont_come_odds(5.0, OddsPolicy::Variable).unwrap(),
        );
        assert_eq!(
            table.run(5),
            Err(StrategyError::Wager(WagerError::InvalidDice(0, 7)))
        );
    }

    #[test]
    fn test_events_reach_sink() {
        let recorder = Rc::new(RefCell::new(Recorder::new()));
        let mut table = Table::new(ScriptedDice::totals(&[6, 9])).with_events(recorder.clone());
        table.add_player(
            Player::new("todd", 300.0),
            presets::dont_come_next_point(5.0, OddsPolicy::Fixed(1)).unwrap(),
        );
        table.run(2).unwrap();
        assert_eq!(
            table.players().next().unwrap().count_of(WagerKind::DontCome),
            1
        );
        let recorder = recorder.borrow();
        assert!(recorder.for_player("todd").any(|event| *event
            == StrategyEvent::Placement {
                decision: Decision::Place,
                reason: Reason::InitialPoint,
            }));
    }
}
