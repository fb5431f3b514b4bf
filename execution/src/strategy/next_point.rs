//! Don't come on the next point.
//!
//! Holds at most one don't come at a time. Once the tracked don't come is gone, no new one
//! is placed until the table goes `Off` and a fresh point is established.
//!
//! Per roll the hooks run as:
//! 1. `update_bets` (after the dice): loss detection, then the point edge.
//! 2. `make_bets` (before the next dice): [DontComeNextPoint::decide] and placement.
//!
//! A loss is sequenced before any edge seen in the same update, so an edge that arrives on
//! the roll that took the tracked wager does not clear `waiting_for_resolution`.

use super::{PointTracker, Strategy, Transition};
use crate::{
    events::{EventSink, StrategyEvent},
    player::Player,
    table::TableState,
};
use layline_types::{InvariantViolation, Point, StrategyError, WagerError, WagerId, WagerKind};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Place,
    Hold,
}

/// Which placement rule produced a [Decision].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reason {
    AlreadyOpen,
    PointOff,
    WaitingForResolution,
    InitialPoint,
    NewPoint,
    NoNewPoint,
}

#[derive(Clone, Debug)]
pub struct DontComeNextPoint {
    amount: f64,
    tracker: PointTracker,
    waiting_for_resolution: bool,
    initial_point: bool,
    new_point_seen: bool,
    tracked: Option<WagerId>,
}

impl DontComeNextPoint {
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            tracker: PointTracker::new(),
            waiting_for_resolution: false,
            initial_point: true,
            new_point_seen: false,
            tracked: None,
        }
    }

    /// Last point phase seen by `update_bets`.
    pub fn point_status(&self) -> Point {
        self.tracker.current()
    }

    pub fn waiting_for_resolution(&self) -> bool {
        self.waiting_for_resolution
    }

    pub fn initial_point(&self) -> bool {
        self.initial_point
    }

    /// The don't come this strategy placed and is still watching.
    pub fn tracked(&self) -> Option<WagerId> {
        self.tracked
    }

    /// Evaluate the placement rules against `point`. First match wins.
    pub fn decide(
        &self,
        player: &Player,
        point: Point,
    ) -> Result<(Decision, Reason), InvariantViolation> {
        let open = player.count_of(WagerKind::DontCome);
        if open > 1 {
            return Err(InvariantViolation::DuplicateTrackedWager { count: open });
        }
        Ok(if open == 1 {
            (Decision::Hold, Reason::AlreadyOpen)
        } else if !point.is_on() {
            (Decision::Hold, Reason::PointOff)
        } else if self.waiting_for_resolution {
            (Decision::Hold, Reason::WaitingForResolution)
        } else if self.initial_point {
            (Decision::Place, Reason::InitialPoint)
        } else if self.new_point_seen {
            (Decision::Place, Reason::NewPoint)
        } else {
            (Decision::Hold, Reason::NoNewPoint)
        })
    }
}

impl Strategy for DontComeNextPoint {
    fn make_bets(
        &mut self,
        player: &mut Player,
        table: &TableState,
        events: &mut dyn EventSink,
    ) -> Result<(), StrategyError> {
        let (decision, reason) = self.decide(player, table.point)?;
        // An edge only makes the very next decision eligible.
        self.new_point_seen = false;
        debug!(player = player.name(), point = %table.point, ?decision, ?reason, "Don't come decision");
        events.emit(player.name(), StrategyEvent::Placement { decision, reason });
        if decision == Decision::Hold {
            return Ok(());
        }
        match player.add_wager(WagerKind::DontCome, self.amount, None, None) {
            Ok(wager) => {
                self.tracked = Some(wager);
                self.initial_point = false;
            }
            Err(WagerError::InsufficientBankroll { needed, available }) => {
                debug!(player = player.name(), needed, available, "Cannot cover don't come");
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn update_bets(
        &mut self,
        player: &mut Player,
        table: &TableState,
        events: &mut dyn EventSink,
    ) -> Result<(), StrategyError> {
        self.new_point_seen = false;

        // Loss detection runs first.
        let lost = match self.tracked {
            Some(wager) if !player.contains(wager) => {
                self.tracked = None;
                self.waiting_for_resolution = true;
                events.emit(player.name(), StrategyEvent::TrackedWagerGone { wager });
                true
            }
            _ => false,
        };

        let from = self.tracker.current();
        let transition = self.tracker.observe(table.point);
        if transition != Transition::Unchanged {
            events.emit(
                player.name(),
                StrategyEvent::PointTransition {
                    from,
                    to: table.point,
                },
            );
        }
        if let Transition::Established(number) = transition {
            if lost {
                debug!(player = player.name(), number, "Point established on the losing roll, still waiting");
            } else {
                self.waiting_for_resolution = false;
                self.new_point_seen = true;
            }
        }
        Ok(())
    }

    fn completed(&self, _player: &Player) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Recorder;
    use layline_types::Roll;

    fn state(point: Point, total: u8, seq: u64) -> TableState {
        TableState {
            point,
            last_roll: Some(Roll::new(seq, [total / 2, total - total / 2]).unwrap()),
        }
    }

    fn idle(point: Point) -> TableState {
        TableState {
            point,
            last_roll: None,
        }
    }

    #[test]
    fn test_initial_state() {
        let strategy = DontComeNextPoint::new(5.0);
        assert_eq!(strategy.point_status(), Point::Off);
        assert!(!strategy.waiting_for_resolution());
        assert!(strategy.initial_point());
        assert_eq!(strategy.tracked(), None);
        assert!(!strategy.completed(&Player::new("todd", 0.0)));
    }

    #[test]
    fn test_rules_in_order() {
        let mut strategy = DontComeNextPoint::new(5.0);
        let mut player = Player::new("todd", 100.0);

        assert_eq!(
            strategy.decide(&player, Point::Off),
            Ok((Decision::Hold, Reason::PointOff))
        );
        assert_eq!(
            strategy.decide(&player, Point::On(6)),
            Ok((Decision::Place, Reason::InitialPoint))
        );

        strategy.waiting_for_resolution = true;
        assert_eq!(
            strategy.decide(&player, Point::On(6)),
            Ok((Decision::Hold, Reason::WaitingForResolution))
        );

        strategy.waiting_for_resolution = false;
        strategy.initial_point = false;
        assert_eq!(
            strategy.decide(&player, Point::On(6)),
            Ok((Decision::Hold, Reason::NoNewPoint))
        );
        strategy.new_point_seen = true;
        assert_eq!(
            strategy.decide(&player, Point::On(6)),
            Ok((Decision::Place, Reason::NewPoint))
        );

        player
            .add_wager(WagerKind::DontCome, 5.0, None, None)
            .unwrap();
        assert_eq!(
            strategy.decide(&player, Point::On(6)),
            Ok((Decision::Hold, Reason::AlreadyOpen))
        );
        player
            .add_wager(WagerKind::DontCome, 5.0, None, None)
            .unwrap();
        assert_eq!(
            strategy.decide(&player, Point::On(6)),
            Err(InvariantViolation::DuplicateTrackedWager { count: 2 })
        );
    }

    #[test]
    fn test_initial_placement_clears_flag() {
        let mut strategy = DontComeNextPoint::new(5.0);
        let mut player = Player::new("todd", 100.0);
        let mut recorder = Recorder::new();

        strategy
            .make_bets(&mut player, &idle(Point::On(8)), &mut recorder)
            .unwrap();
        assert!(!strategy.initial_point());
        let tracked = strategy.tracked().unwrap();
        assert!(player.contains(tracked));
        assert_eq!(player.bankroll(), 95.0);

        strategy
            .make_bets(&mut player, &idle(Point::On(8)), &mut recorder)
            .unwrap();
        assert_eq!(player.count_of(WagerKind::DontCome), 1);
        assert_eq!(
            recorder.events().last().map(|(_, event)| event),
            Some(&StrategyEvent::Placement {
                decision: Decision::Hold,
                reason: Reason::AlreadyOpen
            })
        );
    }

    #[test]
    fn test_unaffordable_placement_keeps_initial_flag() {
        let mut strategy = DontComeNextPoint::new(5.0);
        let mut player = Player::new("todd", 4.0);
        let mut recorder = Recorder::new();
        strategy
            .make_bets(&mut player, &idle(Point::On(8)), &mut recorder)
            .unwrap();
        assert!(strategy.initial_point());
        assert_eq!(strategy.tracked(), None);
        assert_eq!(player.bankroll(), 4.0);
    }

    #[test]
    fn test_loss_waits_for_next_edge() {
        let mut strategy = DontComeNextPoint::new(5.0);
        let mut player = Player::new("todd", 100.0);
        let mut recorder = Recorder::new();

        strategy
            .update_bets(&mut player, &state(Point::On(4), 4, 1), &mut recorder)
            .unwrap();
        strategy
            .make_bets(&mut player, &idle(Point::On(4)), &mut recorder)
            .unwrap();
        let tracked = strategy.tracked().unwrap();

        // Don't come travels to 6, then the 6 repeats. Point stays on 4.
        player.travel(tracked, 6).unwrap();
        player.settle_loss(tracked).unwrap();
        strategy
            .update_bets(&mut player, &state(Point::On(4), 6, 3), &mut recorder)
            .unwrap();
        assert!(strategy.waiting_for_resolution());
        assert_eq!(strategy.tracked(), None);

        for seq in 4..10 {
            strategy
                .update_bets(&mut player, &state(Point::On(4), 9, seq), &mut recorder)
                .unwrap();
            strategy
                .make_bets(&mut player, &idle(Point::On(4)), &mut recorder)
                .unwrap();
            assert!(strategy.waiting_for_resolution());
            assert_eq!(player.count_of(WagerKind::DontCome), 0);
        }

        // Point made: Off, still waiting.
        strategy
            .update_bets(&mut player, &state(Point::Off, 4, 10), &mut recorder)
            .unwrap();
        strategy
            .make_bets(&mut player, &idle(Point::Off), &mut recorder)
            .unwrap();
        assert!(strategy.waiting_for_resolution());
        assert_eq!(player.count_of(WagerKind::DontCome), 0);

        // New point: flag clears and the next decision places.
        strategy
            .update_bets(&mut player, &state(Point::On(5), 5, 11), &mut recorder)
            .unwrap();
        assert!(!strategy.waiting_for_resolution());
        strategy
            .make_bets(&mut player, &idle(Point::On(5)), &mut recorder)
            .unwrap();
        assert_eq!(player.count_of(WagerKind::DontCome), 1);
    }

    #[test]
    fn test_loss_on_establishing_roll_does_not_refire() {
        let mut strategy = DontComeNextPoint::new(5.0);
        let mut player = Player::new("todd", 100.0);
        let mut recorder = Recorder::new();

        strategy
            .make_bets(&mut player, &idle(Point::On(4)), &mut recorder)
            .unwrap();
        let tracked = strategy.tracked().unwrap();
        player.travel(tracked, 6).unwrap();
        strategy
            .update_bets(&mut player, &state(Point::On(4), 9, 1), &mut recorder)
            .unwrap();
        // Point made on 4. The don't come on 6 rides into the come-out.
        strategy
            .update_bets(&mut player, &state(Point::Off, 4, 2), &mut recorder)
            .unwrap();

        // Come-out 6 establishes the point and takes the don't come on 6.
        player.settle_loss(tracked).unwrap();
        strategy
            .update_bets(&mut player, &state(Point::On(6), 6, 3), &mut recorder)
            .unwrap();
        assert!(strategy.waiting_for_resolution());
        strategy
            .make_bets(&mut player, &idle(Point::On(6)), &mut recorder)
            .unwrap();
        assert_eq!(player.count_of(WagerKind::DontCome), 0);

        // Only the following Off -> On edge re-arms placement.
        strategy
            .update_bets(&mut player, &state(Point::Off, 6, 4), &mut recorder)
            .unwrap();
        strategy
            .update_bets(&mut player, &state(Point::On(9), 9, 5), &mut recorder)
            .unwrap();
        strategy
            .make_bets(&mut player, &idle(Point::On(9)), &mut recorder)
            .unwrap();
        assert_eq!(player.count_of(WagerKind::DontCome), 1);
    }

    #[test]
    fn test_edge_is_consumed_by_one_decision() {
        let mut strategy = DontComeNextPoint::new(5.0);
        strategy.initial_point = false;
        let mut player = Player::new("todd", 100.0);
        let mut recorder = Recorder::new();

        strategy
            .update_bets(&mut player, &state(Point::On(10), 10, 1), &mut recorder)
            .unwrap();
        // Edge seen, but an untracked don't come is already open.
        let other = player
            .add_wager(WagerKind::DontCome, 5.0, None, None)
            .unwrap();
        strategy
            .make_bets(&mut player, &idle(Point::On(10)), &mut recorder)
            .unwrap();
        player.withdraw(other).unwrap();
        strategy
            .make_bets(&mut player, &idle(Point::On(10)), &mut recorder)
            .unwrap();
        assert_eq!(player.count_of(WagerKind::DontCome), 0);
    }

    #[test]
    fn test_emits_transitions() {
        let mut strategy = DontComeNextPoint::new(5.0);
        let mut player = Player::new("todd", 100.0);
        let mut recorder = Recorder::new();
        strategy
            .update_bets(&mut player, &state(Point::On(8), 8, 1), &mut recorder)
            .unwrap();
        strategy
            .update_bets(&mut player, &state(Point::Off, 7, 2), &mut recorder)
            .unwrap();
        let transitions: Vec<_> = recorder
            .for_player("todd")
            .filter(|event| matches!(event, StrategyEvent::PointTransition { .. }))
            .cloned()
            .collect();
        assert_eq!(
            transitions,
            vec![
                StrategyEvent::PointTransition {
                    from: Point::Off,
                    to: Point::On(8)
                },
                StrategyEvent::PointTransition {
                    from: Point::On(8),
                    to: Point::Off
                },
            ]
        );
    }
}
