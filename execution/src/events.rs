//! Structured strategy events.
//!
//! Strategies describe what they did through [StrategyEvent]s handed to an [EventSink].
//! The decision logic never formats or prints anything itself.

use crate::strategy::{Decision, Reason, Resolution};
use layline_types::{Point, WagerId};
use std::{cell::RefCell, rc::Rc};
use tracing::debug;

#[derive(Clone, Debug, PartialEq)]
pub enum StrategyEvent {
    /// The table phase changed between two observations.
    PointTransition { from: Point, to: Point },
    /// A tracked base wager that was open before the roll is gone after it.
    TrackedWagerGone { wager: WagerId },
    /// Outcome of a placement decision.
    Placement { decision: Decision, reason: Reason },
    LayOddsAttached {
        wager: WagerId,
        parent: WagerId,
        number: u8,
        amount: f64,
    },
    LayOddsResolved {
        wager: WagerId,
        number: u8,
        resolution: Resolution,
    },
    /// Lay odds whose parent disappeared without settling them; stake refunded.
    OrphanSwept {
        wager: WagerId,
        parent: WagerId,
        refund: f64,
    },
}

/// Consumer of strategy events.
pub trait EventSink {
    fn emit(&mut self, player: &str, event: StrategyEvent);
}

/// Drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&mut self, _player: &str, _event: StrategyEvent) {}
}

/// Forwards events to `tracing` under the `layline::events` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, player: &str, event: StrategyEvent) {
        debug!(target: "layline::events", player, ?event, "Strategy event");
    }
}

/// Keeps every event in memory.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    events: Vec<(String, StrategyEvent)>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[(String, StrategyEvent)] {
        &self.events
    }

    /// Events emitted for `player`, in order.
    pub fn for_player<'a>(&'a self, player: &'a str) -> impl Iterator<Item = &'a StrategyEvent> {
        self.events
            .iter()
            .filter(move |(name, _)| name == player)
            .map(|(_, event)| event)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for Recorder {
    fn emit(&mut self, player: &str, event: StrategyEvent) {
        self.events.push((player.to_string(), event));
    }
}

/// Lets a caller keep a handle on a sink owned by the table.
impl<S: EventSink> EventSink for Rc<RefCell<S>> {
    fn emit(&mut self, player: &str, event: StrategyEvent) {
        self.borrow_mut().emit(player, event);
    }
}
