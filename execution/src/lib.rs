//! Layline strategy layer.
//!
//! This crate contains the per-roll wagering logic that sits on top of a craps table: the
//! point tracker, the don't come placement state machine, the lay odds wager with its
//! true-odds settlement, and the odds multiplier policies. A small [table::Table] drives
//! strategies roll by roll.
//!
//! ## Ordering requirements
//! For every roll:
//! 1. Strategies place wagers (`make_bets`).
//! 2. The table throws the dice, settles its own wagers and moves the point.
//! 3. Strategies detect losses, update their state and settle lay odds (`update_bets`).
//!
//! Placement therefore always observes the post-resolution point and open-wager set.
//!
//! ## Money correctness
//! Invariant violations (lay odds off a point number, a wager settled twice) are returned as
//! errors and abort the run. They are never swallowed.
//!
//! ## Example
//! ```rust
//! use layline_execution::{
//!     strategy::{presets, OddsPolicy},
//!     table::{SeededDice, Table},
//!     Player,
//! };
//!
//! let mut table = Table::new(SeededDice::new(1234));
//! table.add_player(
//!     Player::new("todd", 300.0),
//!     presets::dont_come_next_point(5.0, OddsPolicy::Fixed(1)).unwrap(),
//! );
//! let rolls = table.run(120).unwrap();
//! assert_eq!(rolls, 120);
//! ```

pub mod events;
pub mod player;
pub mod strategy;
pub mod table;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;


pub use events::{EventSink, NoopSink, Recorder, StrategyEvent, TracingSink};
pub use player::Player;
pub use strategy::{Strategy, StrategyStack};
pub use table::{DiceSource, SeededDice, Table, TableState};
