//! Craps domain types.
//!
//! Defines the table phase, rolls, wagers and the error taxonomy shared by the strategy
//! layer and the simulator.

mod constants;
mod error;
mod point;
mod roll;
mod wager;

pub use constants::*;
pub use error::*;
pub use point::*;
pub use roll::*;
pub use wager::*;
