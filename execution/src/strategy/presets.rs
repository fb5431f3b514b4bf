//! Named strategies built from the policies in this module.

use super::{
    DontComeEveryPoint, DontComeNextPoint, LayOddsBehindDontCome, OddsPolicy, PlaceNumbers,
    StrategyStack,
};
use layline_types::PolicyError;

fn check_amount(amount: f64) -> Result<(), PolicyError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(PolicyError::NonPositiveAmount(amount))
    }
}

/// A don't come whenever the point is on, odds laid behind it once it travels.
pub fn dont_come_odds(amount: f64, odds: OddsPolicy) -> Result<StrategyStack, PolicyError> {
    check_amount(amount)?;
    odds.validate()?;
    Ok(StrategyStack::new()
        .with(DontComeEveryPoint::new(amount))
        .with(LayOddsBehindDontCome::new(odds)))
}

/// One don't come per fresh point, odds laid behind it once it travels.
pub fn dont_come_next_point(amount: f64, odds: OddsPolicy) -> Result<StrategyStack, PolicyError> {
    check_amount(amount)?;
    odds.validate()?;
    Ok(StrategyStack::new()
        .with(DontComeNextPoint::new(amount))
        .with(LayOddsBehindDontCome::new(odds)))
}

/// Place 6 and 8, a don't come, and 2x odds behind it.
pub fn place_six_eight_dont_come(amount: f64) -> Result<StrategyStack, PolicyError> {
    check_amount(amount)?;
    Ok(StrategyStack::new()
        .with(PlaceNumbers::new(&[6, 8], amount)?)
        .with(DontComeEveryPoint::new(amount))
        .with(LayOddsBehindDontCome::new(OddsPolicy::Fixed(2))))
}
