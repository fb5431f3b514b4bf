//! Odds multiplier policy.

use layline_types::{craps::is_point_number, PolicyError};
use serde::{Deserialize, Serialize};

/// How many times the base stake to lay behind a number.
///
/// Written as `fixed: 2` or `variable` in config files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OddsPolicyRepr", into = "OddsPolicyRepr")]
pub enum OddsPolicy {
    /// The same multiple (1, 2 or 3) behind every number.
    Fixed(u8),
    /// 1x behind 6/8, 2x behind 5/9, 3x behind 4/10.
    Variable,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum OddsPolicyRepr {
    Fixed { fixed: u8 },
    Named(String),
}

impl TryFrom<OddsPolicyRepr> for OddsPolicy {
    type Error = String;

    fn try_from(repr: OddsPolicyRepr) -> Result<Self, Self::Error> {
        match repr {
            OddsPolicyRepr::Fixed { fixed } => {
                OddsPolicy::fixed(fixed).map_err(|err| err.to_string())
            }
            OddsPolicyRepr::Named(name) if name == "variable" => Ok(OddsPolicy::Variable),
            OddsPolicyRepr::Named(name) => Err(format!(
                "unknown odds policy {name:?} (expected `variable` or `fixed: <1-3>`)"
            )),
        }
    }
}

impl From<OddsPolicy> for OddsPolicyRepr {
    fn from(policy: OddsPolicy) -> Self {
        match policy {
            OddsPolicy::Fixed(fixed) => OddsPolicyRepr::Fixed { fixed },
            OddsPolicy::Variable => OddsPolicyRepr::Named("variable".to_string()),
        }
    }
}

impl OddsPolicy {
    pub fn fixed(multiple: u8) -> Result<Self, PolicyError> {
        let policy = OddsPolicy::Fixed(multiple);
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        match self {
            OddsPolicy::Fixed(multiple) if !(1..=3).contains(multiple) => {
                Err(PolicyError::InvalidMultiple(*multiple))
            }
            _ => Ok(()),
        }
    }

    /// Multiplier to apply behind `number`.
    pub fn multiplier(&self, number: u8) -> Result<u8, PolicyError> {
        if !is_point_number(number) {
            return Err(PolicyError::InvalidPointNumber(number));
        }
        match self {
            OddsPolicy::Fixed(multiple) => {
                self.validate()?;
                Ok(*multiple)
            }
            OddsPolicy::Variable => Ok(match number {
                6 | 8 => 1,
                5 | 9 => 2,
                _ => 3,
            }),
        }
    }
}
