use crate::asp::Term;
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::fmt::Display;

/// The sign of an influence edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EdgeSign {
    /// An activation.
    Plus,
    /// An inhibition.
    Minus,
}

impl EdgeSign {
    /// Returns the opposite sign.
    pub fn opposite(self) -> Self {
        match self {
            EdgeSign::Plus => EdgeSign::Minus,
            EdgeSign::Minus => EdgeSign::Plus,
        }
    }

    /// Returns the sign obtained by composing two influences.
    pub fn compose(self, other: EdgeSign) -> Self {
        if self == other {
            EdgeSign::Plus
        } else {
            EdgeSign::Minus
        }
    }

    pub(crate) fn to_term(self) -> Term {
        match self {
            EdgeSign::Plus => Term::Number(1),
            EdgeSign::Minus => Term::Number(-1),
        }
    }
}

impl TryFrom<&Term> for EdgeSign {
    type Error = anyhow::Error;

    fn try_from(t: &Term) -> Result<Self, Self::Error> {
        match t.as_number() {
            Some(1) => Ok(EdgeSign::Plus),
            Some(-1) => Ok(EdgeSign::Minus),
            _ => Err(anyhow!(r#"invalid edge sign "{}""#, t)),
        }
    }
}

impl Display for EdgeSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeSign::Plus => write!(f, "+"),
            EdgeSign::Minus => write!(f, "-"),
        }
    }
}

/// An observed variation of a node in a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Observation {
    /// The node increases.
    Plus,
    /// The node decreases.
    Minus,
    /// The node does not change.
    Zero,
    /// The node does not increase.
    NotPlus,
    /// The node does not decrease.
    NotMinus,
}

impl Observation {
    pub(crate) fn to_term(self) -> Term {
        match self {
            Observation::Plus => Term::Number(1),
            Observation::Minus => Term::Number(-1),
            Observation::Zero => Term::Number(0),
            Observation::NotPlus => Term::constant("notPlus"),
            Observation::NotMinus => Term::constant("notMinus"),
        }
    }
}

impl TryFrom<&Term> for Observation {
    type Error = anyhow::Error;

    fn try_from(t: &Term) -> Result<Self, Self::Error> {
        match t {
            Term::Number(1) => Ok(Observation::Plus),
            Term::Number(-1) => Ok(Observation::Minus),
            Term::Number(0) => Ok(Observation::Zero),
            _ if t.is_function("notPlus", 0) => Ok(Observation::NotPlus),
            _ if t.is_function("notMinus", 0) => Ok(Observation::NotMinus),
            _ => Err(anyhow!(r#"invalid observation "{}""#, t)),
        }
    }
}

impl Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Observation::Plus => write!(f, "+"),
            Observation::Minus => write!(f, "-"),
            Observation::Zero => write!(f, "0"),
            Observation::NotPlus => write!(f, "notPlus"),
            Observation::NotMinus => write!(f, "notMinus"),
        }
    }
}

/// A computed behavior of a node, used by labelings and predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Behavior {
    /// Increase.
    Plus,
    /// Decrease.
    Minus,
    /// No change.
    Zero,
    /// Decrease or no change.
    NotPlus,
    /// Increase or no change.
    NotMinus,
    /// Increase or decrease.
    Change,
}

impl Behavior {
    /// Returns `true` for the behaviors fixing a single sign.
    pub fn is_strong(self) -> bool {
        matches!(self, Behavior::Plus | Behavior::Minus | Behavior::Zero)
    }
}

impl TryFrom<&Term> for Behavior {
    type Error = anyhow::Error;

    fn try_from(t: &Term) -> Result<Self, Self::Error> {
        match t {
            Term::Number(1) => Ok(Behavior::Plus),
            Term::Number(-1) => Ok(Behavior::Minus),
            Term::Number(0) => Ok(Behavior::Zero),
            _ if t.is_function("notPlus", 0) => Ok(Behavior::NotPlus),
            _ if t.is_function("notMinus", 0) => Ok(Behavior::NotMinus),
            _ if t.is_function("change", 0) => Ok(Behavior::Change),
            _ => Err(anyhow!(r#"invalid behavior "{}""#, t)),
        }
    }
}

impl Display for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Behavior::Plus => write!(f, "+"),
            Behavior::Minus => write!(f, "-"),
            Behavior::Zero => write!(f, "0"),
            Behavior::NotPlus => write!(f, "notPlus"),
            Behavior::NotMinus => write!(f, "notMinus"),
            Behavior::Change => write!(f, "CHANGE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose() {
        assert_eq!(EdgeSign::Plus, EdgeSign::Minus.compose(EdgeSign::Minus));
        assert_eq!(EdgeSign::Minus, EdgeSign::Plus.compose(EdgeSign::Minus));
        assert_eq!(EdgeSign::Plus, EdgeSign::Minus.opposite());
    }

    #[test]
    fn test_edge_sign_from_term() {
        assert_eq!(EdgeSign::Minus, EdgeSign::try_from(&Term::Number(-1)).unwrap());
        assert!(EdgeSign::try_from(&Term::Number(0)).is_err());
    }

    #[test]
    fn test_behavior_from_term() {
        assert_eq!(
            Behavior::Change,
            Behavior::try_from(&Term::constant("change")).unwrap()
        );
        assert_eq!(
            Behavior::NotPlus,
            Behavior::try_from(&Term::constant("notPlus")).unwrap()
        );
        assert!(Behavior::try_from(&Term::constant("input")).is_err());
    }

    #[test]
    fn test_observation_terms() {
        for o in [
            Observation::Plus,
            Observation::Minus,
            Observation::Zero,
            Observation::NotPlus,
            Observation::NotMinus,
        ] {
            assert_eq!(o, Observation::try_from(&o.to_term()).unwrap());
        }
    }
}
