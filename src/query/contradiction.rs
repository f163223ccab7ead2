use crate::{asp::Term, graph::NodeId};
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::fmt::Display;

/// The reason why the observations of a node are contradictory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContradictionKind {
    /// Observed both unchanged and increasing.
    ZeroAndPlus,
    /// Observed both unchanged and decreasing.
    ZeroAndMinus,
    /// Observed both increasing and decreasing.
    PlusAndMinus,
    /// Observed both not decreasing and decreasing.
    NotMinusAndMinus,
    /// Observed both not increasing and increasing.
    NotPlusAndPlus,
    /// Observed decreasing while at its minimal level.
    DecreaseAtMin,
    /// Observed increasing while at its maximal level.
    IncreaseAtMax,
}

impl TryFrom<&Term> for ContradictionKind {
    type Error = anyhow::Error;

    fn try_from(t: &Term) -> Result<Self, Self::Error> {
        match t.name() {
            Some("r1") => Ok(ContradictionKind::ZeroAndPlus),
            Some("r2") => Ok(ContradictionKind::ZeroAndMinus),
            Some("r3") => Ok(ContradictionKind::PlusAndMinus),
            Some("r4") => Ok(ContradictionKind::NotMinusAndMinus),
            Some("r5") => Ok(ContradictionKind::NotPlusAndPlus),
            Some("r6") => Ok(ContradictionKind::DecreaseAtMin),
            Some("r7") => Ok(ContradictionKind::IncreaseAtMax),
            _ => Err(anyhow!(r#"unknown contradiction "{}""#, t)),
        }
    }
}

/// Mutually exclusive observations of a node in a profile.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Contradiction {
    /// The profile.
    pub profile: String,
    /// The node.
    pub node: NodeId,
    /// The reason of the contradiction.
    pub kind: ContradictionKind,
}

impl TryFrom<&Term> for Contradiction {
    type Error = anyhow::Error;

    fn try_from(t: &Term) -> Result<Self, Self::Error> {
        match (t.name(), t.arguments()) {
            (Some("contradiction"), [e, v, r]) => Ok(Contradiction {
                profile: e
                    .as_str()
                    .ok_or_else(|| anyhow!(r#"invalid profile name "{}""#, e))?
                    .to_string(),
                node: NodeId::try_from(v)?,
                kind: ContradictionKind::try_from(r)?,
            }),
            _ => Err(anyhow!(r#"unexpected atom "{}""#, t)),
        }
    }
}

impl Display for Contradiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = &self.node;
        match self.kind {
            ContradictionKind::ZeroAndPlus => write!(
                f,
                "Simultaneous 0 and + behavior in node {} is contradictory.",
                n
            ),
            ContradictionKind::ZeroAndMinus => write!(
                f,
                "Simultaneous 0 and - behavior in node {} is contradictory.",
                n
            ),
            ContradictionKind::PlusAndMinus => write!(
                f,
                "Simultaneous + and - behavior in node {} is contradictory.",
                n
            ),
            ContradictionKind::NotMinusAndMinus => write!(
                f,
                "Simultaneous notMinus and - behavior in node {} is contradictory.",
                n
            ),
            ContradictionKind::NotPlusAndPlus => write!(
                f,
                "Simultaneous notPlus and + behavior in node {} is contradictory.",
                n
            ),
            ContradictionKind::DecreaseAtMin => write!(
                f,
                "Behavior -(decrease) while initial level is set to MIN in node {} is contradictory.",
                n
            ),
            ContradictionKind::IncreaseAtMax => write!(
                f,
                "Behavior +(increase) while initial level is set to MAX in node {} is contradictory.",
                n
            ),
        }
    }
}
