use super::RepairSet;
use crate::{
    asp::{Model, Term},
    graph::NodeId,
};
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::{collections::BTreeSet, fmt::Display};

/// The label of a node in a profile: the way it varies between the two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum NodeSign {
    /// Increase.
    Plus,
    /// Decrease.
    Minus,
    /// No change.
    Zero,
}

impl TryFrom<&Term> for NodeSign {
    type Error = anyhow::Error;

    fn try_from(t: &Term) -> Result<Self, Self::Error> {
        match t.as_number() {
            Some(1) => Ok(NodeSign::Plus),
            Some(-1) => Ok(NodeSign::Minus),
            Some(0) => Ok(NodeSign::Zero),
            _ => Err(anyhow!(r#"invalid node sign "{}""#, t)),
        }
    }
}

impl Display for NodeSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeSign::Plus => write!(f, "+"),
            NodeSign::Minus => write!(f, "-"),
            NodeSign::Zero => write!(f, "0"),
        }
    }
}

/// An optimal labeling: the signs of the OR nodes, and the repairs this labeling needs.
///
/// With multiple-state semantics, a node may hold several signs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Labeling {
    labels: BTreeSet<(String, NodeId, NodeSign)>,
    repairs: RepairSet,
}

impl Labeling {
    /// Reads a labeling from a model.
    pub fn try_from_model(model: &Model) -> Result<Self> {
        let labels = model
            .atoms_of("vlabel", 3)
            .map(|a| match a.arguments() {
                [e, v, s] => Ok((
                    e.as_str()
                        .ok_or_else(|| anyhow!(r#"invalid profile name "{}""#, e))?
                        .to_string(),
                    NodeId::try_from(v)?,
                    NodeSign::try_from(s)?,
                )),
                _ => Err(anyhow!(r#"unexpected atom "{}""#, a)),
            })
            .collect::<Result<BTreeSet<(String, NodeId, NodeSign)>>>()?;
        let repairs = RepairSet::from_atoms(model.atoms())?;
        Ok(Self { labels, repairs })
    }

    /// Iterates over the labels, as (profile, node, sign) triples.
    pub fn labels(&self) -> impl Iterator<Item = &(String, NodeId, NodeSign)> + '_ {
        self.labels.iter()
    }

    /// Returns the repairs needed by this labeling.
    pub fn repairs(&self) -> &RepairSet {
        &self.repairs
    }
}
