use crate::{
    asp::Model,
    graph::{EdgeSign, Fact, FactSet, NodeId, Observation},
};
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A minimal inconsistent core: a subset-minimal set of nodes which observations cannot be explained together.
///
/// The core is described by its nodes, the edges ending in the core, and the observations of the core nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mic {
    nodes: BTreeSet<NodeId>,
    edges: BTreeMap<(NodeId, NodeId), BTreeSet<EdgeSign>>,
    observations: BTreeSet<(String, NodeId, Observation)>,
}

impl Mic {
    /// Reads a core from a model, and collects the related facts of the instance.
    pub fn try_from_model(model: &Model, instance: &FactSet) -> Result<Self> {
        let nodes = model
            .atoms_of("active", 1)
            .map(|a| match a.arguments() {
                [v] => NodeId::try_from(v),
                _ => Err(anyhow!(r#"unexpected atom "{}""#, a)),
            })
            .collect::<Result<BTreeSet<NodeId>>>()?;
        let mut edges: BTreeMap<(NodeId, NodeId), BTreeSet<EdgeSign>> = BTreeMap::new();
        let mut observations = BTreeSet::new();
        for fact in instance.iter() {
            match fact {
                Fact::Edge(u, v) if nodes.contains(v) => {
                    edges.entry((u.clone(), v.clone())).or_default();
                }
                Fact::ObsELabel(u, v, s) if nodes.contains(v) => {
                    edges.entry((u.clone(), v.clone())).or_default().insert(*s);
                }
                Fact::ObsVLabel(e, v, o) if nodes.contains(v) => {
                    observations.insert((e.clone(), v.clone(), *o));
                }
                _ => {}
            }
        }
        Ok(Self {
            nodes,
            edges,
            observations,
        })
    }

    /// Iterates over the nodes of the core.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.nodes.iter()
    }

    /// Iterates over the edges ending in the core, with their signs.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId, &BTreeSet<EdgeSign>)> + '_ {
        self.edges.iter().map(|((u, v), s)| (u, v, s))
    }

    /// Iterates over the observations of the core nodes.
    pub fn observations(&self) -> impl Iterator<Item = &(String, NodeId, Observation)> + '_ {
        self.observations.iter()
    }
}

/// Removes the cores made of the same nodes, keeping the first occurrence of each one.
pub fn remove_duplicate_mics(mics: Vec<Mic>) -> Vec<Mic> {
    let mut seen = BTreeSet::new();
    mics.into_iter()
        .filter(|m| seen.insert(m.nodes.clone()))
        .collect()
}
