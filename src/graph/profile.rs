use super::{Fact, FactSet, Network, NodeId, Observation};
use serde::Serialize;
use std::collections::BTreeSet;

/// An observation profile: the observed variations of some nodes between two states.
///
/// Contradictory observations are kept as they are; they must be detected before any analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: String,
    observations: BTreeSet<(NodeId, Observation)>,
    inputs: BTreeSet<NodeId>,
    min: BTreeSet<NodeId>,
    max: BTreeSet<NodeId>,
}

/// Counts computed over a profile, relative to a network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObservationStatistics {
    /// The number of nodes of the network with at least one observation.
    pub observed: usize,
    /// The number of OR nodes of the network without observation.
    pub unobserved: usize,
    /// The number of observed nodes that are not in the network.
    pub not_in_model: usize,
    /// The number of nodes declared as inputs.
    pub inputs: usize,
    /// The number of nodes at their minimal level.
    pub min: usize,
    /// The number of nodes at their maximal level.
    pub max: usize,
    /// The total number of observations.
    pub observations: usize,
    /// The number of `+` observations.
    pub plus: usize,
    /// The number of `-` observations.
    pub minus: usize,
    /// The number of `0` observations.
    pub zero: usize,
    /// The number of `notPlus` observations.
    pub not_plus: usize,
    /// The number of `notMinus` observations.
    pub not_minus: usize,
}

impl Profile {
    /// Builds an empty profile.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            observations: BTreeSet::new(),
            inputs: BTreeSet::new(),
            min: BTreeSet::new(),
            max: BTreeSet::new(),
        }
    }

    /// Returns the name of the profile.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Records an observation.
    pub fn add_observation(&mut self, node: NodeId, observation: Observation) {
        self.observations.insert((node, observation));
    }

    /// Declares a node as an input in this profile.
    pub fn add_input(&mut self, node: NodeId) {
        self.inputs.insert(node);
    }

    /// Declares a node at its minimal level.
    pub fn add_min(&mut self, node: NodeId) {
        self.min.insert(node);
    }

    /// Declares a node at its maximal level.
    pub fn add_max(&mut self, node: NodeId) {
        self.max.insert(node);
    }

    /// Iterates over the observations.
    pub fn observations(&self) -> impl Iterator<Item = &(NodeId, Observation)> + '_ {
        self.observations.iter()
    }

    /// Iterates over the inputs declared in this profile.
    pub fn inputs(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.inputs.iter()
    }

    /// Computes the statistics of this profile relative to a network.
    pub fn statistics(&self, network: &Network) -> ObservationStatistics {
        let observed_nodes = self
            .observations
            .iter()
            .map(|(n, _)| n)
            .collect::<BTreeSet<&NodeId>>();
        let mut stats = ObservationStatistics {
            observed: observed_nodes
                .iter()
                .filter(|n| network.contains_node(n))
                .count(),
            unobserved: network
                .nodes()
                .filter(|n| n.is_or() && !observed_nodes.contains(n))
                .count(),
            not_in_model: observed_nodes
                .iter()
                .filter(|n| !network.contains_node(n))
                .count(),
            inputs: self.inputs.len(),
            min: self.min.len(),
            max: self.max.len(),
            observations: self.observations.len(),
            ..Default::default()
        };
        for (_, o) in self.observations.iter() {
            match o {
                Observation::Plus => stats.plus += 1,
                Observation::Minus => stats.minus += 1,
                Observation::Zero => stats.zero += 1,
                Observation::NotPlus => stats.not_plus += 1,
                Observation::NotMinus => stats.not_minus += 1,
            }
        }
        stats
    }

    /// Returns the canonical facts of this profile.
    pub fn to_facts(&self) -> FactSet {
        let exp = || self.name.clone();
        std::iter::once(Fact::Exp(exp()))
            .chain(
                self.observations
                    .iter()
                    .map(|(n, o)| Fact::ObsVLabel(exp(), n.clone(), *o)),
            )
            .chain(self.inputs.iter().map(|n| Fact::ProfileInput(exp(), n.clone())))
            .chain(self.min.iter().map(|n| Fact::IsMin(exp(), n.clone())))
            .chain(self.max.iter().map(|n| Fact::IsMax(exp(), n.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeSign;

    #[test]
    fn test_statistics() {
        let mut n = Network::default();
        n.add_edge(NodeId::or("A"), NodeId::or("B"), Some(EdgeSign::Plus));
        n.add_edge(NodeId::or("B"), NodeId::or("C"), Some(EdgeSign::Minus));
        let mut p = Profile::new("p");
        p.add_observation(NodeId::or("A"), Observation::Plus);
        p.add_observation(NodeId::or("B"), Observation::NotMinus);
        p.add_observation(NodeId::or("Z"), Observation::Zero);
        p.add_input(NodeId::or("A"));
        p.add_max(NodeId::or("B"));
        let stats = p.statistics(&n);
        assert_eq!(2, stats.observed);
        assert_eq!(1, stats.unobserved);
        assert_eq!(1, stats.not_in_model);
        assert_eq!(1, stats.inputs);
        assert_eq!(1, stats.max);
        assert_eq!(3, stats.observations);
        assert_eq!(1, stats.plus);
        assert_eq!(1, stats.zero);
        assert_eq!(1, stats.not_minus);
    }

    #[test]
    fn test_contradictory_observations_are_kept() {
        let mut p = Profile::new("p");
        p.add_observation(NodeId::or("X"), Observation::Plus);
        p.add_observation(NodeId::or("X"), Observation::Minus);
        assert_eq!(3, p.to_facts().len());
    }
}
