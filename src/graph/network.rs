use super::{EdgeSign, Fact, FactSet, NodeId};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A signed influence graph.
///
/// Edges are keyed by their endpoints.
/// An edge may have no sign (unknown influence) or both signs (dual influence, when two statements disagree).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Network {
    nodes: BTreeSet<NodeId>,
    edges: BTreeMap<(NodeId, NodeId), BTreeSet<EdgeSign>>,
    inputs: BTreeSet<NodeId>,
}

/// Counts computed over a network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NetworkStatistics {
    /// The number of OR nodes.
    pub or_nodes: usize,
    /// The number of AND nodes.
    pub and_nodes: usize,
    /// The number of auxiliary nodes.
    pub aux_nodes: usize,
    /// The number of positive edge signs.
    pub activations: usize,
    /// The number of negative edge signs.
    pub inhibitions: usize,
    /// The number of edges without sign.
    pub unknowns: usize,
    /// The number of edges with both signs.
    pub duals: usize,
}

impl Network {
    /// Adds a node, if not already present.
    pub fn add_node(&mut self, node: NodeId) {
        self.nodes.insert(node);
    }

    /// Adds an edge; its endpoints are added as nodes.
    ///
    /// A `None` sign records the edge without sign.
    /// Adding the same edge twice with different signs makes it dual.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, sign: Option<EdgeSign>) {
        self.nodes.insert(source.clone());
        self.nodes.insert(target.clone());
        let signs = self.edges.entry((source, target)).or_default();
        if let Some(s) = sign {
            signs.insert(s);
        }
    }

    /// Declares a node as an input of the network.
    pub fn add_input(&mut self, node: NodeId) {
        self.nodes.insert(node.clone());
        self.inputs.insert(node);
    }

    /// Iterates over the nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.nodes.iter()
    }

    /// Returns `true` iff the node belongs to the network.
    pub fn contains_node(&self, node: &NodeId) -> bool {
        self.nodes.contains(node)
    }

    /// Iterates over the edges and their signs.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId, &BTreeSet<EdgeSign>)> + '_ {
        self.edges.iter().map(|((u, v), s)| (u, v, s))
    }

    /// Returns the signs of an edge, or `None` if there is no such edge.
    pub fn edge_signs(&self, source: &NodeId, target: &NodeId) -> Option<&BTreeSet<EdgeSign>> {
        self.edges.get(&(source.clone(), target.clone()))
    }

    /// Iterates over the declared inputs.
    pub fn inputs(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.inputs.iter()
    }

    /// Returns the number of nodes.
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// Computes the statistics of this network.
    pub fn statistics(&self) -> NetworkStatistics {
        let mut stats = NetworkStatistics::default();
        for n in self.nodes.iter() {
            match n {
                NodeId::Or(_) => stats.or_nodes += 1,
                NodeId::And(_) => stats.and_nodes += 1,
                NodeId::Aux(_) => stats.aux_nodes += 1,
            }
        }
        for signs in self.edges.values() {
            match signs.len() {
                0 => stats.unknowns += 1,
                2 => stats.duals += 1,
                _ => {}
            }
            if signs.contains(&EdgeSign::Plus) {
                stats.activations += 1;
            }
            if signs.contains(&EdgeSign::Minus) {
                stats.inhibitions += 1;
            }
        }
        stats
    }

    /// Returns the canonical facts of this network.
    pub fn to_facts(&self) -> FactSet {
        let vertices = self.nodes.iter().map(|n| Fact::Vertex(n.clone()));
        let edges = self.edges.iter().flat_map(|((u, v), signs)| {
            std::iter::once(Fact::Edge(u.clone(), v.clone())).chain(
                signs
                    .iter()
                    .map(move |s| Fact::ObsELabel(u.clone(), v.clone(), *s)),
            )
        });
        let inputs = self.inputs.iter().map(|n| Fact::Input(n.clone()));
        vertices.chain(edges).chain(inputs).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics() {
        let mut n = Network::default();
        n.add_edge(NodeId::or("A"), NodeId::or("B"), Some(EdgeSign::Plus));
        n.add_edge(NodeId::or("B"), NodeId::or("C"), Some(EdgeSign::Minus));
        n.add_edge(NodeId::or("B"), NodeId::or("C"), Some(EdgeSign::Plus));
        n.add_edge(
            NodeId::And("A & C".to_string()),
            NodeId::or("D"),
            None,
        );
        let stats = n.statistics();
        assert_eq!(4, stats.or_nodes);
        assert_eq!(1, stats.and_nodes);
        assert_eq!(2, stats.activations);
        assert_eq!(1, stats.inhibitions);
        assert_eq!(1, stats.unknowns);
        assert_eq!(1, stats.duals);
    }

    #[test]
    fn test_facts() {
        let mut n = Network::default();
        n.add_edge(NodeId::or("A"), NodeId::or("B"), Some(EdgeSign::Minus));
        n.add_edge(NodeId::or("B"), NodeId::or("C"), None);
        n.add_input(NodeId::or("A"));
        let facts = n.to_facts();
        assert_eq!(3 + 2 + 1 + 1, facts.len());
        assert!(facts.contains(&Fact::ObsELabel(
            NodeId::or("A"),
            NodeId::or("B"),
            EdgeSign::Minus
        )));
        assert!(facts.contains(&Fact::Edge(NodeId::or("B"), NodeId::or("C"))));
        assert!(facts.contains(&Fact::Input(NodeId::or("A"))));
    }
}
