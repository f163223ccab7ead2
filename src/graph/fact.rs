use super::{EdgeSign, NodeId, Observation};
use crate::asp::Term;
use anyhow::{anyhow, Result};
use std::fmt::Display;

/// A canonical fact, as given to the solver.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Fact {
    /// `vertex(V)`: a node of the graph.
    Vertex(NodeId),
    /// `edge(U,V)`: a directed edge, signed or not.
    Edge(NodeId, NodeId),
    /// `obs_elabel(U,V,S)`: the sign of an edge.
    ObsELabel(NodeId, NodeId, EdgeSign),
    /// `input(V)`: a node declared as an input of the network.
    Input(NodeId),
    /// `exp(E)`: a profile.
    Exp(String),
    /// `obs_vlabel(E,V,S)`: an observation of a node in a profile.
    ObsVLabel(String, NodeId, Observation),
    /// `input(E,V)`: a node declared as an input in a profile.
    ProfileInput(String, NodeId),
    /// `ismin(E,V)`: a node at its minimal level in a profile.
    IsMin(String, NodeId),
    /// `ismax(E,V)`: a node at its maximal level in a profile.
    IsMax(String, NodeId),
    /// `addedge(U,V,S)`: an edge added by a repair.
    AddEdge(NodeId, NodeId, EdgeSign),
    /// `edge_end(V)`: the target node of an edge to add.
    EdgeEnd(NodeId),
}

impl Fact {
    /// Returns the term of this fact.
    pub fn to_term(&self) -> Term {
        let exp = |e: &str| Term::string(e);
        match self {
            Fact::Vertex(v) => Term::function("vertex", vec![v.to_term()]),
            Fact::Edge(u, v) => Term::function("edge", vec![u.to_term(), v.to_term()]),
            Fact::ObsELabel(u, v, s) => {
                Term::function("obs_elabel", vec![u.to_term(), v.to_term(), s.to_term()])
            }
            Fact::Input(v) => Term::function("input", vec![v.to_term()]),
            Fact::Exp(e) => Term::function("exp", vec![exp(e)]),
            Fact::ObsVLabel(e, v, o) => {
                Term::function("obs_vlabel", vec![exp(e), v.to_term(), o.to_term()])
            }
            Fact::ProfileInput(e, v) => Term::function("input", vec![exp(e), v.to_term()]),
            Fact::IsMin(e, v) => Term::function("ismin", vec![exp(e), v.to_term()]),
            Fact::IsMax(e, v) => Term::function("ismax", vec![exp(e), v.to_term()]),
            Fact::AddEdge(u, v, s) => {
                Term::function("addedge", vec![u.to_term(), v.to_term(), s.to_term()])
            }
            Fact::EdgeEnd(v) => Term::function("edge_end", vec![v.to_term()]),
        }
    }
}

impl TryFrom<&Term> for Fact {
    type Error = anyhow::Error;

    fn try_from(t: &Term) -> Result<Self, Self::Error> {
        let exp = |e: &Term| {
            e.as_str()
                .map(|s| s.to_string())
                .ok_or_else(|| anyhow!(r#"invalid profile name "{}""#, e))
        };
        let node = |v: &Term| NodeId::try_from(v);
        let fact = match (t.name(), t.arguments()) {
            (Some("vertex"), [v]) => Fact::Vertex(node(v)?),
            (Some("edge"), [u, v]) => Fact::Edge(node(u)?, node(v)?),
            (Some("obs_elabel"), [u, v, s]) => {
                Fact::ObsELabel(node(u)?, node(v)?, EdgeSign::try_from(s)?)
            }
            (Some("input"), [v]) => Fact::Input(node(v)?),
            (Some("exp"), [e]) => Fact::Exp(exp(e)?),
            (Some("obs_vlabel"), [e, v, o]) => {
                Fact::ObsVLabel(exp(e)?, node(v)?, Observation::try_from(o)?)
            }
            (Some("input"), [e, v]) => Fact::ProfileInput(exp(e)?, node(v)?),
            (Some("ismin"), [e, v]) => Fact::IsMin(exp(e)?, node(v)?),
            (Some("ismax"), [e, v]) => Fact::IsMax(exp(e)?, node(v)?),
            (Some("addedge"), [u, v, s]) => {
                Fact::AddEdge(node(u)?, node(v)?, EdgeSign::try_from(s)?)
            }
            (Some("edge_end"), [v]) => Fact::EdgeEnd(node(v)?),
            _ => return Err(anyhow!(r#"unknown fact "{}""#, t)),
        };
        Ok(fact)
    }
}

impl Display for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.", self.to_term())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let f = Fact::ObsVLabel("x1".to_string(), NodeId::or("B"), Observation::NotPlus);
        assert_eq!(r#"obs_vlabel("x1",or("B"),notPlus)."#, f.to_string());
    }

    #[test]
    fn test_input_arity() {
        let global = Term::parse(r#"input(or("A"))"#).unwrap();
        assert_eq!(Fact::Input(NodeId::or("A")), Fact::try_from(&global).unwrap());
        let local = Term::parse(r#"input("p",or("A"))"#).unwrap();
        assert_eq!(
            Fact::ProfileInput("p".to_string(), NodeId::or("A")),
            Fact::try_from(&local).unwrap()
        );
    }

    #[test]
    fn test_unknown_fact() {
        assert!(Fact::try_from(&Term::parse(r#"vlabel("p",or("A"),1)"#).unwrap()).is_err());
        assert!(Fact::try_from(&Term::parse(r#"exp(p)"#).unwrap()).is_err());
    }
}
