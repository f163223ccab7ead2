use crate::asp::Term;
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::fmt::Display;

/// The identifier of a node of an influence graph.
///
/// Genes and species are OR nodes, named by their textual identifier.
/// Conjunctions like `(a & !b)` are AND nodes, named by their normalized text.
/// Nodes introduced by derived-edge notations are auxiliary nodes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum NodeId {
    /// A gene or species.
    Or(String),
    /// A conjunction of literals.
    And(String),
    /// A synthetic node.
    Aux(String),
}

impl NodeId {
    /// Builds an OR node identifier.
    pub fn or(name: &str) -> Self {
        NodeId::Or(name.to_string())
    }

    /// Returns the textual name of the node.
    pub fn name(&self) -> &str {
        match self {
            NodeId::Or(s) | NodeId::And(s) | NodeId::Aux(s) => s,
        }
    }

    /// Returns `true` iff this node is an OR node.
    pub fn is_or(&self) -> bool {
        matches!(self, NodeId::Or(_))
    }

    pub(crate) fn to_term(&self) -> Term {
        let kind = match self {
            NodeId::Or(_) => "or",
            NodeId::And(_) => "and",
            NodeId::Aux(_) => "aux",
        };
        Term::function(kind, vec![Term::string(self.name())])
    }
}

impl TryFrom<&Term> for NodeId {
    type Error = anyhow::Error;

    fn try_from(t: &Term) -> Result<Self, Self::Error> {
        let name = match t.arguments() {
            [Term::String(s)] => s.to_string(),
            _ => return Err(anyhow!(r#"invalid node identifier "{}""#, t)),
        };
        match t.name() {
            Some("or") => Ok(NodeId::Or(name)),
            Some("and") => Ok(NodeId::And(name)),
            Some("aux") => Ok(NodeId::Aux(name)),
            _ => Err(anyhow!(r#"invalid node identifier "{}""#, t)),
        }
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term() {
        let n = NodeId::And("a & !b".to_string());
        assert_eq!(r#"and("a & !b")"#, n.to_term().to_string());
        assert_eq!(n, NodeId::try_from(&n.to_term()).unwrap());
    }

    #[test]
    fn test_invalid_term() {
        assert!(NodeId::try_from(&Term::parse(r#"xor("a")"#).unwrap()).is_err());
        assert!(NodeId::try_from(&Term::parse("or(a)").unwrap()).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!("A", NodeId::or("A").to_string());
    }
}
