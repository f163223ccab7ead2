use crate::{
    asp::Term,
    graph::{EdgeSign, NodeId},
};
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::{collections::BTreeSet, fmt::Display};

/// The way an observed node sign differs from the label of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipDirection {
    /// Observed `+`, labelled `0`.
    PlusToZero,
    /// Observed `+`, labelled `-`.
    PlusToMinus,
    /// Observed `-`, labelled `0`.
    MinusToZero,
    /// Observed `-`, labelled `+`.
    MinusToPlus,
    /// Observed `0`, labelled `+`.
    ZeroToPlus,
    /// Observed `0`, labelled `-`.
    ZeroToMinus,
    /// Observed `notMinus`, labelled `-`.
    NotMinusToMinus,
    /// Observed `notPlus`, labelled `+`.
    NotPlusToPlus,
}

impl FlipDirection {
    fn try_from_terms(observation: &Term, label: &Term) -> Result<Self> {
        let obs = match observation {
            Term::Number(n) => n.to_string(),
            _ => observation.name().unwrap_or_default().to_string(),
        };
        match (obs.as_str(), label.as_number()) {
            ("1", Some(0)) => Ok(FlipDirection::PlusToZero),
            ("1", Some(-1)) => Ok(FlipDirection::PlusToMinus),
            ("-1", Some(0)) => Ok(FlipDirection::MinusToZero),
            ("-1", Some(1)) => Ok(FlipDirection::MinusToPlus),
            ("0", Some(1)) => Ok(FlipDirection::ZeroToPlus),
            ("0", Some(-1)) => Ok(FlipDirection::ZeroToMinus),
            ("notMinus", Some(-1)) => Ok(FlipDirection::NotMinusToMinus),
            ("notPlus", Some(1)) => Ok(FlipDirection::NotPlusToPlus),
            _ => Err(anyhow!(
                "invalid node sign flip from {} to {}",
                observation,
                label
            )),
        }
    }
}

impl Display for FlipDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (from, to) = match self {
            FlipDirection::PlusToZero => ("+", "0"),
            FlipDirection::PlusToMinus => ("+", "-"),
            FlipDirection::MinusToZero => ("-", "0"),
            FlipDirection::MinusToPlus => ("-", "+"),
            FlipDirection::ZeroToPlus => ("0", "+"),
            FlipDirection::ZeroToMinus => ("0", "-"),
            FlipDirection::NotMinusToMinus => ("notMinus", "-"),
            FlipDirection::NotPlusToPlus => ("notPlus", "+"),
        };
        write!(f, "{} to {}", from, to)
    }
}

/// A repair operation, either on the network or on the observations of a profile.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairOp {
    /// A new signed edge.
    AddEdge(NodeId, NodeId, EdgeSign),
    /// A removed signed edge.
    RemoveEdge(NodeId, NodeId, EdgeSign),
    /// A signed edge which sign is flipped; the sign is the original one.
    FlipEdge(NodeId, NodeId, EdgeSign),
    /// A new influence of a node in a profile.
    NewInfluence(String, NodeId, EdgeSign),
    /// A mismatch between an observation and the label of a node in a profile.
    FlipNodeSign(String, NodeId, FlipDirection),
}

impl TryFrom<&Term> for RepairOp {
    type Error = anyhow::Error;

    fn try_from(t: &Term) -> Result<Self, Self::Error> {
        let node = |v: &Term| NodeId::try_from(v);
        let sign = |s: &Term| EdgeSign::try_from(s);
        let exp = |e: &Term| {
            e.as_str()
                .map(|s| s.to_string())
                .ok_or_else(|| anyhow!(r#"invalid profile name "{}""#, e))
        };
        let op = match (t.name(), t.arguments()) {
            (Some("addedge"), [u, v, s]) => RepairOp::AddEdge(node(u)?, node(v)?, sign(s)?),
            (Some("remedge"), [u, v, s]) => RepairOp::RemoveEdge(node(u)?, node(v)?, sign(s)?),
            (Some("flip"), [u, v, s]) => RepairOp::FlipEdge(node(u)?, node(v)?, sign(s)?),
            (Some("new_influence"), [e, v, s]) => {
                RepairOp::NewInfluence(exp(e)?, node(v)?, sign(s)?)
            }
            (Some("flip_node_sign"), [e, v, o, l]) => {
                RepairOp::FlipNodeSign(exp(e)?, node(v)?, FlipDirection::try_from_terms(o, l)?)
            }
            _ => return Err(anyhow!(r#"unexpected repair "{}""#, t)),
        };
        Ok(op)
    }
}

impl Display for RepairOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepairOp::AddEdge(u, v, s) => write!(f, "add edge: {} -> {} ({})", u, v, s),
            RepairOp::RemoveEdge(u, v, s) => write!(f, "remove edge: {} -> {} ({})", u, v, s),
            RepairOp::FlipEdge(u, v, s) => write!(
                f,
                "flip edge: {} -> {} ({} to {})",
                u,
                v,
                s,
                s.opposite()
            ),
            RepairOp::NewInfluence(_, v, EdgeSign::Plus) => {
                write!(f, "new increasing influence on {}", v)
            }
            RepairOp::NewInfluence(_, v, EdgeSign::Minus) => {
                write!(f, "new decreasing influence on {}", v)
            }
            RepairOp::FlipNodeSign(_, v, d) => write!(f, "flip {}: {}", v, d),
        }
    }
}

/// A set of repair operations, as found in a single model.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RepairSet(BTreeSet<RepairOp>);

impl RepairSet {
    /// Reads the repairs of the atoms of a model, ignoring the other atoms.
    pub fn from_atoms<'a, I>(atoms: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Term>,
    {
        const REPAIR_ATOMS: [(&str, usize); 5] = [
            ("addedge", 3),
            ("remedge", 3),
            ("flip", 3),
            ("new_influence", 3),
            ("flip_node_sign", 4),
        ];
        atoms
            .into_iter()
            .filter(|a| REPAIR_ATOMS.iter().any(|(n, k)| a.is_function(n, *k)))
            .map(RepairOp::try_from)
            .collect::<Result<BTreeSet<RepairOp>>>()
            .map(RepairSet)
    }

    /// Iterates over the repairs.
    pub fn iter(&self) -> impl Iterator<Item = &RepairOp> + '_ {
        self.0.iter()
    }

    /// Returns the number of repairs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set contains no repair.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<RepairOp> for RepairSet {
    fn from_iter<T: IntoIterator<Item = RepairOp>>(iter: T) -> Self {
        RepairSet(iter.into_iter().collect())
    }
}

impl Display for RepairSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ops = self.0.iter().map(|o| o.to_string()).collect::<Vec<String>>();
        write!(f, "{}", ops.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(s: &str) -> RepairOp {
        RepairOp::try_from(&Term::parse(s).unwrap()).unwrap()
    }

    #[test]
    fn test_edge_repairs() {
        assert_eq!(
            RepairOp::RemoveEdge(NodeId::or("B"), NodeId::or("C"), EdgeSign::Minus),
            op(r#"remedge(or("B"),or("C"),-1)"#)
        );
        assert_eq!(
            "flip edge: B -> C (- to +)",
            op(r#"flip(or("B"),or("C"),-1)"#).to_string()
        );
        assert_eq!(
            "add edge: A -> C (+)",
            op(r#"addedge(or("A"),or("C"),1)"#).to_string()
        );
    }

    #[test]
    fn test_node_sign_flips() {
        assert_eq!(
            RepairOp::FlipNodeSign(
                "p".to_string(),
                NodeId::or("C"),
                FlipDirection::PlusToMinus
            ),
            op(r#"flip_node_sign("p",or("C"),1,-1)"#)
        );
        assert_eq!(
            "flip C: notPlus to +",
            op(r#"flip_node_sign("p",or("C"),notPlus,1)"#).to_string()
        );
        assert!(RepairOp::try_from(&Term::parse(r#"flip_node_sign("p",or("C"),1,1)"#).unwrap()).is_err());
    }

    #[test]
    fn test_new_influence() {
        assert_eq!(
            "new decreasing influence on C",
            op(r#"new_influence("p",or("C"),-1)"#).to_string()
        );
    }

    #[test]
    fn test_repair_set_from_atoms() {
        let atoms = vec![
            Term::parse(r#"vlabel("p",or("C"),1)"#).unwrap(),
            Term::parse(r#"remedge(or("B"),or("C"),-1)"#).unwrap(),
            Term::parse(r#"remedge(or("B"),or("C"),-1)"#).unwrap(),
        ];
        let set = RepairSet::from_atoms(&atoms).unwrap();
        assert_eq!(1, set.len());
        assert_eq!("remove edge: B -> C (-)", set.to_string());
    }
}
