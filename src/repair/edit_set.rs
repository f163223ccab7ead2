use crate::{
    asp::Model,
    graph::{EdgeSign, Fact, FactSet, NodeId},
};
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::{collections::BTreeSet, fmt::Display};

/// A signed edge added to a network.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Edit {
    /// The source of the edge.
    pub source: NodeId,
    /// The target of the edge.
    pub target: NodeId,
    /// The sign of the edge.
    pub sign: EdgeSign,
}

impl Edit {
    /// Builds an edit.
    pub fn new(source: NodeId, target: NodeId, sign: EdgeSign) -> Self {
        Self {
            source,
            target,
            sign,
        }
    }

    fn to_fact(&self) -> Fact {
        Fact::AddEdge(self.source.clone(), self.target.clone(), self.sign)
    }
}

impl Display for Edit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.source, self.target, self.sign)
    }
}

/// A set of edge additions, identified by value.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EditSet(BTreeSet<Edit>);

impl EditSet {
    /// Reads the edges added in a model, that is its `addedge/3` atoms.
    pub fn try_from_model(model: &Model) -> Result<Self> {
        model
            .atoms_of("addedge", 3)
            .map(|a| match Fact::try_from(a)? {
                Fact::AddEdge(u, v, s) => Ok(Edit::new(u, v, s)),
                _ => Err(anyhow!(r#"unexpected atom "{}""#, a)),
            })
            .collect()
    }

    /// Returns a new set made of this one and the provided edits.
    pub fn with<I>(&self, edits: I) -> Self
    where
        I: IntoIterator<Item = Edit>,
    {
        let mut set = self.0.clone();
        set.extend(edits);
        EditSet(set)
    }

    /// Iterates over the edits.
    pub fn iter(&self) -> impl Iterator<Item = &Edit> + '_ {
        self.0.iter()
    }

    /// Returns the number of edits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set contains no edit.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the `addedge` facts of the edits, to be added to an instance.
    pub fn to_facts(&self) -> FactSet {
        self.0.iter().map(Edit::to_fact).collect()
    }
}

impl FromIterator<Edit> for EditSet {
    fn from_iter<T: IntoIterator<Item = Edit>>(iter: T) -> Self {
        EditSet(iter.into_iter().collect())
    }
}

impl Display for EditSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let edits = self.0.iter().map(|e| e.to_string()).collect::<Vec<String>>();
        write!(f, "{{{}}}", edits.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asp::{Score, Term};

    fn edit(u: &str, v: &str, s: EdgeSign) -> Edit {
        Edit::new(NodeId::or(u), NodeId::or(v), s)
    }

    #[test]
    fn test_with_is_a_set_union() {
        let set = EditSet::default().with(vec![edit("A", "B", EdgeSign::Plus)]);
        let bigger = set.with(vec![
            edit("A", "B", EdgeSign::Plus),
            edit("B", "C", EdgeSign::Minus),
        ]);
        assert_eq!(1, set.len());
        assert_eq!(2, bigger.len());
        assert_eq!(
            bigger,
            vec![edit("B", "C", EdgeSign::Minus), edit("A", "B", EdgeSign::Plus)]
                .into_iter()
                .collect()
        );
    }

    #[test]
    fn test_to_facts() {
        let set: EditSet = vec![edit("A", "C", EdgeSign::Minus)].into_iter().collect();
        assert!(set.to_facts().contains(&Fact::AddEdge(
            NodeId::or("A"),
            NodeId::or("C"),
            EdgeSign::Minus
        )));
    }

    #[test]
    fn test_from_model() {
        let model = Model::new(
            vec![
                Term::parse(r#"addedge(or("A"),or("C"),1)"#).unwrap(),
                Term::parse(r#"remedge(or("A"),or("B"),1)"#).unwrap(),
            ],
            Score::with_fit_and_repairs(0, 3),
        );
        let set = EditSet::try_from_model(&model).unwrap();
        assert_eq!(
            vec![&edit("A", "C", EdgeSign::Plus)],
            set.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_display() {
        let set: EditSet = vec![edit("A", "C", EdgeSign::Plus), edit("A", "B", EdgeSign::Minus)]
            .into_iter()
            .collect();
        assert_eq!(r#"{A -> B (-), A -> C (+)}"#, set.to_string());
    }
}
