use super::Fact;
use crate::asp::Term;
use anyhow::{Context, Result};
use std::{
    collections::BTreeSet,
    fmt::Display,
    io::{BufRead, BufReader, Read, Write},
};

/// An immutable set of canonical facts.
///
/// Networks, profiles and instances are all fact sets.
/// Sets are never modified in place once built: unions and filters produce new sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactSet(BTreeSet<Fact>);

/// An instance, i.e. the union of a network and some profiles.
pub type Instance = FactSet;

impl FactSet {
    /// Returns the union of this set and another one.
    ///
    /// # Example
    ///
    /// ```
    /// # use iggy::graph::{Fact, FactSet, NodeId};
    /// let a: FactSet = vec![Fact::Vertex(NodeId::or("A"))].into_iter().collect();
    /// let b: FactSet = vec![Fact::Input(NodeId::or("A"))].into_iter().collect();
    /// assert_eq!(2, a.union(&b).len());
    /// assert_eq!(a, a.union(&a));
    /// ```
    pub fn union(&self, other: &FactSet) -> FactSet {
        FactSet(self.0.union(&other.0).cloned().collect())
    }

    /// Returns the subset of facts satisfying a predicate.
    pub fn filter<P>(&self, predicate: P) -> FactSet
    where
        P: Fn(&Fact) -> bool,
    {
        FactSet(self.0.iter().filter(|f| predicate(f)).cloned().collect())
    }

    /// Iterates over the facts, in a deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &Fact> + '_ {
        self.0.iter()
    }

    /// Returns `true` iff this set contains the fact.
    pub fn contains(&self, fact: &Fact) -> bool {
        self.0.contains(fact)
    }

    /// Returns the number of facts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` iff the set has no facts.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Writes the facts in the solver input form, one fact per line.
    pub fn write_asp(&self, writer: &mut dyn Write) -> Result<()> {
        for f in self.0.iter() {
            writeln!(writer, "{}", f).context("while writing facts")?;
        }
        Ok(())
    }

    /// Reads facts written by [`write_asp`](Self::write_asp).
    ///
    /// Blank lines and `%` comments are ignored.
    pub fn read_asp(reader: &mut dyn Read) -> Result<FactSet> {
        let br = BufReader::new(reader);
        let mut facts = BTreeSet::new();
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line with index {}", i);
            let line = line.with_context(context)?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('%') {
                continue;
            }
            let term_str = trimmed.strip_suffix('.').unwrap_or(trimmed);
            let term = Term::parse(term_str).with_context(context)?;
            facts.insert(Fact::try_from(&term).with_context(context)?);
        }
        Ok(FactSet(facts))
    }
}

impl FromIterator<Fact> for FactSet {
    fn from_iter<T: IntoIterator<Item = Fact>>(iter: T) -> Self {
        FactSet(iter.into_iter().collect())
    }
}

impl Display for FactSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for fact in self.0.iter() {
            writeln!(f, "{}", fact)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeSign, NodeId, Observation};

    fn network() -> FactSet {
        vec![
            Fact::Vertex(NodeId::or("A")),
            Fact::Vertex(NodeId::or("B")),
            Fact::Edge(NodeId::or("A"), NodeId::or("B")),
            Fact::ObsELabel(NodeId::or("A"), NodeId::or("B"), EdgeSign::Minus),
        ]
        .into_iter()
        .collect()
    }

    fn profile(name: &str) -> FactSet {
        vec![
            Fact::Exp(name.to_string()),
            Fact::ObsVLabel(name.to_string(), NodeId::or("B"), Observation::Plus),
            Fact::ProfileInput(name.to_string(), NodeId::or("A")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_union_idempotent() {
        let n = network();
        assert_eq!(n, n.union(&n));
    }

    #[test]
    fn test_union_commutative_associative() {
        let (n, p1, p2) = (network(), profile("p1"), profile("p2"));
        assert_eq!(n.union(&p1), p1.union(&n));
        assert_eq!(n.union(&p1).union(&p2), n.union(&p1.union(&p2)));
        assert_eq!(10, n.union(&p1).union(&p2).len());
    }

    #[test]
    fn test_union_does_not_modify_operands() {
        let n = network();
        let _ = n.union(&profile("p"));
        assert_eq!(4, n.len());
    }

    #[test]
    fn test_filter() {
        let inst = network().union(&profile("p"));
        let vertices = inst.filter(|f| matches!(f, Fact::Vertex(_)));
        assert_eq!(2, vertices.len());
    }

    #[test]
    fn test_read_written_facts() {
        let inst = network().union(&profile("dir/p.obs"));
        let mut buffer = vec![];
        inst.write_asp(&mut buffer).unwrap();
        let read = FactSet::read_asp(&mut buffer.as_slice()).unwrap();
        assert_eq!(inst, read);
    }

    #[test]
    fn test_read_error_line() {
        let text = "vertex(or(\"A\")).\nfoo(1).\n";
        let err = FactSet::read_asp(&mut text.as_bytes()).unwrap_err();
        assert_eq!("while reading line with index 1", err.to_string());
    }
}
