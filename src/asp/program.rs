use crate::{encodings::Module, graph::FactSet};
use anyhow::{Context, Result};
use std::{fmt::Display, io::Write};

/// A logic program: an ordered list of rule modules applied to a set of facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    modules: Vec<Module>,
    facts: FactSet,
}

impl Program {
    /// Builds a program.
    pub fn new(modules: Vec<Module>, facts: FactSet) -> Self {
        Self { modules, facts }
    }

    /// Returns the modules of this program.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Returns the facts of this program.
    pub fn facts(&self) -> &FactSet {
        &self.facts
    }

    /// Writes the program in the solver input form.
    pub fn write_to(&self, writer: &mut dyn Write) -> Result<()> {
        for m in self.modules.iter() {
            let context = || format!("while writing module {}", m.name());
            writeln!(writer, "% module {}", m.name()).with_context(context)?;
            writeln!(writer, "{}", m.program()).with_context(context)?;
        }
        writeln!(writer, "% facts").context("while writing facts")?;
        self.facts.write_asp(writer)
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for m in self.modules.iter() {
            writeln!(f, "% module {}", m.name())?;
            writeln!(f, "{}", m.program())?;
        }
        writeln!(f, "% facts")?;
        write!(f, "{}", self.facts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Fact, NodeId};

    #[test]
    fn test_write_to() {
        let facts = vec![Fact::Input(NodeId::or("A"))].into_iter().collect();
        let program = Program::new(vec![Module::GuessInputs], facts);
        let mut buffer = vec![];
        program.write_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("% module guess_inputs\n"));
        assert!(text.ends_with("% facts\ninput(or(\"A\")).\n"));
        assert_eq!(program.to_string(), text);
    }
}
