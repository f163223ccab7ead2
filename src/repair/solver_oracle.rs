use super::{EditSet, RepairOracle};
use crate::{
    asp::{Score, SolveMode},
    encodings::{greedy_repair_modules_for, Module, Setting},
    graph::{Fact, FactSet, Instance, NodeId},
    query::QueryEngine,
};
use anyhow::{anyhow, Context, Result};

/// A repair oracle answering through the solver, under the elementary path semantics.
pub struct SolverRepairOracle<'a> {
    engine: &'a QueryEngine,
    instance: &'a Instance,
    base_modules: Vec<Module>,
}

impl<'a> SolverRepairOracle<'a> {
    /// Builds an oracle for the given instance.
    ///
    /// An error is returned if the setting does not use elementary paths.
    pub fn new(engine: &'a QueryEngine, instance: &'a Instance, setting: &Setting) -> Result<Self> {
        Ok(Self {
            engine,
            instance,
            base_modules: greedy_repair_modules_for(setting)?,
        })
    }

    fn modules_with(&self, extra: &[Module]) -> Vec<Module> {
        let mut modules = self.base_modules.clone();
        modules.extend_from_slice(extra);
        modules
    }

    fn extended_instance(&self, edits: &EditSet) -> FactSet {
        self.instance.union(&edits.to_facts())
    }
}

impl RepairOracle for SolverRepairOracle<'_> {
    fn score(&self, edits: &EditSet) -> Result<Score> {
        let model = self
            .engine
            .solve_single(
                self.modules_with(&[]),
                &self.extended_instance(edits),
                &SolveMode::Optimum,
            )
            .with_context(|| format!("while scoring edit set {}", edits))?;
        Ok(model.score().clone())
    }

    fn best_edge_targets(&self, edits: &EditSet) -> Result<(Score, Vec<NodeId>)> {
        let models = self
            .engine
            .solve(
                self.modules_with(&[Module::BestOneEdge, Module::ShowAddEdgeEnd]),
                &self.extended_instance(edits),
                &SolveMode::OptimalModels { n: 0, bound: None },
            )
            .with_context(|| format!("while looking for the best edge to add to {}", edits))?;
        let score = models
            .first()
            .map(|m| m.score().clone())
            .ok_or_else(|| anyhow!("no optimal model found while looking for edge targets"))?;
        let mut targets = vec![];
        for model in models.iter() {
            for atom in model.atoms_of("addeddy", 1) {
                let target = NodeId::try_from(&atom.arguments()[0])?;
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
        }
        Ok((score, targets))
    }

    fn best_edge_sources(&self, edits: &EditSet, target: &NodeId) -> Result<Vec<(EditSet, Score)>> {
        let facts = self
            .extended_instance(edits)
            .union(&FactSet::from_iter([Fact::EdgeEnd(target.clone())]));
        self.engine
            .solve(
                self.modules_with(&[Module::BestEdgeStart, Module::ShowRepairs]),
                &facts,
                &SolveMode::OptimalModels { n: 0, bound: None },
            )
            .with_context(|| format!("while looking for the best edges ending in {}", target))?
            .iter()
            .map(|m| Ok((EditSet::try_from_model(m)?, m.score().clone())))
            .collect()
    }
}
