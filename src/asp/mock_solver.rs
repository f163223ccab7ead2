use super::{AspSolver, AspSolverFactory, Model, Program, Score, SolveMode, SolvingListener, SolvingResult, Term};
use crate::encodings::Module;
use anyhow::Result;
use std::{cell::RefCell, collections::VecDeque, rc::Rc};

/// A solver returning canned results, and recording the calls it receives.
#[derive(Default, Clone)]
pub(crate) struct MockSolverFactory {
    results: Rc<RefCell<VecDeque<SolvingResult>>>,
    calls: Rc<RefCell<Vec<(Program, SolveMode)>>>,
}

impl MockSolverFactory {
    pub(crate) fn push_result(&self, result: SolvingResult) {
        self.results.borrow_mut().push_back(result);
    }

    pub(crate) fn push_model(&self, atoms: &[&str], score: Score) {
        let atoms = atoms.iter().map(|a| Term::parse(a).unwrap()).collect();
        self.push_result(SolvingResult::Satisfiable(vec![Model::new(atoms, score)]));
    }

    pub(crate) fn n_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    pub(crate) fn call_modules(&self, i: usize) -> Vec<Module> {
        self.calls.borrow()[i].0.modules().to_vec()
    }

    pub(crate) fn call_program(&self, i: usize) -> Program {
        self.calls.borrow()[i].0.clone()
    }

    pub(crate) fn call_mode(&self, i: usize) -> SolveMode {
        self.calls.borrow()[i].1.clone()
    }
}

impl AspSolverFactory for MockSolverFactory {
    fn new_solver(&self) -> Box<dyn AspSolver> {
        Box::new(MockSolver {
            factory: self.clone(),
        })
    }
}

struct MockSolver {
    factory: MockSolverFactory,
}

impl AspSolver for MockSolver {
    fn solve(&mut self, program: &Program, mode: &SolveMode) -> Result<SolvingResult> {
        self.factory
            .calls
            .borrow_mut()
            .push((program.clone(), mode.clone()));
        Ok(self
            .factory
            .results
            .borrow_mut()
            .pop_front()
            .unwrap_or(SolvingResult::Unknown))
    }

    fn add_listener(&mut self, _listener: Box<dyn SolvingListener>) {}
}
