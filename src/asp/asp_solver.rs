use super::{ExternalAspSolver, Program, Score, Term};
use anyhow::Result;
use std::fmt::Display;

/// The kind of answer expected from a solver call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveMode {
    /// Any single model.
    FirstModel,
    /// A single optimal model.
    Optimum,
    /// Up to `n` optimal models (0 for all of them).
    ///
    /// If a bound is given, the models are the ones with this exact score.
    OptimalModels {
        /// The maximal number of models.
        n: usize,
        /// The score of the models to enumerate.
        bound: Option<Score>,
    },
    /// A single model made of the atoms true in every optimal model.
    CautiousOptimal {
        /// The optimal score, if already known.
        bound: Option<Score>,
    },
    /// A single model made of the atoms true in at least one optimal model.
    BraveOptimal {
        /// The optimal score, if already known.
        bound: Option<Score>,
    },
    /// All the subset-minimal models, with respect to the shown atoms.
    SubsetMinimal,
}

impl Display for SolveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveMode::FirstModel => write!(f, "first model"),
            SolveMode::Optimum => write!(f, "optimum"),
            SolveMode::OptimalModels { n, bound: None } => write!(f, "{} optimal model(s)", n),
            SolveMode::OptimalModels {
                n,
                bound: Some(b),
            } => write!(f, "{} optimal model(s) with score {}", n, b),
            SolveMode::CautiousOptimal { .. } => write!(f, "cautious consequences of optima"),
            SolveMode::BraveOptimal { .. } => write!(f, "brave consequences of optima"),
            SolveMode::SubsetMinimal => write!(f, "subset-minimal models"),
        }
    }
}

/// A model returned by a solver: its shown atoms and its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    atoms: Vec<Term>,
    score: Score,
}

impl Model {
    /// Builds a model.
    pub fn new(atoms: Vec<Term>, score: Score) -> Self {
        Self { atoms, score }
    }

    /// Returns the shown atoms.
    pub fn atoms(&self) -> &[Term] {
        &self.atoms
    }

    /// Returns the atoms with the given name and arity.
    pub fn atoms_of<'a>(
        &'a self,
        name: &'a str,
        arity: usize,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.atoms.iter().filter(move |a| a.is_function(name, arity))
    }

    /// Returns the score of the model.
    pub fn score(&self) -> &Score {
        &self.score
    }
}

/// The result of a solver call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolvingResult {
    /// The models answering the call.
    Satisfiable(Vec<Model>),
    /// The program has no model.
    Unsatisfiable,
    /// The solver gave no answer.
    Unknown,
}

impl SolvingResult {
    /// Returns the models, or an empty list if the program is unsatisfiable.
    ///
    /// # Panics
    ///
    /// If the solving result is set [SolvingResult::Unknown], this function panics.
    pub fn unwrap_models(self) -> Vec<Model> {
        match self {
            SolvingResult::Satisfiable(models) => models,
            SolvingResult::Unsatisfiable => vec![],
            SolvingResult::Unknown => {
                panic!(r#"cannot unwrap solving result when the solver returned "Unknown""#)
            }
        }
    }
}

/// A trait for objects listening to solver calls.
pub trait SolvingListener {
    /// Called before the solver is launched.
    fn solving_start(&self, program: &Program, mode: &SolveMode);

    /// Called when the solver has answered.
    fn solving_end(&self, result: &SolvingResult);
}

/// A trait for answer set solvers.
pub trait AspSolver {
    /// Solves a program.
    ///
    /// Errors are returned when the solver cannot be run or gives an unexpected answer.
    fn solve(&mut self, program: &Program, mode: &SolveMode) -> Result<SolvingResult>;

    /// Adds a listener to the calls of this solver.
    fn add_listener(&mut self, listener: Box<dyn SolvingListener>);
}

/// A trait for objects building solvers.
pub trait AspSolverFactory {
    /// Builds a new solver.
    fn new_solver(&self) -> Box<dyn AspSolver>;
}

/// The name of the solver program used by default.
pub const DEFAULT_SOLVER_PROGRAM: &str = "clingo";

/// A factory building solvers running the `clingo` program found in the execution path.
#[derive(Default)]
pub struct DefaultAspSolverFactory;

impl AspSolverFactory for DefaultAspSolverFactory {
    fn new_solver(&self) -> Box<dyn AspSolver> {
        Box::new(ExternalAspSolver::new(
            DEFAULT_SOLVER_PROGRAM.to_string(),
            vec![],
        ))
    }
}

/// A factory building solvers running an external program.
pub struct ExternalAspSolverFactory {
    program: String,
    options: Vec<String>,
    listener_factories: Vec<Box<dyn Fn() -> Box<dyn SolvingListener>>>,
}

impl ExternalAspSolverFactory {
    /// Builds a new factory for the given program and options.
    pub fn new(program: String, options: Vec<String>) -> Self {
        Self {
            program,
            options,
            listener_factories: vec![],
        }
    }

    /// Adds a function building a listener for each new solver.
    pub fn add_solver_listener(&mut self, listener_factory: Box<dyn Fn() -> Box<dyn SolvingListener>>) {
        self.listener_factories.push(listener_factory);
    }
}

impl AspSolverFactory for ExternalAspSolverFactory {
    fn new_solver(&self) -> Box<dyn AspSolver> {
        let mut solver = ExternalAspSolver::new(self.program.clone(), self.options.clone());
        self.listener_factories
            .iter()
            .for_each(|f| solver.add_listener((f)()));
        Box::new(solver)
    }
}
