//! Answer set solver interfaces used to evaluate rule modules on instances.

mod asp_solver;
pub use asp_solver::AspSolver;
pub use asp_solver::AspSolverFactory;
pub use asp_solver::DefaultAspSolverFactory;
pub use asp_solver::ExternalAspSolverFactory;
pub use asp_solver::Model;
pub use asp_solver::SolveMode;
pub use asp_solver::SolvingListener;
pub use asp_solver::SolvingResult;
pub use asp_solver::DEFAULT_SOLVER_PROGRAM;

mod clingo_output;

mod external_asp_solver;
pub use external_asp_solver::ExternalAspSolver;

mod program;
pub use program::Program;

mod score;
pub use score::Score;

mod term;
pub use term::Term;

#[cfg(test)]
pub(crate) mod mock_solver;
