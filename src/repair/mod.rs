//! The greedy search for edge additions repairing a network under the elementary path semantics.

mod edit_set;
pub use edit_set::Edit;
pub use edit_set::EditSet;

mod greedy_search;
pub use greedy_search::Candidate;
pub use greedy_search::GreedyRepairResult;
pub use greedy_search::GreedyRepairSearch;
pub use greedy_search::RepairOracle;

mod solver_oracle;
pub use solver_oracle::SolverRepairOracle;
