//! Consistency and repair queries, and the objects they return.

mod contradiction;
pub use contradiction::Contradiction;
pub use contradiction::ContradictionKind;

mod labeling;
pub use labeling::Labeling;
pub use labeling::NodeSign;

mod mic;
pub use mic::remove_duplicate_mics;
pub use mic::Mic;

mod prediction;
pub use prediction::Prediction;
pub use prediction::PredictionMode;
pub use prediction::PredictionStatistics;
pub use prediction::Predictions;

mod query_engine;
pub use query_engine::QueryEngine;

mod repair_op;
pub use repair_op::FlipDirection;
pub use repair_op::RepairOp;
pub use repair_op::RepairSet;
