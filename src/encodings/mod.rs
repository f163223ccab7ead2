//! Rule modules and the configurator selecting them from the consistency semantics.

mod config;
pub use config::modules_for;
pub use config::greedy_repair_modules_for;
pub use config::repair_modules_for;
pub use config::ConsistencyConfig;
pub use config::Objective;
pub use config::RepairMode;
pub use config::Setting;

mod module;
pub use module::Module;
pub use module::EDGE_ADDITION_WEIGHT;

mod programs;
