//! Objects used to read influence graphs and observation profiles.

mod network_reader;
pub use network_reader::NetworkReader;

mod profile_reader;
pub use profile_reader::ProfileReader;

mod specs;
pub use specs::InstanceReader;
pub use specs::WarningHandler;

mod warning_result;
pub use warning_result::WarningResult;
