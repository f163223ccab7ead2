//! The data model: influence graphs, observation profiles and their canonical facts.

mod fact;
pub use fact::Fact;

mod fact_set;
pub use fact_set::FactSet;
pub use fact_set::Instance;

mod network;
pub use network::Network;
pub use network::NetworkStatistics;

mod node_id;
pub use node_id::NodeId;

mod profile;
pub use profile::ObservationStatistics;
pub use profile::Profile;

mod sign;
pub use sign::Behavior;
pub use sign::EdgeSign;
pub use sign::Observation;
