// resource allocation graphs: processes request resources, resources are assigned to processes
// the graph is checked two ways
// cycle search over requests and assignments, single-instance semantics
// Banker's safety algorithm over the derived allocation, max and need matrices

pub mod banker;
pub mod detector;
pub mod matrices;
pub mod node;
pub mod simulator;
pub mod store;
pub mod validation;

pub use banker::{Safety, SafetyReport, find_safe_sequence};
pub use detector::{DeadlockReport, find_cycle};
pub use matrices::MatrixSet;
pub use node::{Edge, EdgeKind, Node, NodeData, NodeId, NodeKind};
pub use simulator::{Simulator, SimulatorError};
pub use store::ResourceGraph;
pub use validation::{NamingRules, ValidationError};
