pub mod augment;
pub mod augmenting_path;
pub mod builder;
pub mod flow;
pub mod network;
pub mod scaling;
pub mod trace;


pub use crate::graph::augment::augment;
pub use crate::graph::augmenting_path::{augmenting_path, AugmentingPath};
pub use crate::graph::builder::{build_network, BuiltNetwork};
pub use crate::graph::flow::{compute_flow, FlowOutcome};
pub use crate::graph::network::ResidualNetwork;
pub use crate::graph::scaling::{compute_max_flow, initial_delta, ScalingMode};
pub use crate::graph::trace::{FlowTrace, LevelRecord, PathRecord};
