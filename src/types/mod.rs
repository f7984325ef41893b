pub mod arc;
pub mod edge;

pub use arc::Arc;
pub use edge::Edge;

/// Capacity and flow values. Capacities are never negative, flows may be.
pub type Capacity = i64;

/// Node identifier in `[0, node_count)`.
pub type Node = usize;
