use log::info;

use crate::error::FlowResult;
use crate::graph::builder::build_network;
use crate::graph::network::ResidualNetwork;
use crate::graph::scaling::{compute_max_flow, ScalingMode};
use crate::graph::trace::FlowTrace;
use crate::types::edge::EdgeList;
use crate::types::Capacity;

#[derive(Debug, Clone)]
pub struct FlowOutcome {
    pub value: Capacity,
    pub trace: FlowTrace,
    /// Final state of the residual network, flows included.
    pub network: ResidualNetwork,
}

/// Builds the residual network for `edges` and computes the maximum flow
/// from node 0 to the last node.
pub fn compute_flow(edges: &EdgeList, mode: ScalingMode) -> FlowResult<FlowOutcome> {
    let built = build_network(edges.node_count(), edges.edges())?;
    let mut network = built.network;
    let mut trace = FlowTrace::new();
    let value = compute_max_flow(
        &mut network,
        built.max_capacity,
        edges.source(),
        edges.sink(),
        mode,
        Some(&mut trace),
    )?;
    info!(
        "Computed flow {} -> {}: {} using {} augmenting paths",
        edges.source(),
        edges.sink(),
        value,
        trace.path_count()
    );
    Ok(FlowOutcome {
        value,
        trace,
        network,
    })
}
