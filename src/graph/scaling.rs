use log::{debug, info, trace};

use crate::error::{FlowError, FlowResult};
use crate::graph::augment::augment;
use crate::graph::augmenting_path::augmenting_path;
use crate::graph::network::ResidualNetwork;
use crate::graph::trace::FlowTrace;
use crate::types::{Capacity, Node};

/// What happens to the flow between two scaling levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScalingMode {
    /// Every level starts from zero flow and the value of the last level
    /// (delta = 1) is reported. Matches the established output traces.
    #[default]
    ResetEachLevel,
    /// Classic capacity scaling: flow found at a level is kept and later
    /// levels only add to it.
    CarryOver,
}

// The builder bounds the capacity leaving the source, so this is a bug.
fn flow_overflow() -> FlowError {
    FlowError::InternalInvariant("flow value overflows".to_string())
}

/// Largest power of two not above `max_capacity`, or 0 if there is no
/// positive capacity at all.
pub fn initial_delta(max_capacity: Capacity) -> Capacity {
    if max_capacity <= 0 {
        0
    } else {
        1 << (63 - max_capacity.leading_zeros())
    }
}

/// Runs the scaling loop on `network` and returns the maximum flow value.
///
/// `max_capacity` is the largest input capacity as seen by the builder.
/// When `recorder` is given, every level and every augmenting path is
/// appended to it.
pub fn compute_max_flow(
    network: &mut ResidualNetwork,
    max_capacity: Capacity,
    source: Node,
    sink: Node,
    mode: ScalingMode,
    mut recorder: Option<&mut FlowTrace>,
) -> FlowResult<Capacity> {
    let mut delta = initial_delta(max_capacity);
    if delta == 0 || source == sink {
        info!("Max flow: 0 (no capacity between {source} and {sink})");
        return Ok(0);
    }

    let mut value: Capacity = 0;
    let mut searches = 0usize;
    while delta >= 1 {
        debug!("Scaling parameter: {delta}");
        if mode == ScalingMode::ResetEachLevel {
            network.reset_flow();
        }
        if let Some(recorder) = recorder.as_deref_mut() {
            recorder.start_level(delta);
        }

        let mut level_flow: Capacity = 0;
        while let Some(path) = augmenting_path(network, source, sink, delta)? {
            let increment = augment(network, &path);
            searches += 1;
            level_flow = level_flow
                .checked_add(increment)
                .ok_or_else(flow_overflow)?;
            let nodes = path.nodes(network);
            trace!("Augmenting path {nodes:?} adds {increment}");
            if let Some(recorder) = recorder.as_deref_mut() {
                recorder.record_path(nodes, increment);
            }
        }
        searches += 1;

        value = match mode {
            ScalingMode::ResetEachLevel => level_flow,
            ScalingMode::CarryOver => value
                .checked_add(level_flow)
                .ok_or_else(flow_overflow)?,
        };
        debug!("Flow after level {delta}: {value}");
        delta /= 2;
    }

    info!("Max flow: {value} ({searches} path searches)");
    Ok(value)
}
