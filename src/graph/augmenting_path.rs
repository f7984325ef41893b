use std::collections::VecDeque;

use crate::error::{FlowError, FlowResult};
use crate::graph::network::ResidualNetwork;
use crate::types::{Capacity, Node};

/// Arcs of an augmenting path, listed from the sink back to the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentingPath {
    arcs: Vec<usize>,
}

impl AugmentingPath {
    pub fn arcs(&self) -> &[usize] {
        &self.arcs
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Nodes visited by the path, from source to sink.
    pub fn nodes(&self, network: &ResidualNetwork) -> Vec<Node> {
        let mut nodes: Vec<Node> = self
            .arcs
            .iter()
            .map(|index| network.arc(*index).head)
            .collect();
        if let Some(last) = self.arcs.last() {
            nodes.push(network.arc(*last).tail);
        }
        nodes.reverse();
        nodes
    }
}

/// Breadth-first search from `source` to `sink` over arcs that still have
/// residual capacity and whose original capacity is at least `delta`.
///
/// Outgoing arcs are scanned in (tail, head) order and a node is claimed by
/// the first arc that reaches it, so the path found is deterministic.
/// The search stops as soon as the sink is taken off the queue.
pub fn augmenting_path(
    network: &ResidualNetwork,
    source: Node,
    sink: Node,
    delta: Capacity,
) -> FlowResult<Option<AugmentingPath>> {
    let node_count = network.node_count();
    if source >= node_count || sink >= node_count {
        return Err(FlowError::InvalidInput(format!(
            "source {source} or sink {sink} outside of [0, {node_count})"
        )));
    }

    let mut discovered = filled(node_count, false, "discovery marks")?;
    let mut parent_arc: Vec<Option<usize>> = filled(node_count, None, "predecessor arcs")?;
    let mut queue = VecDeque::new();
    queue
        .try_reserve(node_count)
        .map_err(|source| FlowError::Allocation {
            what: "search queue",
            source,
        })?;

    discovered[source] = true;
    queue.push_back(source);
    while let Some(node) = queue.pop_front() {
        if node == sink {
            return Ok(Some(trace(network, &parent_arc, sink)));
        }
        for (index, arc) in network.outgoing(node) {
            if !discovered[arc.head] && arc.residual() > 0 && arc.capacity >= delta {
                discovered[arc.head] = true;
                parent_arc[arc.head] = Some(index);
                queue.push_back(arc.head);
            }
        }
    }
    Ok(None)
}

fn trace(network: &ResidualNetwork, parent_arc: &[Option<usize>], sink: Node) -> AugmentingPath {
    let mut arcs = vec![];
    let mut node = sink;
    // Only the source has no parent arc.
    while let Some(index) = parent_arc[node] {
        arcs.push(index);
        node = network.arc(index).tail;
    }
    AugmentingPath { arcs }
}

fn filled<T: Clone>(len: usize, value: T, what: &'static str) -> FlowResult<Vec<T>> {
    let mut result = Vec::new();
    result
        .try_reserve_exact(len)
        .map_err(|source| FlowError::Allocation { what, source })?;
    result.resize(len, value);
    Ok(result)
}
