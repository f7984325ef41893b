use log::debug;

use crate::error::{FlowError, FlowResult};
use crate::graph::network::ResidualNetwork;
use crate::types::{Arc, Capacity, Edge};

/// Largest capacity a merged arc may carry. A back arc can hold up to twice
/// its capacity as residual, which has to stay representable.
pub const MAX_ARC_CAPACITY: Capacity = Capacity::MAX / 2;

/// Result of building: the network and the largest single input capacity,
/// which seeds the scaling threshold.
#[derive(Debug, Clone)]
pub struct BuiltNetwork {
    pub network: ResidualNetwork,
    pub max_capacity: Capacity,
}

/// Builds the residual network for `node_count` nodes from raw input triples.
///
/// Every edge (u, v, c) becomes the arc pair (u -> v, c) and (v -> u, c).
/// Arcs sharing (tail, head) are merged by summing their capacities before
/// the inverse links and adjacency ranges are computed.
pub fn build_network(node_count: usize, edges: &[Edge]) -> FlowResult<BuiltNetwork> {
    if node_count == 0 {
        return Err(FlowError::InvalidInput(
            "a network needs at least one node".to_string(),
        ));
    }

    let mut arcs: Vec<Arc> = Vec::new();
    arcs.try_reserve_exact(edges.len().saturating_mul(2))
        .map_err(|source| FlowError::Allocation {
            what: "arc table",
            source,
        })?;

    let mut max_capacity: Capacity = 0;
    for (index, edge) in edges.iter().enumerate() {
        validate_edge(node_count, index, edge)?;
        arcs.push(Arc::new(edge.tail, edge.head, edge.capacity));
        arcs.push(Arc::new(edge.head, edge.tail, edge.capacity));
        max_capacity = max_capacity.max(edge.capacity);
    }

    arcs.sort_by_key(Arc::key);
    let mut arcs = merge_parallel_arcs(arcs)?;
    check_capacity_bounds(&arcs)?;
    link_inverses(&mut arcs)?;
    let first_arc = adjacency_ranges(node_count, &arcs)?;

    let network = ResidualNetwork::from_parts(arcs, first_arc);
    debug!(
        "Built residual network: {} nodes, {} input edges, {} arcs, max capacity {}",
        node_count,
        edges.len(),
        network.arc_count(),
        max_capacity
    );

    Ok(BuiltNetwork {
        network,
        max_capacity,
    })
}

fn validate_edge(node_count: usize, index: usize, edge: &Edge) -> FlowResult<()> {
    let reason = if edge.tail >= node_count {
        Some(format!("tail must be in [0, {}]", node_count - 1))
    } else if edge.head == 0 || edge.head >= node_count {
        // The source never receives flow through an input edge.
        Some(format!("head must be in [1, {}]", node_count - 1))
    } else if edge.capacity < 0 {
        Some("capacity must not be negative".to_string())
    } else {
        None
    };
    match reason {
        Some(reason) => Err(FlowError::InvalidEdge {
            index,
            tail: edge.tail,
            head: edge.head,
            capacity: edge.capacity,
            reason,
        }),
        None => Ok(()),
    }
}

/// Collapses runs of arcs with equal (tail, head) in a sorted table.
fn merge_parallel_arcs(sorted: Vec<Arc>) -> FlowResult<Vec<Arc>> {
    let mut merged: Vec<Arc> = Vec::new();
    merged
        .try_reserve_exact(sorted.len())
        .map_err(|source| FlowError::Allocation {
            what: "merged arc table",
            source,
        })?;
    for arc in sorted {
        match merged.last_mut() {
            Some(last) if last.key() == arc.key() => {
                last.capacity = last.capacity.checked_add(arc.capacity).ok_or_else(|| {
                    FlowError::InvalidInput(format!(
                        "total capacity of parallel edges {} -> {} overflows",
                        arc.tail, arc.head
                    ))
                })?;
            }
            _ => merged.push(arc),
        }
    }
    Ok(merged)
}

/// Every flow value is bounded by the total capacity leaving node 0, and
/// every residual by twice the arc capacity. Both must fit in `Capacity`.
fn check_capacity_bounds(arcs: &[Arc]) -> FlowResult<()> {
    if let Some(arc) = arcs.iter().find(|arc| arc.capacity > MAX_ARC_CAPACITY) {
        return Err(FlowError::InvalidInput(format!(
            "capacity {} of {} -> {} exceeds the maximum of {}",
            arc.capacity, arc.tail, arc.head, MAX_ARC_CAPACITY
        )));
    }
    arcs.iter()
        .take_while(|arc| arc.tail == 0)
        .try_fold(0 as Capacity, |sum, arc| sum.checked_add(arc.capacity))
        .map(|_| ())
        .ok_or_else(|| {
            FlowError::InvalidInput("total capacity leaving the source overflows".to_string())
        })
}

fn link_inverses(arcs: &mut [Arc]) -> FlowResult<()> {
    for i in 0..arcs.len() {
        let (tail, head) = arcs[i].key();
        match arcs.binary_search_by_key(&(head, tail), Arc::key) {
            Ok(inverse) => arcs[i].inverse = inverse,
            Err(_) => {
                return Err(FlowError::InternalInvariant(format!(
                    "no reverse arc for {tail} -> {head}"
                )))
            }
        }
    }
    Ok(())
}

fn adjacency_ranges(node_count: usize, arcs: &[Arc]) -> FlowResult<Vec<usize>> {
    let mut first_arc: Vec<usize> = Vec::new();
    first_arc
        .try_reserve_exact(node_count + 1)
        .map_err(|source| FlowError::Allocation {
            what: "adjacency index",
            source,
        })?;
    let mut next = 0;
    for node in 0..node_count {
        first_arc.push(next);
        while next < arcs.len() && arcs[next].tail == node {
            next += 1;
        }
    }
    if next != arcs.len() {
        return Err(FlowError::InternalInvariant(format!(
            "arc table is not grouped by tail (stopped at arc {next} of {})",
            arcs.len()
        )));
    }
    first_arc.push(arcs.len());
    Ok(first_arc)
}
