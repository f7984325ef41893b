use std::ops::Range;

use crate::types::{Arc, Capacity, Node};

/// Residual network: arcs sorted by (tail, head), each linked to its
/// inverse, plus the half-open range of outgoing arcs per node.
///
/// The structure is fixed after construction, only arc flows change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidualNetwork {
    arcs: Vec<Arc>,
    // first_arc[u]..first_arc[u + 1] are the arcs with tail u.
    first_arc: Vec<usize>,
}

impl ResidualNetwork {
    pub(crate) fn from_parts(arcs: Vec<Arc>, first_arc: Vec<usize>) -> ResidualNetwork {
        debug_assert_eq!(first_arc.last().copied(), Some(arcs.len()));
        ResidualNetwork { arcs, first_arc }
    }

    pub fn node_count(&self) -> usize {
        self.first_arc.len() - 1
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    pub fn arc(&self, index: usize) -> &Arc {
        &self.arcs[index]
    }

    pub fn outgoing_range(&self, node: Node) -> Range<usize> {
        self.first_arc[node]..self.first_arc[node + 1]
    }

    pub fn outgoing(&self, node: Node) -> impl Iterator<Item = (usize, &Arc)> {
        let range = self.outgoing_range(node);
        let start = range.start;
        self.arcs[range]
            .iter()
            .enumerate()
            .map(move |(offset, arc)| (start + offset, arc))
    }

    /// Moves `amount` units along `index` and cancels them on its inverse.
    pub fn push_flow(&mut self, index: usize, amount: Capacity) {
        let inverse = self.arcs[index].inverse;
        self.arcs[index].flow += amount;
        self.arcs[inverse].flow -= amount;
    }

    pub fn reset_flow(&mut self) {
        for arc in &mut self.arcs {
            arc.flow = 0;
        }
    }

    /// Net flow leaving `node` over all of its arcs.
    pub fn net_outflow(&self, node: Node) -> Capacity {
        self.outgoing(node).map(|(_, arc)| arc.flow).sum()
    }

    /// Checks skew symmetry, inverse involution and residual
    /// non-negativity. Returns a description of the first violation.
    pub fn check_invariants(&self) -> Result<(), String> {
        for (i, arc) in self.arcs.iter().enumerate() {
            let inverse = self
                .arcs
                .get(arc.inverse)
                .ok_or_else(|| format!("arc {i} has dangling inverse {}", arc.inverse))?;
            if inverse.inverse != i {
                return Err(format!("inverse of inverse of arc {i} is {}", inverse.inverse));
            }
            if inverse.tail != arc.head || inverse.head != arc.tail {
                return Err(format!("arc {i} is not paired with its reverse"));
            }
            if arc.flow != -inverse.flow {
                return Err(format!(
                    "skew symmetry broken on arc {i}: {} vs {}",
                    arc.flow, inverse.flow
                ));
            }
            if arc.residual() < 0 {
                return Err(format!("negative residual capacity on arc {i}"));
            }
        }
        Ok(())
    }
}
