use crate::types::{Capacity, Node};

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Ord, PartialOrd)]
pub struct Edge {
    pub tail: Node,
    pub head: Node,
    pub capacity: Capacity,
}

impl Edge {
    pub fn new(tail: Node, head: Node, capacity: Capacity) -> Edge {
        Edge {
            tail,
            head,
            capacity,
        }
    }
}

impl From<(Node, Node, Capacity)> for Edge {
    fn from((tail, head, capacity): (Node, Node, Capacity)) -> Self {
        Edge::new(tail, head, capacity)
    }
}

/// A raw network as handed over by the readers: node count plus the
/// unvalidated edge triples in input order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EdgeList {
    node_count: usize,
    edges: Vec<Edge>,
}

impl EdgeList {
    pub fn new(node_count: usize, edges: Vec<Edge>) -> EdgeList {
        EdgeList { node_count, edges }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &Vec<Edge> {
        &self.edges
    }

    pub fn push(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn source(&self) -> Node {
        0
    }

    /// Last node, saturating at 0 for the degenerate empty network.
    pub fn sink(&self) -> Node {
        self.node_count.saturating_sub(1)
    }
}
