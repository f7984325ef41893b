use crate::types::{Capacity, Node};

/// One direction of a capacitated edge inside the residual network.
/// `inverse` is the index of the opposite arc in the same arc table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Arc {
    pub tail: Node,
    pub head: Node,
    pub capacity: Capacity,
    pub flow: Capacity,
    pub inverse: usize,
}

impl Arc {
    pub fn new(tail: Node, head: Node, capacity: Capacity) -> Arc {
        Arc {
            tail,
            head,
            capacity,
            flow: 0,
            inverse: usize::MAX,
        }
    }

    pub fn residual(&self) -> Capacity {
        self.capacity - self.flow
    }

    pub fn key(&self) -> (Node, Node) {
        (self.tail, self.head)
    }
}
