use crate::types::{Capacity, Node};

/// One augmentation: the nodes from source to sink and the amount pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRecord {
    pub nodes: Vec<Node>,
    pub increment: Capacity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRecord {
    pub delta: Capacity,
    pub paths: Vec<PathRecord>,
    /// Sum of the increments found at this level.
    pub flow: Capacity,
}

/// Records what the scaling driver did, level by level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowTrace {
    levels: Vec<LevelRecord>,
}

impl FlowTrace {
    pub fn new() -> Self {
        FlowTrace::default()
    }

    pub fn start_level(&mut self, delta: Capacity) {
        self.levels.push(LevelRecord {
            delta,
            paths: Vec::new(),
            flow: 0,
        });
    }

    /// Adds a path to the level started last. Paths recorded before any
    /// level was started open a level with delta 0.
    pub fn record_path(&mut self, nodes: Vec<Node>, increment: Capacity) {
        if self.levels.is_empty() {
            self.start_level(0);
        }
        if let Some(level) = self.levels.last_mut() {
            level.flow += increment;
            level.paths.push(PathRecord { nodes, increment });
        }
    }

    pub fn levels(&self) -> &[LevelRecord] {
        &self.levels
    }

    pub fn path_count(&self) -> usize {
        self.levels.iter().map(|level| level.paths.len()).sum()
    }

    pub fn deltas(&self) -> Vec<Capacity> {
        self.levels.iter().map(|level| level.delta).collect()
    }
}
