use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

use crate::types::{Capacity, Node};

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid edge #{index} ({tail}, {head}, {capacity}): {reason}")]
    InvalidEdge {
        index: usize,
        tail: Node,
        head: Node,
        capacity: Capacity,
        reason: String,
    },

    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),

    #[error("Allocation failed for {what}: {source}")]
    Allocation {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FlowError {
    /// Input errors abort before any flow work and are the caller's fault.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            FlowError::InvalidInput(_) | FlowError::InvalidEdge { .. } | FlowError::Io(_)
        )
    }
}

pub type FlowResult<T> = Result<T, FlowError>;
