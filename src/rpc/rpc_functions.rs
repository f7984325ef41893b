use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use json::JsonValue;
use num_bigint::BigInt;

use crate::graph;
use crate::graph::ScalingMode;
use crate::io::trace_to_json;
use crate::rpc::call_context::CallContext;
use crate::types::edge::EdgeList;
use crate::types::Edge;

pub struct JsonRpcRequest {
    pub id: JsonValue,
    pub method: String,
    pub params: JsonValue,
}

pub struct InputValidationError(String);

impl Error for InputValidationError {}

impl Debug for InputValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}", self.0)
    }
}

impl Display for InputValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}", self.0)
    }
}

/// `compute_max_flow` with params
/// `{nodes, edges: [[tail, head, capacity], ...], carry_over?, trace?}`.
pub fn compute_max_flow(
    request: &JsonRpcRequest,
    call_context: &CallContext,
) -> Result<JsonValue, Box<dyn Error>> {
    let edges = parse_network(&request.params)?;
    call_context.log_message(&format!(
        "{} nodes, {} edges",
        edges.node_count(),
        edges.edge_count()
    ));

    let mode = if request.params["carry_over"].as_bool().unwrap_or_default() {
        ScalingMode::CarryOver
    } else {
        ScalingMode::ResetEachLevel
    };

    let outcome = graph::compute_flow(&edges, mode)?;
    call_context.log_message(&format!(
        "Computed max flow ({:?}): {}",
        mode, outcome.value
    ));

    if request.params["trace"].as_bool().unwrap_or_default() {
        Ok(trace_to_json(&outcome.trace, outcome.value))
    } else {
        Ok(json::object! {
            maxFlowValue: outcome.value.to_string(),
            augmentingPaths: outcome.trace.path_count(),
        })
    }
}

fn parse_network(params: &JsonValue) -> Result<EdgeList, Box<dyn Error>> {
    let node_count = params["nodes"].as_usize().ok_or_else(|| {
        InputValidationError(format!("Invalid node count: {}", params["nodes"]))
    })?;
    if !params["edges"].is_array() {
        return Err(Box::new(InputValidationError(
            "Expected edges as an array of [tail, head, capacity]".to_string(),
        )));
    }
    let mut edges = EdgeList::new(node_count, Vec::new());
    for (index, entry) in params["edges"].members().enumerate() {
        if !entry.is_array() || entry.len() != 3 {
            return Err(Box::new(InputValidationError(format!(
                "Edge #{index} is not a [tail, head, capacity] triple: {entry}"
            ))));
        }
        let tail = validate_and_parse_node(&entry[0])?;
        let head = validate_and_parse_node(&entry[1])?;
        let capacity = validate_and_parse_i64(&entry[2])?;
        edges.push(Edge::new(tail, head, capacity));
    }
    Ok(edges)
}

fn validate_and_parse_node(value: &JsonValue) -> Result<usize, Box<dyn Error>> {
    let node = validate_and_parse_i64(value)?;
    usize::try_from(node)
        .map_err(|_| From::from(InputValidationError(format!("Invalid node: {node}"))))
}

/// Accepts JSON numbers and decimal strings, the latter for values that do
/// not survive a round trip through a JSON number.
fn validate_and_parse_i64(value: &JsonValue) -> Result<i64, Box<dyn Error>> {
    if let Some(number) = value.as_i64() {
        return Ok(number);
    }
    let value_str = match value.as_str() {
        Some(value_str) => value_str,
        None => {
            return Err(Box::new(InputValidationError(format!(
                "Invalid value: {value}"
            ))))
        }
    };
    match BigInt::from_str(value_str) {
        Ok(parsed_value) => i64::try_from(&parsed_value).map_err(|_| {
            From::from(InputValidationError(format!(
                "Value {} is out of range. Maximum value is {}.",
                parsed_value,
                i64::MAX
            )))
        }),
        Err(e) => Err(Box::new(InputValidationError(format!(
            "Invalid value: {}. Couldn't parse value: {}",
            value_str, e
        )))),
    }
}
