use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::str::FromStr;

use json::JsonValue;
use log::warn;
use num_bigint::BigInt;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{FlowError, FlowResult};
use crate::graph::FlowTrace;
use crate::types::edge::EdgeList;
use crate::types::{Capacity, Edge};

#[derive(Debug, Serialize, Deserialize)]
struct NetworkJson {
    nodes: i64,
    edges: Vec<(i64, i64, i64)>,
}

/// Reads `n m` followed by `m` triples `tail head capacity`, all separated
/// by arbitrary whitespace.
pub fn read_edges_text<R: Read>(mut reader: R) -> FlowResult<EdgeList> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    parse_edges_text(&contents)
}

pub fn read_edges_text_file(path: &str) -> FlowResult<EdgeList> {
    read_edges_text(File::open(path)?)
}

pub fn parse_edges_text(contents: &str) -> FlowResult<EdgeList> {
    let integer = integer_pattern();
    let mut tokens = contents.split_whitespace();
    let mut next = |what: &str| -> FlowResult<i64> {
        match tokens.next() {
            Some(token) => parse_integer(&integer, token, what),
            None => Err(FlowError::InvalidInput(format!(
                "Unexpected end of input, expected {what}"
            ))),
        }
    };

    let node_count = to_count(next("node count")?, "node count")?;
    let edge_count = to_count(next("edge count")?, "edge count")?;
    let mut edges = EdgeList::new(node_count, Vec::new());
    for index in 0..edge_count {
        let tail = next(&format!("tail of edge #{index}"))?;
        let head = next(&format!("head of edge #{index}"))?;
        let capacity = next(&format!("capacity of edge #{index}"))?;
        edges.push(edge_from_values(index, tail, head, capacity)?);
    }
    let trailing = tokens.count();
    if trailing > 0 {
        warn!("Ignoring {trailing} tokens after the last edge");
    }
    Ok(edges)
}

/// CSV variant: the node count on the first line, then one
/// `tail,head,capacity` record per line.
pub fn read_edges_csv(path: &str) -> FlowResult<EdgeList> {
    let f = BufReader::new(File::open(path)?);
    parse_edges_csv(f)
}

pub fn parse_edges_csv<R: BufRead>(reader: R) -> FlowResult<EdgeList> {
    let integer = integer_pattern();
    let mut edges: Option<EdgeList> = None;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.trim().split(',').map(|f| unescape(f.trim())).collect();
        if edges.is_none() {
            match &fields[..] {
                [nodes] => {
                    let node_count = parse_integer(&integer, nodes, "node count")?;
                    let node_count = to_count(node_count, "node count")?;
                    edges = Some(EdgeList::new(node_count, Vec::new()));
                }
                _ => {
                    return Err(FlowError::InvalidInput(format!(
                        "Expected the node count, but got {line}"
                    )))
                }
            }
            continue;
        }
        match (&fields[..], edges.as_mut()) {
            ([tail, head, capacity], Some(edges)) => {
                let index = edges.edge_count();
                let tail = parse_integer(&integer, tail, "tail")?;
                let head = parse_integer(&integer, head, "head")?;
                let capacity = parse_integer(&integer, capacity, "capacity")?;
                edges.push(edge_from_values(index, tail, head, capacity)?);
            }
            _ => {
                return Err(FlowError::InvalidInput(format!(
                    "Expected tail,head,capacity, but got {line}"
                )))
            }
        }
    }
    edges.ok_or_else(|| FlowError::InvalidInput("Empty CSV input".to_string()))
}

/// JSON variant: `{"nodes": n, "edges": [[tail, head, capacity], ...]}`.
pub fn read_edges_json(path: &str) -> FlowResult<EdgeList> {
    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;
    parse_edges_json(&contents)
}

pub fn parse_edges_json(contents: &str) -> FlowResult<EdgeList> {
    let network: NetworkJson = serde_json::from_str(contents)
        .map_err(|e| FlowError::InvalidInput(format!("Invalid network JSON: {e}")))?;
    let mut edges = EdgeList::new(to_count(network.nodes, "node count")?, Vec::new());
    for (index, (tail, head, capacity)) in network.edges.into_iter().enumerate() {
        edges.push(edge_from_values(index, tail, head, capacity)?);
    }
    Ok(edges)
}

pub fn write_edges_text<W: Write>(edges: &EdgeList, mut out: W) -> FlowResult<()> {
    writeln!(out, "{} {}", edges.node_count(), edges.edge_count())?;
    for Edge {
        tail,
        head,
        capacity,
    } in edges.edges()
    {
        writeln!(out, "{tail} {head} {capacity}")?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_edges_csv<W: Write>(edges: &EdgeList, mut out: W) -> FlowResult<()> {
    writeln!(out, "{}", edges.node_count())?;
    for Edge {
        tail,
        head,
        capacity,
    } in edges.edges()
    {
        writeln!(out, "{tail},{head},{capacity}")?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_edges_json<W: Write>(edges: &EdgeList, mut out: W) -> FlowResult<()> {
    let network = NetworkJson {
        nodes: edges.node_count() as i64,
        edges: edges
            .edges()
            .iter()
            .map(|e| (e.tail as i64, e.head as i64, e.capacity))
            .collect(),
    };
    serde_json::to_writer(&mut out, &network)
        .map_err(|e| FlowError::InvalidInput(format!("Could not serialize network: {e}")))?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Human readable report: the threshold of every level, the paths found
/// there, the number of paths and the final value.
pub fn format_trace(trace: &FlowTrace, value: Capacity) -> String {
    let mut result = String::new();
    for level in trace.levels() {
        result += &format!("Scaling parameter: {}\n", level.delta);
        for path in &level.paths {
            let nodes = path
                .nodes
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            result += &format!("  {nodes} adds {} incremental flow\n", path.increment);
        }
        result += &format!("Augmenting paths: {}\n", level.paths.len());
    }
    result += &format!("Total augmenting paths: {}\n", trace.path_count());
    result += &format!("Max flow for the network: {value}\n");
    result
}

pub fn trace_to_json(trace: &FlowTrace, value: Capacity) -> JsonValue {
    json::object! {
        maxFlowValue: value.to_string(),
        augmentingPaths: trace.path_count(),
        levels: trace.levels().iter().map(|level| json::object! {
            delta: level.delta,
            flow: level.flow,
            paths: level.paths.iter().map(|path| json::object! {
                nodes: path.nodes.clone(),
                increment: path.increment,
            }).collect::<Vec<_>>(),
        }).collect::<Vec<_>>(),
    }
}

fn integer_pattern() -> Regex {
    Regex::new(r"^-?[0-9]+$").unwrap()
}

fn parse_integer(pattern: &Regex, token: &str, what: &str) -> FlowResult<i64> {
    if !pattern.is_match(token) {
        return Err(FlowError::InvalidInput(format!(
            "Expected an integer for {what}, but got {token:?}"
        )));
    }
    let value = BigInt::from_str(token).map_err(|e| {
        FlowError::InvalidInput(format!("Couldn't parse {what} {token:?}: {e}"))
    })?;
    i64::try_from(&value).map_err(|_| {
        FlowError::InvalidInput(format!("Value {value} for {what} is out of range"))
    })
}

fn to_count(value: i64, what: &str) -> FlowResult<usize> {
    usize::try_from(value).map_err(|_| {
        FlowError::InvalidInput(format!("The {what} must not be negative, got {value}"))
    })
}

/// Node bounds are left to the graph builder, only negative node ids are
/// rejected here because they cannot be represented.
fn edge_from_values(index: usize, tail: i64, head: i64, capacity: Capacity) -> FlowResult<Edge> {
    match (usize::try_from(tail), usize::try_from(head)) {
        (Ok(tail), Ok(head)) => Ok(Edge::new(tail, head, capacity)),
        _ => Err(FlowError::InvalidInput(format!(
            "Invalid edge #{index} ({tail}, {head}, {capacity}): negative node"
        ))),
    }
}

fn unescape(input: &str) -> &str {
    let quoted = input.len() >= 2 && input.chars().last() == input.chars().next();
    match input.chars().next() {
        Some('"') | Some('\'') if quoted => &input[1..input.len() - 1],
        _ => input,
    }
}
