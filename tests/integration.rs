use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use capflow::error::FlowError;
use capflow::graph::{compute_flow, FlowOutcome, ScalingMode};
use capflow::io::{
    format_trace, parse_edges_csv, parse_edges_json, parse_edges_text, read_edges_text,
    trace_to_json, write_edges_csv, write_edges_json,
};
use capflow::rpc::rpc_handler::{jsonrpc_serialize_response, parse_request, MAX_PAYLOAD_SIZE};
use capflow::server::serve;
use capflow::types::Capacity;
use json::JsonValue;

fn flow_of(input: &str) -> Capacity {
    compute(input, ScalingMode::default()).value
}

fn compute(input: &str, mode: ScalingMode) -> FlowOutcome {
    let edges = parse_edges_text(input).unwrap();
    compute_flow(&edges, mode).unwrap()
}

#[test]
fn test_scenarios_from_text() {
    assert_eq!(flow_of("2 1\n0 1 7\n"), 7);
    assert_eq!(flow_of("4 4\n0 1 10\n0 2 10\n1 3 10\n2 3 10\n"), 20);
    assert_eq!(flow_of("3 2\n0 1 5\n1 2 3\n"), 3);
    assert_eq!(flow_of("3 3\n0 1 3\n0 1 4\n1 2 10\n"), 7);
    // Tokens may be spread over lines arbitrarily.
    assert_eq!(flow_of("3\n3 0 1\n3 0\n1 4 1 2\n10"), 7);
}

#[test]
fn test_read_from_reader() {
    let edges = read_edges_text("4 4 0 1 10 0 2 10 1 3 10 2 3 10".as_bytes()).unwrap();
    assert_eq!(edges.node_count(), 4);
    assert_eq!(edges.edge_count(), 4);
    assert_eq!(compute_flow(&edges, ScalingMode::CarryOver).unwrap().value, 20);
}

#[test]
fn test_invalid_input() {
    let edges = parse_edges_text("3 1\n1 0 5\n").unwrap();
    let err = compute_flow(&edges, ScalingMode::default()).unwrap_err();
    assert!(matches!(err, FlowError::InvalidEdge { head: 0, .. }));
    assert!(err.is_input_error());

    for input in [
        "3 2\n0 1 5\n",
        "3 1\n0 1 x\n",
        "3 1\n0 1 99999999999999999999999\n",
        "-3 0\n",
        "3 1\n-1 2 5\n",
        "",
    ] {
        match parse_edges_text(input) {
            Err(FlowError::InvalidInput(_)) => {}
            other => panic!("expected invalid input for {input:?}, got {other:?}"),
        }
    }

    let edges = parse_edges_text("3 1\n0 2 -4\n").unwrap();
    assert!(matches!(
        compute_flow(&edges, ScalingMode::default()),
        Err(FlowError::InvalidEdge { capacity: -4, .. })
    ));
}

#[test]
fn test_largest_i64_capacity_is_rejected() {
    let edges = parse_edges_text("3 2\n0 1 9223372036854775807\n1 2 1\n").unwrap();
    let err = compute_flow(&edges, ScalingMode::default()).unwrap_err();
    assert!(matches!(err, FlowError::InvalidInput(_)));
    assert!(err.is_input_error());

    let edges = parse_edges_text("3 2\n0 1 4611686018427387903\n1 2 1\n").unwrap();
    assert_eq!(compute_flow(&edges, ScalingMode::default()).unwrap().value, 1);
}

#[test]
fn test_trace_output() {
    let outcome = compute("2 1\n0 1 7\n", ScalingMode::ResetEachLevel);
    let expected = "Scaling parameter: 4\n  0 -> 1 adds 7 incremental flow\nAugmenting paths: 1\n\
                    Scaling parameter: 2\n  0 -> 1 adds 7 incremental flow\nAugmenting paths: 1\n\
                    Scaling parameter: 1\n  0 -> 1 adds 7 incremental flow\nAugmenting paths: 1\n\
                    Total augmenting paths: 3\nMax flow for the network: 7\n";
    assert_eq!(format_trace(&outcome.trace, outcome.value), expected);

    let outcome = compute("2 1\n0 1 7\n", ScalingMode::CarryOver);
    let result = trace_to_json(&outcome.trace, outcome.value);
    assert_eq!(result["maxFlowValue"], "7");
    assert_eq!(result["augmentingPaths"], 1);
    assert_eq!(result["levels"].len(), 3);
    assert_eq!(result["levels"][0]["delta"], 4);
    assert_eq!(result["levels"][0]["paths"][0]["increment"], 7);
    assert_eq!(result["levels"][0]["paths"][0]["nodes"][1], 1);
}

#[test]
fn test_csv_and_json_formats() {
    let csv = "3\n\"0\",1,3\n0,1,4\n\n1, 2, 10\n";
    let edges = parse_edges_csv(csv.as_bytes()).unwrap();
    assert_eq!(edges.edge_count(), 3);
    assert_eq!(compute_flow(&edges, ScalingMode::default()).unwrap().value, 7);
    assert!(parse_edges_csv("3\n0,1\n".as_bytes()).is_err());
    assert!(parse_edges_csv("".as_bytes()).is_err());

    let mut written = Vec::new();
    write_edges_csv(&edges, &mut written).unwrap();
    assert_eq!(String::from_utf8(written).unwrap(), "3\n0,1,3\n0,1,4\n1,2,10\n");

    let mut written = Vec::new();
    write_edges_json(&edges, &mut written).unwrap();
    let reread = parse_edges_json(&String::from_utf8(written).unwrap()).unwrap();
    assert_eq!(reread, edges);

    let edges = parse_edges_json(r#"{"nodes": 2, "edges": [[0, 1, 7]]}"#).unwrap();
    assert_eq!(compute_flow(&edges, ScalingMode::default()).unwrap().value, 7);
    assert!(parse_edges_json(r#"{"nodes": 2, "edges": [[0, 1]]}"#).is_err());
}

#[test]
fn test_jsonrpc_messages() {
    let request = parse_request(concat!(
        r#"{"jsonrpc":"2.0","id":3,"method":"compute_max_flow","#,
        r#""params":{"nodes":2}}"#
    ))
    .unwrap();
    assert_eq!(request.id, 3);
    assert_eq!(request.method, "compute_max_flow");
    assert_eq!(request.params["nodes"], 2);
    assert!(parse_request(r#"{"id":3}"#).is_err());

    let response = json::parse(&jsonrpc_serialize_response(
        JsonValue::from(3),
        None,
        Some((-32601, "Method not found")),
    ))
    .unwrap();
    assert_eq!(response["error"]["code"], -32601);
    assert!(response["result"].is_null());
}

fn call(address: &str, body: &str) -> JsonValue {
    send(
        address,
        &format!(
            "POST / HTTP/1.1\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        ),
    )
}

fn send(address: &str, message: &str) -> JsonValue {
    let mut socket = TcpStream::connect(address).unwrap();
    socket.write_all(message.as_bytes()).unwrap();
    let mut response = String::new();
    socket.read_to_string(&mut response).unwrap();
    let (_, payload) = response.split_once("\r\n\r\n").unwrap();
    json::parse(payload).unwrap()
}

#[test]
fn test_server_computes_max_flow() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap().to_string();
    thread::spawn(move || serve(listener, 10, 2));

    let response = call(
        &address,
        concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"compute_max_flow","#,
            r#""params":{"nodes":4,"edges":[[0,1,10],[0,2,10],[1,3,10],[2,3,"10"]]}}"#
        ),
    );
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["maxFlowValue"], "20");
    assert_eq!(response["result"]["augmentingPaths"], 8);

    let response = call(
        &address,
        concat!(
            r#"{"jsonrpc":"2.0","id":2,"method":"compute_max_flow","#,
            r#""params":{"nodes":4,"carry_over":true,"trace":true,"#,
            r#""edges":[[0,1,10],[0,2,10],[1,3,10],[2,3,10]]}}"#
        ),
    );
    assert_eq!(response["result"]["maxFlowValue"], "20");
    assert_eq!(response["result"]["augmentingPaths"], 2);
    assert_eq!(response["result"]["levels"][0]["delta"], 8);

    let response = call(
        &address,
        concat!(
            r#"{"jsonrpc":"2.0","id":3,"method":"compute_max_flow","#,
            r#""params":{"nodes":3,"edges":[[1,0,5]]}}"#
        ),
    );
    assert_eq!(response["error"]["code"], -32602);

    let response = call(&address, r#"{"jsonrpc":"2.0","id":4,"method":"nope","params":{}}"#);
    assert_eq!(response["error"]["code"], -32601);
}

#[test]
fn test_server_refuses_oversized_payload() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap().to_string();
    thread::spawn(move || serve(listener, 10, 1));

    // Only the headers are sent; the body is never allocated or read.
    let response = send(
        &address,
        &format!(
            "POST / HTTP/1.1\r\nContent-Length: {}\r\n\r\n",
            MAX_PAYLOAD_SIZE + 1
        ),
    );
    assert!(response["id"].is_null());
    assert_eq!(response["error"]["code"], -32600);

    let response = send(
        &address,
        "POST / HTTP/1.1\r\nContent-Length: 18446744073709551615\r\n\r\n",
    );
    assert_eq!(response["error"]["code"], -32600);

    let response = call(&address, r#"{"jsonrpc":"2.0","id":5,"method":"nope","params":{}}"#);
    assert_eq!(response["id"], 5);
}
