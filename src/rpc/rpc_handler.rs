use std::error::Error;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;

use json::JsonValue;

use crate::error::FlowError;
use crate::rpc::call_context::CallContext;
use crate::rpc::rpc_functions::{compute_max_flow, InputValidationError, JsonRpcRequest};

/// Requests announcing a larger body are refused before anything is allocated.
pub const MAX_PAYLOAD_SIZE: usize = 64 * 1024 * 1024;

pub fn handle_connection(mut socket: TcpStream) -> Result<(), Box<dyn Error>> {
    let client_ip = socket.peer_addr()?.to_string();
    let request = match read_request(&mut socket) {
        Ok(request) => request,
        Err(e) => {
            let call_context = CallContext::new(&client_ip, &JsonValue::Null, "");
            return respond::<JsonValue>(
                &mut socket,
                JsonValue::Null,
                None,
                Some((-32600, format!("Invalid request: {}", e))),
                &call_context,
            );
        }
    };

    let call_context = CallContext::new(&client_ip, &request.id, &request.method);

    fn respond<T: Into<JsonValue>>(
        socket: &mut TcpStream,
        id: JsonValue,
        result: Option<T>,
        error: Option<(i64, String)>,
        call_context: &CallContext,
    ) -> Result<(), Box<dyn Error>> {
        if let Some((code, message)) = error.as_ref() {
            call_context.log_message(&format!("Error (code: {}): {}", code, message));
        }
        let response_json = jsonrpc_serialize_response(
            id,
            result.map(Into::into),
            error.as_ref().map(|(c, m)| (*c, m.as_str())),
        );
        let rpc_response = jsonrpc_response(response_json);

        socket.write_all(rpc_response.as_bytes())?;
        Ok(())
    }

    match request.method.as_str() {
        "compute_max_flow" => match compute_max_flow(&request, &call_context) {
            Ok(result) => respond(&mut socket, request.id, Some(result), None, &call_context),
            Err(e) => respond::<JsonValue>(
                &mut socket,
                request.id,
                None,
                Some((error_code(&*e), format!("Error computing max flow: {}", e))),
                &call_context,
            ),
        }?,
        _ => {
            respond::<JsonValue>(
                &mut socket,
                request.id,
                None,
                Some((-32601, "Method not found".to_string())),
                &call_context,
            )?;
        }
    };

    Ok(())
}

/// Invalid params for rejected input, a generic server error otherwise.
fn error_code(error: &(dyn Error + 'static)) -> i64 {
    let invalid_params = error.is::<InputValidationError>()
        || error
            .downcast_ref::<FlowError>()
            .map(FlowError::is_input_error)
            .unwrap_or_default();
    if invalid_params {
        -32602
    } else {
        -32000
    }
}

fn read_payload(socket: &mut TcpStream) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut reader = BufReader::new(socket);
    let mut length = 0;
    for result in reader.by_ref().lines() {
        let l = result?;
        if l.is_empty() {
            break;
        }

        let header = "content-length: ";
        if l.to_lowercase().starts_with(header) {
            length = l[header.len()..].trim().parse::<usize>()?;
        }
    }
    if length > MAX_PAYLOAD_SIZE {
        return Err(From::from(format!(
            "Content-Length {} exceeds the limit of {} bytes",
            length, MAX_PAYLOAD_SIZE
        )));
    }
    let mut payload = vec![0u8; length];

    reader.read_exact(payload.as_mut_slice())?;
    Ok(payload)
}

fn read_request(socket: &mut TcpStream) -> Result<JsonRpcRequest, Box<dyn Error>> {
    let payload = read_payload(socket)?;
    parse_request(&String::from_utf8(payload)?)
}

pub fn parse_request(payload: &str) -> Result<JsonRpcRequest, Box<dyn Error>> {
    let mut request = json::parse(payload)?;
    let id = request["id"].take();
    let params = request["params"].take();
    match request["method"].as_str() {
        Some(method) => Ok(JsonRpcRequest {
            id,
            method: method.to_string(),
            params,
        }),
        _ => Err(From::from(format!("Invalid JSON-RPC request: {}", request))),
    }
}

pub fn jsonrpc_serialize_response(
    id: JsonValue,
    result: Option<JsonValue>,
    error: Option<(i64, &str)>,
) -> String {
    let mut response = json::object! {
        jsonrpc: "2.0",
        id: id,
    };
    if let Some((code, message)) = error {
        response["error"] = json::object! {
            code: code,
            message: message,
        };
    } else {
        response["result"] = result.unwrap_or(JsonValue::Null);
    }
    response.dump()
}

fn jsonrpc_response(json_payload: String) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n{}",
        json_payload.len(),
        json_payload
    )
}
