use std::time::Instant;

use json::JsonValue;
use log::info;

/// Per-request logging context: who called which method, and for how long.
pub struct CallContext {
    client_ip: String,
    request_id: JsonValue,
    rpc_function: String,
    start_time: Instant,
}

impl CallContext {
    pub fn new(client_ip: &str, request_id: &JsonValue, rpc_function: &str) -> Self {
        let context = CallContext {
            client_ip: client_ip.to_string(),
            request_id: request_id.clone(),
            rpc_function: rpc_function.to_string(),
            start_time: Instant::now(),
        };

        context.log("->", None);
        context
    }

    pub fn log(&self, prefix: &str, suffix: Option<&str>) {
        info!("{}", self.log_line(prefix, suffix.unwrap_or_default()));
    }

    pub fn log_message(&self, message: &str) {
        self.log("  ", Some(&format!(" {}", message)));
    }

    fn log_line(&self, prefix: &str, suffix: &str) -> String {
        format!(
            "{} [{:?}] [{}] [{}] [{}]{}",
            prefix,
            std::thread::current().id(),
            self.client_ip,
            self.request_id,
            self.rpc_function,
            suffix
        )
    }
}

impl Drop for CallContext {
    fn drop(&mut self) {
        let call_duration = self.start_time.elapsed().as_millis();
        self.log("<-", Some(&format!(" (took {} ms)", call_duration)));
    }
}
