use std::env;
use std::process::ExitCode;

use capflow::server;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let listen_at = env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:8080".to_string());
    match server::start_server(&listen_at, 10, 4) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Could not start server at {listen_at}: {e}");
            ExitCode::FAILURE
        }
    }
}
