use std::error::Error;
use std::net::TcpListener;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use log::{error, info, warn};

use crate::rpc::rpc_handler::handle_connection;

pub fn start_server(
    listen_at: &str,
    queue_size: usize,
    threads: u64,
) -> Result<(), Box<dyn Error>> {
    let listener = TcpListener::bind(listen_at)?;
    info!("Listening on {}", listener.local_addr()?);
    serve(listener, queue_size, threads);
    Ok(())
}

/// Accepts connections forever and hands them to a fixed pool of workers.
/// Connections arriving while the queue is full are dropped.
pub fn serve(listener: TcpListener, queue_size: usize, threads: u64) {
    let (sender, receiver) = mpsc::sync_channel(queue_size);
    let protected_receiver = Arc::new(Mutex::new(receiver));
    for _ in 0..threads {
        let rec = protected_receiver.clone();
        thread::spawn(move || loop {
            let socket = match rec.lock() {
                Ok(receiver) => match receiver.recv() {
                    Ok(socket) => socket,
                    Err(_) => break,
                },
                Err(_) => break,
            };
            if let Err(e) = handle_connection(socket) {
                error!("Error handling connection: {e}");
            }
        });
    }
    loop {
        match listener.accept() {
            Ok((socket, _)) => {
                if let Err(e) = sender.try_send(socket) {
                    warn!("Queue full: {e}");
                }
            }
            Err(e) => error!("Error accepting connection: {e}"),
        }
    }
}
