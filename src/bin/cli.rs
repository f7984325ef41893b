use std::env;
use std::io;
use std::process::ExitCode;

use capflow::graph::{compute_flow, ScalingMode};
use capflow::io::{format_trace, read_edges_text, read_edges_text_file, trace_to_json};

fn usage() {
    println!("Usage: cli [--carry-over] [--json] [<edges.txt>]");
    println!("Reads \"n m\" followed by m lines \"tail head capacity\" from the file or stdin");
    println!("and prints the maximum flow from node 0 to node n-1.");
    println!("Option --carry-over keeps the flow between scaling levels.");
    println!("Option --json prints the result and trace as JSON.");
}

fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    let before = args.len();
    args.retain(|a| a != flag);
    args.len() != before
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1).collect::<Vec<_>>();
    if take_flag(&mut args, "--help") {
        usage();
        return ExitCode::SUCCESS;
    }
    let mode = if take_flag(&mut args, "--carry-over") {
        ScalingMode::CarryOver
    } else {
        ScalingMode::ResetEachLevel
    };
    let as_json = take_flag(&mut args, "--json");
    if args.len() > 1 || args.iter().any(|a| a.starts_with("--")) {
        usage();
        return ExitCode::from(1);
    }

    let edges = match args.first() {
        Some(path) => read_edges_text_file(path),
        None => read_edges_text(io::stdin().lock()),
    };
    match edges.and_then(|edges| compute_flow(&edges, mode)) {
        Ok(outcome) => {
            if as_json {
                println!("{}", trace_to_json(&outcome.trace, outcome.value));
            } else {
                print!("{}", format_trace(&outcome.trace, outcome.value));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            if e.is_input_error() {
                ExitCode::from(1)
            } else {
                ExitCode::from(2)
            }
        }
    }
}
