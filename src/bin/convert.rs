use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;

use capflow::io::{
    read_edges_csv, read_edges_json, read_edges_text_file, write_edges_csv, write_edges_json,
    write_edges_text,
};
use capflow::FlowResult;

fn main() -> ExitCode {
    env_logger::init();

    let operation = env::args().nth(1).and_then(|op| {
        if matches!(
            op.as_str(),
            "--text-to-csv" | "--csv-to-text" | "--text-to-json" | "--json-to-text"
        ) {
            Some(op)
        } else {
            None
        }
    });
    let (Some(operation), 4) = (operation, env::args().len()) else {
        println!("Usage: convert --text-to-csv <edges.txt> <edges.csv>");
        println!("Usage: convert --csv-to-text <edges.csv> <edges.txt>");
        println!("Usage: convert --text-to-json <edges.txt> <edges.json>");
        println!("Usage: convert --json-to-text <edges.json> <edges.txt>");
        return ExitCode::from(1);
    };

    let args = env::args().collect::<Vec<_>>();
    match convert(&operation, &args[2], &args[3]) {
        Ok(()) => {
            println!("Export done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(1)
        }
    }
}

fn convert(operation: &str, input: &str, output: &str) -> FlowResult<()> {
    let edges = match operation {
        "--text-to-csv" | "--text-to-json" => read_edges_text_file(input)?,
        "--csv-to-text" => read_edges_csv(input)?,
        _ => read_edges_json(input)?,
    };
    println!("Imported {} edges.", edges.edge_count());
    let out = BufWriter::new(File::create(output)?);
    match operation {
        "--text-to-csv" => write_edges_csv(&edges, out),
        "--text-to-json" => write_edges_json(&edges, out),
        _ => write_edges_text(&edges, out),
    }
}
