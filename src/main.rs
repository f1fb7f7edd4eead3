use std::io::{self, Read};
use std::process::ExitCode;

use jumpsat::Solver;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut input = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut input) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    let mut solver = match Solver::from_dimacs(&input) {
        Ok(solver) => solver,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if solver.solve().is_sat() {
        println!("SATISFIABLE");
    } else {
        println!("UNSATISFIABLE");
    }
    ExitCode::SUCCESS
}
