use std::process::ExitCode;

use clap::Parser;

mod cli;
mod config;
mod error;
mod identify;
mod library;
mod naming;
mod pipeline;
mod report;
mod runtime;
mod tags;

fn main() -> ExitCode {
    let args = cli::Args::parse();
    runtime::init_tracing();

    match runtime::run(args) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("tunetag: {err}");
            ExitCode::from(runtime::FATAL_EXIT)
        }
    }
}
