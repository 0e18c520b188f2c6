mod bench_cmd;
mod cli;
mod config;
mod convert;
mod data;
mod eval_cmd;
mod logging;
mod sweep_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Bench(args) => bench_cmd::run(args),
        Command::Eval(args) => eval_cmd::run(args),
        Command::Sweep(args) => sweep_cmd::run(args),
    }
}
