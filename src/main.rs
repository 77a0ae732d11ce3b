// Allow dead code for items that are part of the library API but unused by
// the binary.
#![allow(dead_code)]

mod catalog;
mod cmd;
mod fake;
mod generator;
mod model;
mod validate;
mod writer;

use clap::Parser;
use cmd::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cmd::run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
