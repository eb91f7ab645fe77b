#![forbid(unsafe_code)]

use clap::Parser;
use mceliece::cli;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    cli::run(args)
}
