//! ## lemonstand-cli
//! **Command-line front end for the lemonade stand simulation**
//!
//! `simulate` plays a seeded run with the greedy policy and prints the totals and
//! fingerprint. `fuzz` drives many seeds with random plans and reports any
//! broken invariant.

use clap::Parser;

mod commands;

use commands::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    commands::run_command(cli)
}
