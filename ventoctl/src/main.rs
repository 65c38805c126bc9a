mod check;
mod cli;
mod script;
mod simulate;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    vento_config::telemetry::init_tracing("warn");

    let cli = Cli::parse();
    match cli.command {
        Command::Check(args) => check::run(args),
        Command::Simulate(args) => simulate::run(args).await,
    }
}
