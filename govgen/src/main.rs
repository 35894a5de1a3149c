use clap::{Parser, Subcommand};
use std::{io::Write, process::ExitCode};

mod cli;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate token, governor and timelock contracts from a JSON configuration
    Generate(cli::Generate),
    /// Encode the call data of a proposal action
    Calldata(cli::Calldata),
    /// Fetch the interface description of a verified contract
    Abi(cli::Abi),
}

pub fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .filter_level(level)
        .parse_default_env()
        .init();

    let res = match cli.command {
        Command::Generate(generate) => generate.execute(),
        Command::Calldata(calldata) => calldata.execute(),
        Command::Abi(abi) => abi.execute(),
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}
