use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Solve(args) => args.run(),
        Command::Batch(args) => args.run(),
        Command::Config(args) => args.run(),
    }
}

#[derive(Parser)]
#[command(name = "delta-ik", about = "Inverse kinematics for three-arm rotary delta robots")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve the bicep angles for a single effector position.
    Solve(cli::solve::SolveArgs),
    /// Solve every effector position listed in a file.
    Batch(cli::batch::BatchArgs),
    /// Print the effective configuration as TOML.
    Config(cli::config::ConfigArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
