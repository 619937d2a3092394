mod commands;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use droneroute_cli::output::{print_footer, print_logo, OutputFormat};

use commands::distances::{handle_distances_command, DistancesCommandArgs};
use commands::mst::handle_mst_command;
use commands::route::{handle_route_command, RouteCommandArgs};
use commands::simulate::{handle_simulate_command, SimulateCommandArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Battery-constrained drone delivery routing")]
struct Cli {
    /// Network JSON file, or a directory containing `network.json`.
    /// Falls back to `DRONEROUTE_NETWORK`, then the platform data directory.
    #[arg(long, global = true)]
    network: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Suppress the banner and timing footer.
    #[arg(long, global = true)]
    no_logo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a route between two nodes.
    Route(RouteCommandArgs),
    /// Print the minimum spanning tree of the network.
    Mst,
    /// Print shortest distances from one node, ignoring battery.
    Distances(DistancesCommandArgs),
    /// Plan a batch of orders and report route usage.
    Simulate(SimulateCommandArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let started = Instant::now();

    let decorated = cli.format.is_decorated() && !cli.no_logo;
    if decorated {
        print_logo();
    }

    let network = cli.network.as_deref();
    match &cli.command {
        Command::Route(args) => handle_route_command(network, cli.format, args)?,
        Command::Mst => handle_mst_command(network, cli.format)?,
        Command::Distances(args) => handle_distances_command(network, cli.format, args)?,
        Command::Simulate(args) => handle_simulate_command(network, cli.format, args)?,
    }

    if decorated {
        print_footer(started.elapsed());
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
