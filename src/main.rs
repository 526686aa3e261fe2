use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};
use transit_network::Network;

#[derive(Parser, Debug)]
#[command(version, about = "Checks, prints and rewrites transport network files")]
struct Cli {
    /// Also write logs to daily rolling files in this directory
    #[arg(long, global = true, env = "TRANSIT_NETWORK_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a network file and report how much it contains
    Check {
        #[arg(env = "TRANSIT_NETWORK_FILE")]
        file: PathBuf,
    },
    /// Print the stops, routes and vehicles of a network file
    Show {
        #[arg(env = "TRANSIT_NETWORK_FILE")]
        file: PathBuf,

        /// Print the network as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load a network file and save it again
    Normalize { input: PathBuf, output: PathBuf },
}

fn main() -> Result<()> {
    _ = dotenv();
    let cli = Cli::parse();

    let _guard = init_tracing(cli.log_dir.as_deref());

    if let Err(e) = run(cli.command) {
        error!("{e:?}");
        return Err(e);
    }

    Ok(())
}

fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let stderr_log = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_log, guard) = match log_dir {
        Some(log_dir) => {
            let appender = tracing_appender::rolling::daily(log_dir, "transit_network.log");
            let (non_blocking_appender, guard) = tracing_appender::non_blocking(appender);

            // A layer that logs events to rolling files.
            let file_log = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .pretty();

            (Some(file_log), Some(guard))
        }
        None => (None, None),
    };

    Registry::default()
        .with(stderr_log)
        .with(file_log)
        .with(env_filter)
        .init();

    guard
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Check { file } => {
            let network = load(&file)?;
            println!(
                "{}: {} stops, {} routes, {} vehicles",
                file.display(),
                network.stops().len(),
                network.routes().len(),
                network.vehicles().len()
            );
        }
        Command::Show { file, json } => {
            let network = load(&file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&network)?);
            } else {
                print_network(&network);
            }
        }
        Command::Normalize { input, output } => {
            let network = load(&input)?;
            network
                .save(Some(output.as_path()))
                .with_context(|| format!("couldn't save network to {}", output.display()))?;
            info!("rewrote {} to {}", input.display(), output.display());
        }
    }

    Ok(())
}

fn load(file: &Path) -> Result<Network> {
    Network::load(Some(file))
        .with_context(|| format!("couldn't load network from {}", file.display()))
}

fn print_network(network: &Network) {
    println!("stops:");
    for stop in network.stops() {
        println!("  {stop}");
    }

    println!("routes:");
    for route in network.routes() {
        println!("  {route}");
    }

    println!("vehicles:");
    for vehicle in network.vehicles() {
        match network.route(vehicle.route_number()) {
            Some(route) => println!("  {vehicle} ({})", route.name()),
            None => println!("  {vehicle}"),
        }
        if let Some(stop) = vehicle.current_stop() {
            println!("    at {}", stop.name());
        }
    }
}
