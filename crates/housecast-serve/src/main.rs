//! housecast - house price prediction service
//!
//! Usage:
//!   housecast serve                         # housecast.toml, env, defaults
//!   housecast serve --model models/v2.json  # override the artifact
//!   housecast serve --config prod.toml --port 8080

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use housecast_core::config::{CliOverrides, HousecastConfig};
use housecast_core::constants::VERSION;
use housecast_core::tracing::init_tracing;
use housecast_core::HousecastErrorCode;
use housecast_serve::server;

#[derive(Parser)]
#[command(name = "housecast")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve POST /predict over HTTP
    Serve {
        /// Config file (default: housecast.toml in the working directory)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Model artifact path
        #[arg(long, value_name = "PATH")]
        model: Option<String>,

        /// Bind host
        #[arg(long)]
        host: Option<String>,

        /// Bind port
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            model,
            host,
            port,
        } => {
            let root = match std::env::current_dir() {
                Ok(dir) => dir,
                Err(e) => {
                    eprintln!("error: cannot read working directory: {e}");
                    return ExitCode::FAILURE;
                }
            };
            let overrides = CliOverrides {
                host,
                port,
                model_path: model,
            };
            let config = match HousecastConfig::load(&root, config.as_deref(), Some(&overrides)) {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!(error = %e.coded_string(), "invalid configuration");
                    eprintln!("error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            tracing::info!(version = VERSION, "starting housecast");

            let runtime = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    eprintln!("error: failed to create runtime: {e}");
                    return ExitCode::FAILURE;
                }
            };
            match runtime.block_on(server::run(&config.serve)) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
