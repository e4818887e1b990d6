use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{load_config, validate_config};
use crate::error::{Error, Result};
use crate::models::{RoutingConfig, SimConfig};

#[derive(Parser, Debug)]
#[command(name = "fuel-sim", version, about = "Fuel station queueing simulation")]
pub struct Cli {
    /// Log progress to stderr (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the simulation and print statistics
    Run(RunArgs),
    /// Print the validated configuration without running it
    ShowConfig(ConfigArgs),
    /// List the supported routing policies
    ListRouting,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Configuration file (.toml or .json)
    #[arg(short, long)]
    pub config: PathBuf,
    #[arg(long, help = "Seed routing and service times; omit for a random seed")]
    pub seed: Option<u64>,
    /// Override the number of arriving cars
    #[arg(long)]
    pub cars: Option<usize>,
    #[arg(long, value_enum)]
    pub routing: Option<RoutingArg>,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum RoutingArg {
    Uniform,
    RoundRobin,
}

impl From<RoutingArg> for RoutingConfig {
    fn from(value: RoutingArg) -> Self {
        match value {
            RoutingArg::Uniform => RoutingConfig::Uniform,
            RoutingArg::RoundRobin => RoutingConfig::RoundRobin,
        }
    }
}

#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Human,
    Summary,
    Json,
}

pub fn parse_args() -> Result<Cli> {
    match Cli::try_parse() {
        Ok(cli) => Ok(cli),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => Err(Error::Cli(err.to_string())),
    }
}

/// Loads the file, applies command-line overrides and validates the result.
pub fn build_config(args: &ConfigArgs) -> Result<SimConfig> {
    let mut config = load_config(&args.config)?;
    apply_overrides(&mut config, args);
    validate_config(&config)?;
    Ok(config)
}

fn apply_overrides(config: &mut SimConfig, args: &ConfigArgs) {
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(cars) = args.cars {
        config.cars.count = cars;
    }
    if let Some(routing) = args.routing.clone() {
        config.routing = routing.into();
    }
}
