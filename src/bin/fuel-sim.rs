use fuel_station_sim::cli::{self, Command, FormatArg};
use fuel_station_sim::engine;
use fuel_station_sim::error::Result;
use fuel_station_sim::models::RoutingConfig;
use fuel_station_sim::output::{self, Formatter, HumanFormatter, JsonFormatter, SummaryFormatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let parsed = cli::parse_args()?;
    init_tracing(parsed.verbose);

    match parsed.command {
        Command::Run(args) => {
            let config = cli::build_config(&args.config)?;
            let result = engine::run_simulation(&config)?;
            let formatter = formatter_for(&args.format);
            print!("{}", formatter.write(&result));
        }
        Command::ShowConfig(args) => {
            let config = cli::build_config(&args)?;
            print!("{}", output::write_config(&config));
        }
        Command::ListRouting => {
            for routing in RoutingConfig::ALL {
                println!("{}", routing);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "warn,fuel_station_sim=info",
        _ => "warn,fuel_station_sim=debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn formatter_for(format: &FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}
