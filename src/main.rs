extern crate dotenv;
extern crate log;

use std::{process::ExitCode, time::Duration};

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::{debug, error, info};
use sysd_unitctl::{ClientConfig, SystemdErrors, UnitControlClient, UnitDBusLevel};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Specify the user session bus
    #[arg(short, long)]
    user: bool,

    /// Specify the system session bus (This is the implied default)
    #[arg(short, long)]
    system: bool,

    /// Bound on the ActiveState read, in milliseconds
    #[arg(short, long)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// Print the default target
    DefaultTarget,

    /// Stop a unit (replace mode)
    Stop { unit: String },

    /// Print the unit ActiveState
    State { unit: String },

    /// Enable the unit file at runtime
    Enable { unit: String },

    /// Disable the unit file at runtime
    Disable { unit: String },

    /// Exit with 0 if systemd knows the unit, 1 otherwise
    Exists { unit: String },
}

fn main() -> ExitCode {
    dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = handle_args(&args);
    debug!("Command {:?} with {config:?}", args.command);

    let client = UnitControlClient::from_config(config);

    match run(&client, &args.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn handle_args(args: &Args) -> ClientConfig {
    let mut config = ClientConfig::from_env();

    match (args.system, args.user) {
        (true, _) => config.level = UnitDBusLevel::System,
        (false, true) => config.level = UnitDBusLevel::UserSession,
        (false, false) => {}
    }

    match args.timeout_ms {
        Some(0) => info!("Timeout 0 ignored, keep {:?}", config.property_timeout),
        Some(ms) => config.property_timeout = Duration::from_millis(ms),
        None => {}
    }

    config
}

/// `Ok(false)` only for a unit that does not exist.
fn run(client: &UnitControlClient, command: &Command) -> Result<bool, SystemdErrors> {
    match command {
        Command::DefaultTarget => {
            println!("{}", client.get_default_target()?);
        }
        Command::Stop { unit } => client.stop_unit(unit)?,
        Command::State { unit } => {
            println!("{}", client.get_unit_state(unit)?);
        }
        Command::Enable { unit } => client.enable_unit(unit)?,
        Command::Disable { unit } => client.disable_unit(unit)?,
        Command::Exists { unit } => {
            let exists = client.unit_exists(unit)?;
            println!("{exists}");
            return Ok(exists);
        }
    }
    Ok(true)
}
