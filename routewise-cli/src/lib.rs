//! Command-line interface for the routewise engine.
#![forbid(unsafe_code)]

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod error;
mod fs;
mod optimize;

pub use error::CliError;

use optimize::{OptimizeArgs, run_optimize};

pub(crate) const ARG_REQUEST: &str = "request";
pub(crate) const ARG_NOMINATIM_URL: &str = "nominatim-url";
pub(crate) const ARG_ORS_URL: &str = "ors-url";
pub(crate) const ARG_ORS_API_KEY: &str = "ors-api-key";
pub(crate) const ARG_ORS_PROFILE: &str = "ors-profile";
pub(crate) const ARG_USER_AGENT: &str = "user-agent";
pub(crate) const ARG_MAX_ATTEMPTS: &str = "max-attempts";
pub(crate) const ARG_RETRY_DELAY_MS: &str = "retry-delay-ms";
pub(crate) const ARG_THROTTLE_MS: &str = "throttle-ms";
pub(crate) const ARG_ATTEMPT_TIMEOUT_MS: &str = "attempt-timeout-ms";
pub(crate) const ENV_REQUEST: &str = "ROUTEWISE_CMDS_OPTIMIZE_REQUEST_PATH";
pub(crate) const ENV_ORS_API_KEY: &str = "ROUTEWISE_CMDS_OPTIMIZE_ORS_API_KEY";
/// Variable the hosted deployment has always read the routing key from.
pub(crate) const ENV_ORS_API_KEY_FALLBACK: &str = "ORS_API_KEY";

/// Run the routewise CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when argument parsing, configuration, request
/// loading or the optimization itself fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose);
    match cli.command {
        Command::Optimize(args) => run_optimize(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "routewise",
    about = "Order a list of stops into a short driving route",
    version
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Geocode, sequence and route a JSON list of addresses.
    Optimize(OptimizeArgs),
}

/// Map the `-v` count onto a default filter directive.
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides `-v`.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(verbose)));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        log::debug!("keeping the existing log subscriber: {err}");
    }
}

#[cfg(test)]
mod tests;
