//! Optimize command implementation for the routewise CLI.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use routewise_core::{
    Address, GeocodingPolicy, Optimize, OptimizeRequest, OptimizedRoute, OptimizerConfig,
    RouteOptimizer,
};
use routewise_data::DEFAULT_USER_AGENT;
use routewise_data::geocoding::{DEFAULT_NOMINATIM_URL, NominatimConfig, NominatimGeocoder};
use routewise_data::routing::{DEFAULT_ORS_URL, DEFAULT_PROFILE, OrsConfig, OrsRoutingProvider};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_ATTEMPT_TIMEOUT_MS, ARG_MAX_ATTEMPTS, ARG_NOMINATIM_URL, ARG_ORS_API_KEY,
    ARG_ORS_PROFILE, ARG_ORS_URL, ARG_REQUEST, ARG_RETRY_DELAY_MS, ARG_THROTTLE_MS,
    ARG_USER_AGENT, CliError, ENV_ORS_API_KEY, ENV_ORS_API_KEY_FALLBACK, ENV_REQUEST,
};

/// CLI arguments for the `optimize` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Resolve each address with Nominatim, fetch driving \
                 distances from OpenRouteService, and print the visiting \
                 order, total distance and route geometry as JSON. The \
                 request is a JSON document of the form \
                 {\"addresses\": [\"start\", \"...\", \"end\"]}.",
    about = "Optimize the visiting order of a list of addresses"
)]
#[ortho_config(prefix = "ROUTEWISE")]
pub(crate) struct OptimizeArgs {
    /// Path to a JSON file containing an optimize request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Base URL of the Nominatim geocoding service.
    #[arg(long = ARG_NOMINATIM_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) nominatim_url: Option<String>,
    /// Base URL of the OpenRouteService API.
    #[arg(long = ARG_ORS_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) ors_url: Option<String>,
    /// OpenRouteService API key.
    #[arg(long = ARG_ORS_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) ors_api_key: Option<String>,
    /// OpenRouteService routing profile.
    #[arg(long = ARG_ORS_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) ors_profile: Option<String>,
    /// User-Agent sent to both services.
    #[arg(long = ARG_USER_AGENT, value_name = "agent")]
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
    /// Geocoding attempts per address when the service times out.
    #[arg(long = ARG_MAX_ATTEMPTS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_attempts: Option<u32>,
    /// Pause between geocoding attempts, in milliseconds.
    #[arg(long = ARG_RETRY_DELAY_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) retry_delay_ms: Option<u64>,
    /// Pause between consecutive addresses, in milliseconds.
    #[arg(long = ARG_THROTTLE_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) throttle_ms: Option<u64>,
    /// Deadline for a single geocoding attempt, in milliseconds.
    #[arg(long = ARG_ATTEMPT_TIMEOUT_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) attempt_timeout_ms: Option<u64>,
}

/// Looks up a process environment variable by name.
pub(crate) type EnvLookup = dyn Fn(&str) -> Option<String>;

/// Reads variables from the real process environment.
pub(crate) fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl OptimizeArgs {
    pub(crate) fn into_config(self, env: &EnvLookup) -> Result<OptimizeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimizeConfig::try_from(merged.with_api_key_fallback(env))
    }

    /// Fill a missing routing key from the deployment's `ORS_API_KEY`.
    pub(crate) fn with_api_key_fallback(mut self, env: &EnvLookup) -> Self {
        if self.ors_api_key.is_none() {
            self.ors_api_key = env(ENV_ORS_API_KEY_FALLBACK);
        }
        self
    }
}

/// Resolved `optimize` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct OptimizeConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Geocoding service settings.
    pub(crate) nominatim: NominatimConfig,
    /// Routing service settings, API key included.
    pub(crate) ors: OrsConfig,
    /// Retry and pacing rules for geocoding.
    pub(crate) policy: GeocodingPolicy,
}

impl OptimizeConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<OptimizeArgs> for OptimizeConfig {
    type Error = CliError;

    fn try_from(args: OptimizeArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_REQUEST,
        })?;
        let api_key = args
            .ors_api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_ORS_API_KEY,
                env: ENV_ORS_API_KEY,
            })?;
        let user_agent = args
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

        let nominatim = NominatimConfig::new(
            args.nominatim_url
                .unwrap_or_else(|| DEFAULT_NOMINATIM_URL.to_owned()),
        )
        .with_user_agent(user_agent.clone());
        let ors = OrsConfig::new(args.ors_url.unwrap_or_else(|| DEFAULT_ORS_URL.to_owned()))
            .with_api_key(api_key)
            .with_profile(
                args.ors_profile
                    .unwrap_or_else(|| DEFAULT_PROFILE.to_owned()),
            )
            .with_user_agent(user_agent);

        let defaults = GeocodingPolicy::default();
        let policy = GeocodingPolicy {
            max_attempts: args.max_attempts.unwrap_or(defaults.max_attempts),
            retry_delay: args
                .retry_delay_ms
                .map_or(defaults.retry_delay, Duration::from_millis),
            throttle_delay: args
                .throttle_ms
                .map_or(defaults.throttle_delay, Duration::from_millis),
            attempt_timeout: args
                .attempt_timeout_ms
                .map_or(defaults.attempt_timeout, Duration::from_millis),
        };

        Ok(Self {
            request_path,
            nominatim,
            ors,
            policy,
        })
    }
}

/// Builds an optimizer for the current optimize invocation.
pub(crate) trait OptimizerBuilder {
    fn build(&self, config: &OptimizeConfig) -> Result<Box<dyn Optimize>, CliError>;
}

/// Wires Nominatim and OpenRouteService into a [`RouteOptimizer`].
pub(crate) struct DefaultOptimizerBuilder;

impl OptimizerBuilder for DefaultOptimizerBuilder {
    fn build(&self, config: &OptimizeConfig) -> Result<Box<dyn Optimize>, CliError> {
        let geocoder = NominatimGeocoder::with_config(config.nominatim.clone()).map_err(
            |source| CliError::BuildGeocoder {
                base_url: config.nominatim.base_url.clone(),
                source,
            },
        )?;
        let routing = OrsRoutingProvider::with_config(config.ors.clone()).map_err(|source| {
            CliError::BuildRoutingProvider {
                base_url: config.ors.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(RouteOptimizer::with_config(
            geocoder,
            routing.clone(),
            routing,
            OptimizerConfig {
                geocoding: config.policy,
            },
        )))
    }
}

pub(crate) fn run_optimize(args: OptimizeArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultOptimizerBuilder;
    run_optimize_with(args, &builder, &process_env, &mut stdout)
}

pub(crate) fn run_optimize_with(
    args: OptimizeArgs,
    builder: &dyn OptimizerBuilder,
    env: &EnvLookup,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let route = execute_optimize(args, builder, env)?;
    write_optimized_route(writer, &route)
}

fn execute_optimize(
    args: OptimizeArgs,
    builder: &dyn OptimizerBuilder,
    env: &EnvLookup,
) -> Result<OptimizedRoute, CliError> {
    let config = resolve_optimize_config(args, env)?;
    let addresses = load_addresses(&config.request_path)?;
    let optimizer = builder.build(&config)?;
    info!(
        "optimizing {} addresses from {}",
        addresses.len(),
        config.request_path
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    runtime
        .block_on(optimizer.optimize(&addresses))
        .map_err(CliError::Optimize)
}

fn resolve_optimize_config(
    args: OptimizeArgs,
    env: &EnvLookup,
) -> Result<OptimizeConfig, CliError> {
    let config = args.into_config(env)?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`OptimizeRequest`] from disk.
pub(crate) fn load_optimize_request(path: &Utf8Path) -> Result<OptimizeRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads and validates the request, yielding its typed addresses.
pub(crate) fn load_addresses(path: &Utf8Path) -> Result<Vec<Address>, CliError> {
    load_optimize_request(path)?
        .into_addresses()
        .map_err(|source| CliError::InvalidRequest {
            path: path.to_path_buf(),
            source,
        })
}

fn write_optimized_route(writer: &mut dyn Write, route: &OptimizedRoute) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(route).map_err(CliError::SerialiseResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OptimizeConfig, CliError> {
    let merged = OptimizeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OptimizeConfig::try_from(merged)
}
