//! CLI argument handling.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use umami_badge::config::Config;
use umami_badge::runtime::Environment;

/* NOTE:
 * We expose a free function here so callers don't need to have
 * `clap::Parser` in-scope.
 */

/// Parses the process' CLI arguments.
pub fn args() -> Args
{
	Args::parse()
}

/// Serves shields.io visit count badges backed by Umami.
///
/// Options given here take precedence over environment variables, which in turn take
/// precedence over the configuration file.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args
{
	/// Path to the configuration file.
	///
	/// A missing file is not an error; defaults are used instead.
	#[arg(long = "config", env = "UMAMI_BADGE_CONFIG", default_value = "config.toml")]
	pub config_path: PathBuf,

	/// Load environment variables from this file instead of `./.env`.
	#[arg(long)]
	pub env_file: Option<PathBuf>,

	/// The IP address to listen on.
	#[arg(long)]
	pub ip: Option<IpAddr>,

	/// The port to listen on.
	#[arg(long)]
	pub port: Option<u16>,

	/// The environment we are running in.
	#[arg(long, value_enum)]
	pub environment: Option<Environment>,
}

impl Args
{
	/// Applies any relevant config overrides specified as CLI flags in the
	/// given `config` object.
	pub fn apply_to_config(&self, config: &mut Config)
	{
		if let Some(ip) = self.ip {
			config.http.ip = ip;
		}

		if let Some(port) = self.port {
			config.http.port = port;
		}

		if let Some(environment) = self.environment {
			config.runtime.environment = environment;
		}
	}
}
