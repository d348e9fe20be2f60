//! Service configuration.
//!
//! The [`Config`] is assembled exactly once on startup, from (in increasing order of precedence)
//! a TOML file, environment variables, and CLI flags. It is never mutated afterwards; the parts
//! the HTTP handlers need are handed to them as state.
//!
//! See `config.example.toml` in the root of the repository for all available options.

use std::path::Path;
use std::{fs, io};

use serde::Deserialize;

pub mod http;
pub mod runtime;
pub mod tracing;
pub mod umami;

pub use self::http::HttpConfig;
pub use self::runtime::RuntimeConfig;
pub use self::tracing::TracingConfig;
pub use self::umami::UmamiConfig;
use crate::domains::DomainRecord;
use crate::runtime::Environment;

/// Environment variable holding the Umami base URL.
pub const UMAMI_URL: &str = "UMAMI_URL";

/// Environment variable holding the Umami API token.
pub const UMAMI_TOKEN: &str = "UMAMI_TOKEN";

/// Environment variable holding the name of the deployment environment.
pub const ENVIRONMENT: &str = "ENVIRONMENT";

/// Environment variable holding a `domain:website_id,domain:website_id` list.
pub const DOMAIN_TO_WEBSITE_MAP: &str = "DOMAIN_TO_WEBSITE_MAP";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config
{
	pub runtime: RuntimeConfig,
	pub http: HttpConfig,
	pub tracing: TracingConfig,
	pub umami: UmamiConfig,

	/// Domain records from the `[[domains]]` tables.
	pub domains: Vec<DomainRecord>,

	/// The raw value of [`DOMAIN_TO_WEBSITE_MAP`], if it was set.
	///
	/// This is parsed when the domain map is built so malformed entries can be logged.
	#[serde(skip)]
	pub domain_list: Option<Box<str>>,
}

/// Errors that can occur when loading the configuration file.
#[derive(Debug, Error)]
pub enum LoadFromFileError
{
	#[error("failed to read configuration file: {0}")]
	Read(#[from] io::Error),

	#[error("failed to parse configuration file: {0}")]
	Parse(#[from] toml::de::Error),
}

/// An environment variable was set to a value we can't use.
#[derive(Debug, Error)]
#[error("invalid value for `{name}`: {reason}")]
pub struct InvalidEnvVar
{
	name: &'static str,
	reason: Box<str>,
}

impl Config
{
	/// Reads and parses the TOML file at `path`.
	pub fn load_from_file(path: &Path) -> Result<Self, LoadFromFileError>
	{
		let text = fs::read_to_string(path)?;
		let config = toml::from_str(&text)?;

		Ok(config)
	}

	/// Applies overrides from environment variables.
	///
	/// `var` is used to look up variables by name; empty values are treated as unset.
	pub fn apply_env<F>(&mut self, mut var: F) -> Result<(), InvalidEnvVar>
	where
		F: FnMut(&str) -> Option<String>,
	{
		let mut var = move |name: &str| var(name).filter(|value| !value.trim().is_empty());

		if let Some(url) = var(UMAMI_URL) {
			self.umami.url = Some(url.trim().parse().map_err(|error: url::ParseError| {
				InvalidEnvVar { name: UMAMI_URL, reason: error.to_string().into_boxed_str() }
			})?);
		}

		if let Some(token) = var(UMAMI_TOKEN) {
			self.umami.token = Some(token.into_boxed_str());
		}

		if let Some(environment) = var(ENVIRONMENT) {
			self.runtime.environment = environment.parse::<Environment>().map_err(|error| {
				InvalidEnvVar { name: ENVIRONMENT, reason: error.to_string().into_boxed_str() }
			})?;
		}

		if let Some(list) = var(DOMAIN_TO_WEBSITE_MAP) {
			self.domain_list = Some(list.into_boxed_str());
		}

		Ok(())
	}
}
