use std::time::Duration;

use derive_more::Debug;
use serde::{Deserialize, Deserializer};
use url::Url;

/// Connection details for the upstream Umami instance.
///
/// Both `url` and `token` are optional here. The service boots without them; requests that need
/// Umami will fail until they are provided.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct UmamiConfig
{
	/// Base URL of the Umami instance, e.g. `https://analytics.example.com`.
	#[debug("{:?}", url.as_ref().map(Url::as_str))]
	pub url: Option<Url>,

	/// Bearer token sent with every request.
	#[debug("{}", if token.is_some() { "Some(<redacted>)" } else { "None" })]
	pub token: Option<Box<str>>,

	/// Upper bound for a single request to Umami (in seconds).
	#[serde(deserialize_with = "deserialize_duration")]
	pub timeout: Duration,
}

impl Default for UmamiConfig
{
	fn default() -> Self
	{
		Self { url: None, token: None, timeout: default_timeout() }
	}
}

fn default_timeout() -> Duration
{
	Duration::from_secs(10)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
	D: Deserializer<'de>,
{
	let secs = f64::deserialize(deserializer)?;

	Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
}
