use std::num::NonZero;

use serde::{Deserialize, Deserializer};

use crate::runtime::Environment;

/// Tokio configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RuntimeConfig
{
	/// The environment the service is deployed in.
	pub environment: Environment,

	/// The amount of worker threads to spawn.
	///
	/// If this value is omitted or 0, tokio will choose the amount.
	#[serde(deserialize_with = "deserialize_thread_count")]
	pub worker_threads: Option<NonZero<usize>>,

	/// The maximum amount of threads to spawn in the blocking thread pool.
	///
	/// If this value is omitted or 0, tokio will choose the amount.
	#[serde(deserialize_with = "deserialize_thread_count")]
	pub max_blocking_threads: Option<NonZero<usize>>,
}

fn deserialize_thread_count<'de, D>(deserializer: D) -> Result<Option<NonZero<usize>>, D::Error>
where
	D: Deserializer<'de>,
{
	<Option<usize> as Deserialize<'de>>::deserialize(deserializer)
		.map(|maybe_count| maybe_count.and_then(NonZero::new))
}
