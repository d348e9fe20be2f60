use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct TracingConfig
{
	/// Whether to install a tracing subscriber at all.
	pub enable: bool,

	/// How to format log lines written to stderr.
	pub format: LogFormat,

	/// Whether to record request headers on the per-request span.
	pub include_http_headers: bool,

	/// Rolling JSON log files.
	pub files: FilesConfig,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat
{
	#[default]
	Pretty,
	Compact,
	Json,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilesConfig
{
	pub enable: bool,
	pub directory: Box<Path>,
}

impl Default for TracingConfig
{
	fn default() -> Self
	{
		Self {
			enable: true,
			format: LogFormat::default(),
			include_http_headers: false,
			files: FilesConfig::default(),
		}
	}
}

impl Default for FilesConfig
{
	fn default() -> Self
	{
		Self { enable: false, directory: default_files_directory() }
	}
}

fn default_files_directory() -> Box<Path>
{
	PathBuf::from("/var/log/umami-badge").into_boxed_path()
}
