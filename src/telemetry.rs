use std::fs;
use std::io;

use color_eyre::eyre::{self, WrapErr};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::TracingConfig;
use crate::config::tracing::LogFormat;

/// Filter used if `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "umami_badge=info,tower_http=info,warn";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Keeps the background log file writer alive.
///
/// Buffered log lines are flushed when this is dropped, so hold on to it until the process exits.
#[derive(Debug)]
#[must_use = "dropping the guard stops writing log files"]
pub struct Guard
{
	_files_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Installs the global tracing subscriber.
pub fn init(config: &TracingConfig) -> eyre::Result<Guard>
{
	if !config.enable {
		return Ok(Guard { _files_guard: None });
	}

	let mut layers = Vec::<BoxedLayer>::with_capacity(2);

	layers.push(match config.format {
		LogFormat::Pretty => tracing_subscriber::fmt::layer()
			.pretty()
			.with_writer(io::stderr)
			.with_timer(UtcTime::rfc_3339())
			.boxed(),
		LogFormat::Compact => tracing_subscriber::fmt::layer()
			.compact()
			.with_writer(io::stderr)
			.with_timer(UtcTime::rfc_3339())
			.boxed(),
		LogFormat::Json => tracing_subscriber::fmt::layer()
			.json()
			.with_writer(io::stderr)
			.with_timer(UtcTime::rfc_3339())
			.boxed(),
	});

	let files_guard = if config.files.enable {
		if !config.files.directory.exists() {
			fs::create_dir_all(&config.files.directory).wrap_err_with(|| {
				format!("failed to create log directory at {:?}", config.files.directory)
			})?;
		}

		let (writer, guard) = tracing_appender::rolling::Builder::default()
			.rotation(tracing_appender::rolling::Rotation::DAILY)
			.filename_prefix("umami-badge")
			.filename_suffix("log")
			.build(&config.files.directory)
			.map(tracing_appender::non_blocking)
			.wrap_err("failed to install logfile thread")?;

		layers.push(
			tracing_subscriber::fmt::layer()
				.json()
				.with_file(false)
				.with_line_number(false)
				.with_span_list(true)
				.with_writer(writer)
				.with_timer(UtcTime::rfc_3339())
				.boxed(),
		);

		Some(guard)
	} else {
		None
	};

	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

	tracing_subscriber::registry()
		.with(layers)
		.with(filter)
		.try_init()
		.wrap_err("failed to install tracing subscriber")?;

	Ok(Guard { _files_guard: files_guard })
}
