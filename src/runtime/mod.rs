//! Process-level runtime concerns: the tokio runtime, the deployment environment, and the global
//! panic hook.

use std::io;

use tokio::runtime::{Builder, Runtime};

use crate::config::RuntimeConfig;

mod environment;
pub use environment::{Environment, ParseEnvironmentError};

pub mod panic_hook;

/// Builds a multi-threaded tokio runtime according to `config`.
pub fn build(config: &RuntimeConfig) -> io::Result<Runtime>
{
	let mut builder = Builder::new_multi_thread();

	builder.enable_time();
	builder.enable_io();

	if let Some(n) = config.worker_threads {
		builder.worker_threads(n.get());
	}

	if let Some(n) = config.max_blocking_threads {
		builder.max_blocking_threads(n.get());
	}

	builder.build()
}
