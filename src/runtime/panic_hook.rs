//! Routes panics through `tracing` so they end up wherever the rest of our logs go.

use std::any::Any;
use std::backtrace::Backtrace;
use std::panic;

use tracing::field::display;

/// Returns the message a panic was raised with, if it was a string.
pub fn message(payload: &(dyn Any + Send)) -> Option<&str>
{
	payload
		.downcast_ref::<&str>()
		.copied()
		.or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}

/// Installs a hook that logs the panic message, location and backtrace at `error` level.
///
/// The default hook still runs afterwards.
pub fn install()
{
	let default_hook = panic::take_hook();

	panic::set_hook(Box::new(move |info| {
		error!(
			target: "umami_badge::panics",
			panic = message(info.payload()).unwrap_or("<non-string payload>"),
			location = info.location().map(display),
			backtrace = %Backtrace::force_capture(),
			"thread panicked",
		);

		default_hook(info)
	}));
}
