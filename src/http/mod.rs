//! The HTTP facade.
//!
//! Each service exposes its own `http::router()`; this module merges them and wraps the result
//! in the middleware every route shares.

use axum::Router;

use crate::config::TracingConfig;
use crate::services::{BadgeService, MetaService};

mod error;
pub(crate) use error::{HttpError, Result};

pub(crate) mod extract;
mod middleware;

/// Returns the top-level router.
///
/// This is what we pass to [`axum::serve()`].
pub(crate) fn router(
	meta: MetaService,
	badges: BadgeService,
	tracing_config: &TracingConfig,
) -> Router
{
	Router::new()
		.merge(crate::services::meta::http::router(meta))
		.merge(crate::services::badges::http::router(badges))
		.fallback(not_found)
		.layer(middleware::catch_panic::layer())
		.layer(middleware::trace::layer(tracing_config.include_http_headers))
		.layer(middleware::request_id::propagate_layer())
		.layer(middleware::request_id::set_layer())
}

async fn not_found() -> HttpError
{
	HttpError::not_found()
}
