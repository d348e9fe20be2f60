//! This module contains the HTTP handlers for `/` and the `/api/{version,health,status}`
//! endpoints.

use axum::extract::State;
use axum::{Json, Router, routing};

use super::{Health, MetaService, Status, VersionInfo, Welcome};

/// Returns a router for the meta endpoints.
pub fn router(meta_service: MetaService) -> Router
{
	Router::new()
		.route("/", routing::get(welcome))
		.route("/api/version", routing::get(version))
		.route("/api/health", routing::get(health))
		.route("/api/status", routing::get(status))
		.with_state(meta_service)
}

async fn welcome(State(meta_service): State<MetaService>) -> Json<Welcome>
{
	Json(meta_service.welcome())
}

async fn version(State(meta_service): State<MetaService>) -> Json<VersionInfo>
{
	Json(meta_service.version())
}

async fn health(State(meta_service): State<MetaService>) -> Json<Health>
{
	Json(meta_service.health())
}

#[instrument(level = "debug", skip_all, err(Debug, level = "debug"))]
async fn status(State(meta_service): State<MetaService>) -> crate::http::Result<Json<Status>>
{
	let status = meta_service.status()?;

	Ok(Json(status))
}
