//! This module contains the HTTP handlers for the `/api/visits` endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use http::header::CACHE_CONTROL;
use serde::Deserialize;

use super::{BadgeService, CACHE_SECONDS};
use crate::http::HttpError;
use crate::http::extract::Query;

/// Returns a router for the `/api/visits` endpoint.
pub fn router(badge_service: BadgeService) -> Router
{
	Router::new()
		.route("/api/visits", routing::get(get_visits))
		.with_state(badge_service)
}

#[derive(Debug, Deserialize)]
pub struct VisitsQuery
{
	/// The domain the badge is displayed for.
	pub domain: String,
}

#[instrument(level = "debug", skip(badge_service), err(Debug, level = "debug"))]
async fn get_visits(
	State(badge_service): State<BadgeService>,
	Query(VisitsQuery { domain }): Query<VisitsQuery>,
) -> crate::http::Result<impl IntoResponse>
{
	if domain.is_empty() {
		return Err(HttpError::bad_request("query parameter `domain` must not be empty"));
	}

	let badge = badge_service.visits_badge(&domain).await?;

	let cache_control = format!("max-age={CACHE_SECONDS}");

	Ok(([(CACHE_CONTROL, cache_control)], Json(badge)))
}

