//! The error type returned by HTTP handlers.
//!
//! [`HttpError`] is the only error type that reaches clients. It always renders as a JSON object
//! with a single human-readable `detail` field.

use std::borrow::Cow;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

use crate::services::umami::FetchVisitsError;

/// Type alias with a default `Err` type of [`HttpError`].
pub(crate) type Result<T, E = HttpError> = std::result::Result<T, E>;

/// An error response.
#[derive(Debug, Error)]
#[error("{detail}")]
pub(crate) struct HttpError
{
	status: StatusCode,
	detail: Cow<'static, str>,
}

#[derive(Serialize)]
struct ErrorBody<'a>
{
	detail: &'a str,
}

impl HttpError
{
	pub(crate) fn new(status: StatusCode, detail: impl Into<Cow<'static, str>>) -> Self
	{
		Self { status, detail: detail.into() }
	}

	/// Reject a request because it was malformed in some way.
	pub(crate) fn bad_request(detail: impl Into<Cow<'static, str>>) -> Self
	{
		Self::new(StatusCode::BAD_REQUEST, detail)
	}

	pub(crate) fn not_found() -> Self
	{
		Self::new(StatusCode::NOT_FOUND, "not found")
	}

	/// Something went wrong on our side (or further upstream).
	pub(crate) fn internal(detail: impl Into<Cow<'static, str>>) -> Self
	{
		Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
	}

	#[cfg(test)]
	pub(crate) fn status(&self) -> StatusCode
	{
		self.status
	}

	#[cfg(test)]
	pub(crate) fn detail(&self) -> &str
	{
		&self.detail
	}
}

impl IntoResponse for HttpError
{
	fn into_response(self) -> Response
	{
		if self.status.is_server_error() {
			error!(target: "umami_badge::http::errors", status = %self.status, detail = %self.detail, "internal server error");
		} else {
			debug!(target: "umami_badge::http::errors", status = %self.status, detail = %self.detail, "request failed");
		}

		(self.status, Json(ErrorBody { detail: &self.detail })).into_response()
	}
}

impl From<FetchVisitsError> for HttpError
{
	fn from(error: FetchVisitsError) -> Self
	{
		if matches!(error, FetchVisitsError::InvalidWebsiteId(_)) {
			Self::bad_request(error.to_string())
		} else if error.is_configuration_error() {
			Self::internal(format!("configuration error: {error}"))
		} else {
			Self::internal(format!("upstream error: {error}"))
		}
	}
}

impl From<QueryRejection> for HttpError
{
	fn from(rejection: QueryRejection) -> Self
	{
		Self::bad_request(rejection.body_text())
	}
}

impl From<time::error::Format> for HttpError
{
	fn from(error: time::error::Format) -> Self
	{
		Self::internal(format!("failed to format timestamp: {error}"))
	}
}
