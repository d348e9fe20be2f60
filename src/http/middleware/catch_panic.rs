//! A middleware for catching panics.
//!
//! Normally, if an HTTP handler panics, the connection will simply be closed.
//! This middleware will catch panics and return a proper HTTP response.

use std::any::Any;

use axum::response::IntoResponse;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

use crate::http::HttpError;
use crate::runtime::panic_hook;

pub(crate) fn layer() -> CatchPanicLayer<PanicHandler>
{
	CatchPanicLayer::custom(PanicHandler)
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PanicHandler;

impl ResponseForPanic for PanicHandler
{
	type ResponseBody = axum::body::Body;

	fn response_for_panic(
		&mut self,
		payload: Box<dyn Any + Send + 'static>,
	) -> http::Response<Self::ResponseBody>
	{
		let message = panic_hook::message(&*payload).unwrap_or("unknown error");

		error!(panic = message, "http handler panicked");

		HttpError::internal(format!("internal server error: {message}")).into_response()
	}
}
