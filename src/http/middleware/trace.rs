//! Request tracing.
//!
//! Every request gets its own span carrying the request ID, method, URI and peer address, plus
//! the response status and latency once the handler is done.

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::ConnectInfo;
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::request_id::RequestId;
use tower_http::trace::{
	DefaultOnBodyChunk,
	DefaultOnEos,
	DefaultOnRequest,
	MakeSpan,
	OnFailure,
	OnResponse,
	TraceLayer,
};
use tracing::Span;
use tracing::field::{Empty, debug, display};

pub(crate) type Layer = TraceLayer<
	SharedClassifier<ServerErrorsAsFailures>,
	MakeRequestSpan,
	DefaultOnRequest,
	RecordResponse,
	DefaultOnBodyChunk,
	DefaultOnEos,
	LogFailure,
>;

pub(crate) fn layer(include_headers: bool) -> Layer
{
	TraceLayer::new_for_http()
		.make_span_with(MakeRequestSpan { include_headers })
		.on_response(RecordResponse)
		.on_failure(LogFailure)
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct MakeRequestSpan
{
	include_headers: bool,
}

impl<B> MakeSpan<B> for MakeRequestSpan
{
	fn make_span(&mut self, request: &http::Request<B>) -> Span
	{
		let span = info_span! {
			target: "umami_badge::http",
			"request",
			request.id = Empty,
			request.peer_addr = Empty,
			request.method = %request.method(),
			request.uri = %request.uri(),
			request.headers = Empty,
			response.status = Empty,
			latency = Empty,
		};

		if let Some(request_id) = request
			.extensions()
			.get::<RequestId>()
			.and_then(|id| id.header_value().to_str().ok())
		{
			span.record("request.id", request_id);
		}

		if let Some(ConnectInfo(peer_addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
			span.record("request.peer_addr", display(peer_addr));
		}

		if self.include_headers {
			span.record("request.headers", debug(request.headers()));
		}

		span
	}
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct RecordResponse;

impl<B> OnResponse<B> for RecordResponse
{
	fn on_response(self, response: &http::Response<B>, latency: Duration, span: &Span)
	{
		span.record("response.status", display(response.status()))
			.record("latency", debug(latency));

		debug!(target: "umami_badge::http", "finished processing request");
	}
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct LogFailure;

impl OnFailure<ServerErrorsFailureClass> for LogFailure
{
	fn on_failure(&mut self, failure: ServerErrorsFailureClass, _latency: Duration, _span: &Span)
	{
		match failure {
			ServerErrorsFailureClass::Error(error) => {
				error!(target: "umami_badge::runtime::errors", %error, "error occurred during request");
			}
			ServerErrorsFailureClass::StatusCode(status) => {
				error!(target: "umami_badge::runtime::errors", %status, "error occurred during request");
			}
		}
	}
}
