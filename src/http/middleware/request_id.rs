use tower_http::request_id::{
	MakeRequestId,
	PropagateRequestIdLayer,
	RequestId,
	SetRequestIdLayer,
};
use uuid::Uuid;

/// Assigns an `x-request-id` to requests that don't already carry one.
pub(crate) fn set_layer() -> SetRequestIdLayer<MakeUuidv7RequestId>
{
	SetRequestIdLayer::x_request_id(MakeUuidv7RequestId)
}

/// Copies the request's `x-request-id` onto the response.
pub(crate) fn propagate_layer() -> PropagateRequestIdLayer
{
	PropagateRequestIdLayer::x_request_id()
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct MakeUuidv7RequestId;

impl MakeRequestId for MakeUuidv7RequestId
{
	fn make_request_id<B>(&mut self, _: &http::Request<B>) -> Option<RequestId>
	{
		Uuid::now_v7()
			.hyphenated()
			.to_string()
			.parse::<http::HeaderValue>()
			.inspect_err(|error| warn!(%error, "failed to generate request id"))
			.map(RequestId::new)
			.ok()
	}
}
