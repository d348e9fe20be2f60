//! Utilities for unit & integration tests.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::{Router, routing};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

/// A request received by [`StubUmami`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest
{
	pub(crate) website_id: String,
	pub(crate) authorization: Option<String>,
	pub(crate) start_at: Option<i64>,
	pub(crate) end_at: Option<i64>,
}

/// A fake Umami instance listening on an ephemeral local port.
///
/// Only `/api/websites/{website_id}/stats` is served. Every website has a canned status and
/// body; unknown websites get a 404.
#[derive(Debug)]
pub(crate) struct StubUmami
{
	url: Url,
	requests: Arc<Mutex<Vec<RecordedRequest>>>,
	task: JoinHandle<()>,
}

#[derive(Clone)]
struct StubState
{
	responses: Arc<HashMap<String, (StatusCode, &'static str)>>,
	requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsParams
{
	start_at: Option<i64>,
	end_at: Option<i64>,
}

impl StubUmami
{
	pub(crate) async fn start(
		responses: impl IntoIterator<Item = (&'static str, StatusCode, &'static str)>,
	) -> color_eyre::Result<Self>
	{
		let responses = responses
			.into_iter()
			.map(|(website_id, status, body)| (String::from(website_id), (status, body)))
			.collect::<HashMap<_, _>>();

		let requests = Arc::new(Mutex::new(Vec::new()));
		let state = StubState { responses: Arc::new(responses), requests: Arc::clone(&requests) };

		let router = Router::new()
			.route("/api/websites/{website_id}/stats", routing::get(stats))
			.with_state(state);

		let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
		let url = Url::parse(&format!("http://{}", listener.local_addr()?))?;
		let task = tokio::spawn(async move {
			let _ = axum::serve(listener, router).await;
		});

		Ok(Self { url, requests, task })
	}

	pub(crate) fn url(&self) -> &Url
	{
		&self.url
	}

	/// Returns every request received so far.
	pub(crate) fn requests(&self) -> Vec<RecordedRequest>
	{
		self.requests
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}
}

impl Drop for StubUmami
{
	fn drop(&mut self)
	{
		self.task.abort();
	}
}

async fn stats(
	State(state): State<StubState>,
	Path(website_id): Path<String>,
	Query(params): Query<StatsParams>,
	headers: HeaderMap,
) -> impl IntoResponse
{
	let authorization = headers
		.get(AUTHORIZATION)
		.and_then(|value| value.to_str().ok())
		.map(String::from);

	let response = match state.responses.get(&website_id) {
		Some(&(status, body)) => (status, body),
		None => (StatusCode::NOT_FOUND, "website not found"),
	};

	state
		.requests
		.lock()
		.unwrap_or_else(PoisonError::into_inner)
		.push(RecordedRequest {
			website_id,
			authorization,
			start_at: params.start_at,
			end_at: params.end_at,
		});

	(response.0, [(CONTENT_TYPE, "application/json")], response.1)
}
