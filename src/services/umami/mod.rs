//! This module contains the [`UmamiService`].

use std::sync::Arc;

use derive_more::Debug;
use http::StatusCode;
use url::Url;

use crate::config::UmamiConfig;

mod errors;
pub use errors::FetchVisitsError;

mod stats;
pub use stats::{StatsQuery, VisitCount};

/// Value of the `User-Agent` header sent to Umami.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client shared by all requests to Umami.
pub fn http_client(config: &UmamiConfig) -> reqwest::Result<reqwest::Client>
{
	reqwest::Client::builder()
		.user_agent(USER_AGENT)
		.timeout(config.timeout)
		.build()
}

/// The Umami service.
#[derive(Debug, Clone)]
pub struct UmamiService
{
	/// HTTP client so we can make requests to Umami's API.
	#[debug("reqwest::Client")]
	http_client: reqwest::Client,

	/// `None` if either the URL or the token is missing.
	credentials: Option<Arc<Credentials>>,
}

#[derive(Debug)]
struct Credentials
{
	#[debug("{:?}", base_url.as_str())]
	base_url: Url,

	#[debug("<redacted>")]
	token: Box<str>,
}

impl UmamiService
{
	pub fn new(http_client: reqwest::Client, config: &UmamiConfig) -> Self
	{
		let credentials = match (&config.url, config.token.as_deref().map(str::trim)) {
			(Some(base_url), Some(token)) if !token.is_empty() => Some(Arc::new(Credentials {
				base_url: base_url.clone(),
				token: Box::from(token),
			})),
			(url, token) => {
				warn!(
					has_url = url.is_some(),
					has_token = token.is_some_and(|token| !token.is_empty()),
					"Umami is not fully configured; visit badges will be unavailable",
				);

				None
			}
		};

		Self { http_client, credentials }
	}

	/// Returns whether both a base URL and a token are configured.
	#[cfg(test)]
	pub(crate) fn is_configured(&self) -> bool
	{
		self.credentials.is_some()
	}

	/// Fetches the all-time visit count for a website.
	///
	/// Nothing is sent over the network if the service is not configured.
	#[instrument(skip(self), err(Debug, level = "debug"))]
	pub async fn fetch_visits(&self, website_id: &str) -> Result<VisitCount, FetchVisitsError>
	{
		let credentials = self
			.credentials
			.as_deref()
			.ok_or(FetchVisitsError::NotConfigured)?;

		let query = StatsQuery::all_time(website_id);
		let url = credentials.stats_url(query.website_id)?;

		trace!(%url, start_at = query.start_at, end_at = query.end_at, "requesting stats");

		let response = self
			.http_client
			.get(url)
			.bearer_auth(&credentials.token)
			.query(&query)
			.send()
			.await?;

		let status = response.status();

		if status != StatusCode::OK {
			let body = response.text().await.unwrap_or_default();
			debug!(%status, body = body.as_str(), "Umami returned an error");
			return Err(FetchVisitsError::Status { status, body });
		}

		let body = response.bytes().await?;
		let stats = serde_json::from_slice::<serde_json::Value>(&body)
			.map_err(FetchVisitsError::Decode)?;

		Ok(VisitCount::from_stats(&stats))
	}
}

impl Credentials
{
	/// `{base_url}/api/websites/{website_id}/stats`
	fn stats_url(&self, website_id: &str) -> Result<Url, FetchVisitsError>
	{
		// `url` resolves these as relative segments instead of encoding them.
		if matches!(website_id, "." | "..") {
			return Err(FetchVisitsError::InvalidWebsiteId(Box::from(website_id)));
		}

		let mut url = self.base_url.clone();

		url.path_segments_mut()
			.map_err(|()| FetchVisitsError::InvalidBaseUrl(self.base_url.clone()))?
			.pop_if_empty()
			.extend(["api", "websites", website_id, "stats"]);

		Ok(url)
	}
}

#[cfg(test)]
mod tests
{
	use http::StatusCode;

	use super::{Credentials, FetchVisitsError, UmamiService, http_client};
	use crate::config::UmamiConfig;
	use crate::testing::StubUmami;

	fn service(url: Option<&str>, token: Option<&str>) -> color_eyre::Result<UmamiService>
	{
		let config = UmamiConfig {
			url: url.map(str::parse::<url::Url>).transpose()?,
			token: token.map(Box::from),
			..UmamiConfig::default()
		};

		Ok(UmamiService::new(http_client(&config)?, &config))
	}

	#[test]
	fn builds_stats_url() -> color_eyre::Result<()>
	{
		for base_url in ["https://umami.example.com", "https://umami.example.com/"] {
			let credentials = Credentials { base_url: base_url.parse()?, token: Box::from("t") };

			assert_eq!(
				credentials.stats_url("w1")?.as_str(),
				"https://umami.example.com/api/websites/w1/stats",
			);
		}

		let credentials =
			Credentials { base_url: "https://example.com/umami/".parse()?, token: Box::from("t") };

		assert_eq!(
			credentials.stats_url("a/b c")?.as_str(),
			"https://example.com/umami/api/websites/a%2Fb%20c/stats",
		);

		Ok(())
	}

	#[test]
	fn rejects_dot_segment_website_ids() -> color_eyre::Result<()>
	{
		let credentials =
			Credentials { base_url: "https://umami.example.com".parse()?, token: Box::from("t") };

		for website_id in [".", ".."] {
			assert!(matches!(
				credentials.stats_url(website_id),
				Err(FetchVisitsError::InvalidWebsiteId(id)) if &*id == website_id,
			));
		}

		assert_eq!(
			credentials.stats_url("...")?.as_str(),
			"https://umami.example.com/api/websites/.../stats",
		);
		assert_eq!(
			credentials.stats_url("%2e")?.as_str(),
			"https://umami.example.com/api/websites/%252e/stats",
		);

		Ok(())
	}

	#[test]
	fn rejects_cannot_be_a_base_url() -> color_eyre::Result<()>
	{
		let credentials = Credentials { base_url: "mailto:x@y.z".parse()?, token: Box::from("t") };

		assert!(matches!(credentials.stats_url("w1"), Err(FetchVisitsError::InvalidBaseUrl(_))));

		Ok(())
	}

	#[tokio::test]
	async fn fails_without_credentials() -> color_eyre::Result<()>
	{
		let stub = StubUmami::start([("w1", StatusCode::OK, r#"{"visits": 1}"#)]).await?;

		for umami in [
			service(None, None)?,
			service(Some(stub.url().as_str()), None)?,
			service(Some(stub.url().as_str()), Some("  "))?,
			service(None, Some("token"))?,
		] {
			assert!(!umami.is_configured());
			assert!(matches!(umami.fetch_visits("w1").await, Err(FetchVisitsError::NotConfigured)));
		}

		assert!(stub.requests().is_empty());

		Ok(())
	}

	#[tokio::test]
	async fn sends_token_and_all_time_window() -> color_eyre::Result<()>
	{
		let stub = StubUmami::start([("w1", StatusCode::OK, r#"{"visits": 42}"#)]).await?;
		let umami = service(Some(stub.url().as_str()), Some("secret"))?;

		let visits = umami.fetch_visits("w1").await?;

		assert_eq!(visits.raw_visits, 42);

		let requests = stub.requests();

		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].website_id, "w1");
		assert_eq!(requests[0].authorization.as_deref(), Some("Bearer secret"));
		assert_eq!(requests[0].start_at, Some(0));
		assert!(requests[0].end_at.is_some_and(|end_at| end_at > 0));

		Ok(())
	}

	#[tokio::test]
	async fn non_200_is_an_error() -> color_eyre::Result<()>
	{
		let stub = StubUmami::start([("w1", StatusCode::UNAUTHORIZED, "bad token")]).await?;
		let umami = service(Some(stub.url().as_str()), Some("secret"))?;

		let error = umami
			.fetch_visits("w1")
			.await
			.err()
			.ok_or_else(|| color_eyre::eyre::eyre!("request should have failed"))?;

		assert!(
			matches!(&error, FetchVisitsError::Status { status, body } if *status == StatusCode::UNAUTHORIZED && body == "bad token")
		);
		assert!(error.to_string().contains("401"));
		assert!(error.to_string().contains("bad token"));

		Ok(())
	}

	#[tokio::test]
	async fn other_success_statuses_are_errors() -> color_eyre::Result<()>
	{
		let stub = StubUmami::start([("w1", StatusCode::NO_CONTENT, "")]).await?;
		let umami = service(Some(stub.url().as_str()), Some("secret"))?;

		assert!(matches!(
			umami.fetch_visits("w1").await,
			Err(FetchVisitsError::Status { status, .. }) if status == StatusCode::NO_CONTENT,
		));

		Ok(())
	}

	#[tokio::test]
	async fn invalid_json_is_a_decode_error() -> color_eyre::Result<()>
	{
		let stub = StubUmami::start([("w1", StatusCode::OK, "<html>")]).await?;
		let umami = service(Some(stub.url().as_str()), Some("secret"))?;

		assert!(matches!(umami.fetch_visits("w1").await, Err(FetchVisitsError::Decode(_))));

		Ok(())
	}

	#[tokio::test]
	async fn unreachable_upstream_is_an_http_error() -> color_eyre::Result<()>
	{
		// Bind and immediately release a port so nothing is listening on it.
		let addr = std::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))?.local_addr()?;
		let umami = service(Some(&format!("http://{addr}")), Some("secret"))?;

		assert!(matches!(umami.fetch_visits("w1").await, Err(FetchVisitsError::Http(_))));

		Ok(())
	}
}
