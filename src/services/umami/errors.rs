use http::StatusCode;
use url::Url;

/// Errors that can occur when fetching visit counts from Umami.
#[derive(Debug, Error)]
pub enum FetchVisitsError
{
	/// Either the base URL or the token is missing.
	#[error("Umami is not configured; set `UMAMI_URL` and `UMAMI_TOKEN`")]
	NotConfigured,

	/// The configured base URL can't have path segments appended to it.
	#[error("configured Umami URL `{0}` cannot be used as a base URL")]
	InvalidBaseUrl(Url),

	/// The website ID can't be used as a single path segment.
	#[error("`{0}` is not a valid website ID")]
	InvalidWebsiteId(Box<str>),

	/// Umami responded with something other than `200 OK`.
	#[error("Umami API request failed with status {status}: {body}")]
	Status
	{
		status: StatusCode,
		body: String,
	},

	/// The request could not be sent, timed out, or the body could not be read.
	#[error("failed to make http request to Umami: {0}")]
	Http(#[from] reqwest::Error),

	/// Umami responded with a body that is not JSON.
	#[error("failed to decode Umami API response: {0}")]
	Decode(#[source] serde_json::Error),
}

impl FetchVisitsError
{
	/// Returns `true` if the error is caused by our own configuration rather than by Umami.
	pub fn is_configuration_error(&self) -> bool
	{
		matches!(self, Self::NotConfigured | Self::InvalidBaseUrl(_))
	}
}
