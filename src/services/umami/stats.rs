use serde::Serialize;
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Query parameters for `GET /api/websites/{website_id}/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery<'a>
{
	/// Part of the path, not the query string.
	#[serde(skip)]
	pub website_id: &'a str,

	/// Start of the window, in milliseconds since the Unix epoch.
	pub start_at: i64,

	/// End of the window, in milliseconds since the Unix epoch.
	pub end_at: i64,
}

impl<'a> StatsQuery<'a>
{
	/// Covers everything from the Unix epoch up to now.
	pub fn all_time(website_id: &'a str) -> Self
	{
		Self { website_id, start_at: 0, end_at: now_millis() }
	}
}

fn now_millis() -> i64
{
	let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;

	i64::try_from(millis).unwrap_or(i64::MAX)
}

/// The number of visits Umami reported for a website.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitCount
{
	pub raw_visits: i64,
}

impl VisitCount
{
	/// Extracts the `visits` field from a stats response.
	///
	/// Depending on the Umami version, `visits` is either a number or an object with a `value`
	/// field. If it is missing it counts as 0; anything else is logged and also counts as 0.
	pub fn from_stats(stats: &JsonValue) -> Self
	{
		let raw_visits = match stats.get("visits") {
			None | Some(JsonValue::Null) => Some(0),
			Some(JsonValue::Number(number)) => number.as_i64(),
			Some(JsonValue::Object(object)) => object.get("value").and_then(JsonValue::as_i64),
			Some(other) => {
				warn!(visits = %other, "unexpected type for `visits`");
				Some(0)
			}
		};

		let raw_visits = match raw_visits {
			Some(count) => count,
			None => {
				warn!(%stats, "could not read visit count from Umami response");
				0
			}
		};

		Self { raw_visits }
	}
}
