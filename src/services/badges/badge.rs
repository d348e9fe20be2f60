use serde::Serialize;

/// How long clients may cache a badge (in seconds).
pub const CACHE_SECONDS: u32 = 300;

/// A [shields.io endpoint] badge.
///
/// The field names and types are what badge renderers expect and must not change.
///
/// [shields.io endpoint]: https://shields.io/badges/endpoint-badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge
{
	pub schema_version: u8,
	pub label: &'static str,
	pub message: String,
	pub color: &'static str,
	pub is_error: bool,
	pub cache_seconds: u32,
}

impl Badge
{
	/// Builds a visit count badge showing `raw_visits + bias`.
	///
	/// The sum is not clamped, so a large negative bias produces a negative count.
	pub fn visits(raw_visits: i64, bias: i64) -> Self
	{
		let adjusted_visits = i128::from(raw_visits) + i128::from(bias);

		Self {
			schema_version: 1,
			label: "visits",
			message: adjusted_visits.to_string(),
			color: "green",
			is_error: false,
			cache_seconds: CACHE_SECONDS,
		}
	}
}

#[cfg(test)]
mod tests
{
	use serde_json::json;

	use super::Badge;

	#[test]
	fn adds_bias()
	{
		assert_eq!(Badge::visits(10, 5).message, "15");
		assert_eq!(Badge::visits(0, 0).message, "0");
		assert_eq!(Badge::visits(3, -1).message, "2");
	}

	#[test]
	fn negative_results_are_kept()
	{
		let badge = Badge::visits(2, -10);

		assert_eq!(badge.message, "-8");
		assert!(!badge.is_error);
	}

	#[test]
	fn does_not_overflow()
	{
		assert_eq!(Badge::visits(i64::MAX, i64::MAX).message, "18446744073709551614");
		assert_eq!(Badge::visits(i64::MIN, i64::MIN).message, "-18446744073709551616");
	}

	#[test]
	fn serializes_shields_io_shape() -> color_eyre::Result<()>
	{
		assert_eq!(
			serde_json::to_value(Badge::visits(10, 5))?,
			json!({
				"schemaVersion": 1,
				"label": "visits",
				"message": "15",
				"color": "green",
				"isError": false,
				"cacheSeconds": 300,
			}),
		);

		Ok(())
	}
}
