//! Mapping from public domain names to Umami website IDs.
//!
//! Badges are requested by the domain they are displayed on, but Umami identifies websites by
//! an opaque ID. The [`DomainMap`] translates between the two and carries an optional bias that
//! is added to the reported visit count.
//!
//! Domains without a record resolve to themselves with a bias of 0, so callers that already know
//! their website ID can pass it as the domain. Existing badges rely on this, so it has to stay.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;

use crate::config::Config;

/// A single `[[domains]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainRecord
{
	/// The public-facing domain name, matched exactly.
	pub domain: Box<str>,

	/// Umami's ID for the website.
	pub website_id: Box<str>,

	/// Offset added to the visit count reported by Umami.
	#[serde(default)]
	pub bias_count: i64,
}

/// The result of [`DomainMap::resolve()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a>
{
	pub website_id: &'a str,
	pub bias: i64,
}

/// Immutable lookup table built once on startup.
#[derive(Debug, Clone, Default)]
pub struct DomainMap
{
	records: Arc<[DomainRecord]>,
}

impl DomainMap
{
	pub fn new(records: impl IntoIterator<Item = DomainRecord>) -> Self
	{
		let records = records.into_iter().collect::<Arc<[_]>>();
		let mut seen = HashSet::with_capacity(records.len());

		for record in records.iter() {
			if !seen.insert(&*record.domain) {
				warn!(domain = %record.domain, "duplicate domain record; only the first one is used");
			}
		}

		Self { records }
	}

	/// Builds the map from the `[[domains]]` tables followed by the
	/// [`DOMAIN_TO_WEBSITE_MAP`] list.
	///
	/// [`DOMAIN_TO_WEBSITE_MAP`]: crate::config::DOMAIN_TO_WEBSITE_MAP
	pub fn from_config(config: &Config) -> Self
	{
		let from_list = config.domain_list.as_deref().into_iter().flat_map(parse_list);
		let map = Self::new(config.domains.iter().cloned().chain(from_list));

		info!(records = map.len(), "loaded domain map");

		map
	}

	pub(crate) fn len(&self) -> usize
	{
		self.records.len()
	}

	/// Resolves `domain` to a website ID and bias.
	///
	/// The first record with a matching domain wins. If there is none, `domain` itself is
	/// returned as the website ID with a bias of 0.
	pub fn resolve<'a>(&'a self, domain: &'a str) -> Resolved<'a>
	{
		self.records
			.iter()
			.find(|record| *record.domain == *domain)
			.map_or(Resolved { website_id: domain, bias: 0 }, |record| Resolved {
				website_id: &record.website_id,
				bias: record.bias_count,
			})
	}
}

/// Parses a `domain:website_id,domain:website_id` list.
///
/// Entries are split on the first `:`. Entries without one, or with an empty half, are skipped.
pub fn parse_list(list: &str) -> impl Iterator<Item = DomainRecord> + '_
{
	list.split(',')
		.map(str::trim)
		.filter(|entry| !entry.is_empty())
		.filter_map(|entry| {
			let Some((domain, website_id)) = entry
				.split_once(':')
				.map(|(domain, website_id)| (domain.trim(), website_id.trim()))
				.filter(|(domain, website_id)| !domain.is_empty() && !website_id.is_empty())
			else {
				warn!(entry, "skipping malformed domain mapping");
				return None;
			};

			Some(DomainRecord {
				domain: Box::from(domain),
				website_id: Box::from(website_id),
				bias_count: 0,
			})
		})
}

#[cfg(test)]
mod tests
{
	use super::{DomainMap, DomainRecord, Resolved, parse_list};
	use crate::config::Config;

	fn record(domain: &str, website_id: &str, bias_count: i64) -> DomainRecord
	{
		DomainRecord { domain: Box::from(domain), website_id: Box::from(website_id), bias_count }
	}

	#[test]
	fn resolves_mapped_domain()
	{
		let map = DomainMap::new([record("a.com", "w1", 5), record("b.com", "w2", -3)]);

		assert_eq!(map.resolve("a.com"), Resolved { website_id: "w1", bias: 5 });
		assert_eq!(map.resolve("b.com"), Resolved { website_id: "w2", bias: -3 });
	}

	#[test]
	fn unmapped_domain_resolves_to_itself()
	{
		let map = DomainMap::new([record("a.com", "w1", 5)]);

		assert_eq!(map.resolve("unmapped.com"), Resolved { website_id: "unmapped.com", bias: 0 });
		assert_eq!(DomainMap::default().resolve("a.com"), Resolved {
			website_id: "a.com",
			bias: 0
		});
	}

	#[test]
	fn match_is_exact()
	{
		let map = DomainMap::new([record("a.com", "w1", 5)]);

		assert_eq!(map.resolve("A.com").website_id, "A.com");
		assert_eq!(map.resolve("www.a.com").website_id, "www.a.com");
		assert_eq!(map.resolve("a.com ").website_id, "a.com ");
	}

	#[test]
	fn first_match_wins()
	{
		let map = DomainMap::new([record("a.com", "w1", 1), record("a.com", "w2", 2)]);

		assert_eq!(map.len(), 2);
		assert_eq!(map.resolve("a.com"), Resolved { website_id: "w1", bias: 1 });
	}

	#[test]
	fn parses_list()
	{
		let records = parse_list(" a.com:w1 ,b.com:w2,,c.com,:w4,d.com:,e.com:w:5").collect::<Vec<_>>();

		assert_eq!(records, [record("a.com", "w1", 0), record("b.com", "w2", 0), record(
			"e.com", "w:5", 0
		)]);
	}

	#[test]
	fn file_records_take_precedence_over_list()
	{
		let config = Config {
			domains: vec![record("a.com", "from-file", 7)],
			domain_list: Some(Box::from("a.com:from-env,b.com:w2")),
			..Config::default()
		};

		let map = DomainMap::from_config(&config);

		assert_eq!(map.len(), 3);
		assert_eq!(map.resolve("a.com"), Resolved { website_id: "from-file", bias: 7 });
		assert_eq!(map.resolve("b.com"), Resolved { website_id: "w2", bias: 0 });
	}
}
