//! A service producing visit count badges.
//!
//! A badge request names a public domain. The domain is resolved to an Umami website ID and a
//! bias via the [`DomainMap`], the all-time visit count is fetched from Umami, and the bias is
//! added on top.

use derive_more::Constructor;

use crate::domains::DomainMap;
use crate::services::umami::{FetchVisitsError, UmamiService};

mod badge;
pub use badge::{Badge, CACHE_SECONDS};

pub mod http;

/// The badge service.
#[derive(Debug, Clone, Constructor)]
pub struct BadgeService
{
	domains: DomainMap,
	umami: UmamiService,
}

impl BadgeService
{
	/// Builds the visit count badge for `domain`.
	#[instrument(skip(self), err(Debug, level = "debug"))]
	pub async fn visits_badge(&self, domain: &str) -> Result<Badge, FetchVisitsError>
	{
		let resolved = self.domains.resolve(domain);

		debug!(website_id = resolved.website_id, bias = resolved.bias, "resolved domain");

		let visits = self.umami.fetch_visits(resolved.website_id).await?;

		Ok(Badge::visits(visits.raw_visits, resolved.bias))
	}
}
