//! Information about the running service itself.
//!
//! None of this touches Umami; these endpoints work even if it is not configured.

use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::runtime::Environment;

pub mod http;

/// Name reported by every meta endpoint.
pub const SERVICE_NAME: &str = "umami-badge";

/// The crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output of `rustc --version` for the compiler that built this binary.
pub const RUST_VERSION: &str = env!("UMAMI_BADGE_RUSTC_VERSION");

/// The meta service.
#[derive(Debug, Clone, Copy)]
pub struct MetaService
{
	environment: Environment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Welcome
{
	pub message: &'static str,
	pub service: &'static str,
	pub version: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo
{
	pub version: &'static str,
	pub service: &'static str,
	pub rust_version: &'static str,
	pub environment: Environment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Health
{
	pub status: &'static str,
	pub service: &'static str,
	pub version: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status
{
	pub status: &'static str,
	pub service: &'static str,
	pub version: &'static str,

	/// RFC 3339 timestamp of when the response was generated.
	pub timestamp: String,
}

impl MetaService
{
	pub fn new(environment: Environment) -> Self
	{
		Self { environment }
	}

	pub fn welcome(&self) -> Welcome
	{
		Welcome { message: "Welcome to umami-badge", service: SERVICE_NAME, version: VERSION }
	}

	pub fn version(&self) -> VersionInfo
	{
		VersionInfo {
			version: VERSION,
			service: SERVICE_NAME,
			rust_version: RUST_VERSION,
			environment: self.environment,
		}
	}

	pub fn health(&self) -> Health
	{
		Health { status: "healthy", service: SERVICE_NAME, version: VERSION }
	}

	pub fn status(&self) -> Result<Status, time::error::Format>
	{
		let timestamp = OffsetDateTime::now_utc().format(&Rfc3339)?;

		Ok(Status { status: "running", service: SERVICE_NAME, version: VERSION, timestamp })
	}
}
