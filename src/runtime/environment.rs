use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The environment the service is deployed in.
///
/// This is reported by `GET /api/version`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment
{
	#[default]
	Development,
	Testing,
	Staging,
	Production,
}

#[derive(Debug, Error)]
#[error("unknown environment `{0}`; expected one of `development`, `testing`, `staging`, `production`")]
pub struct ParseEnvironmentError(Box<str>);

impl Environment
{
	pub fn as_str(&self) -> &'static str
	{
		match self {
			Self::Development => "development",
			Self::Testing => "testing",
			Self::Staging => "staging",
			Self::Production => "production",
		}
	}
}

impl fmt::Display for Environment
{
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		fmt.write_str(self.as_str())
	}
}

impl FromStr for Environment
{
	type Err = ParseEnvironmentError;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		match value.trim().to_ascii_lowercase().as_str() {
			"development" | "dev" => Ok(Self::Development),
			"testing" | "test" => Ok(Self::Testing),
			"staging" => Ok(Self::Staging),
			"production" | "prod" => Ok(Self::Production),
			_ => Err(ParseEnvironmentError(Box::from(value))),
		}
	}
}

#[cfg(test)]
mod tests
{
	use super::Environment;

	#[test]
	fn parses_case_insensitively()
	{
		assert!(matches!("Production".parse::<Environment>(), Ok(Environment::Production)));
		assert!(matches!(" dev ".parse::<Environment>(), Ok(Environment::Development)));
		assert!("qa".parse::<Environment>().is_err());
	}

	#[test]
	fn display_matches_serde() -> color_eyre::Result<()>
	{
		for environment in [
			Environment::Development,
			Environment::Testing,
			Environment::Staging,
			Environment::Production,
		] {
			assert_eq!(serde_json::to_value(environment)?, environment.to_string());
		}

		Ok(())
	}
}
