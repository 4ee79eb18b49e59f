use std::{net::IpAddr, path::PathBuf, str::FromStr};

use tracing::level_filters::LevelFilter;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{name} has an invalid value: {value:?}")]
	Invalid { name: &'static str, value: String },
}

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
	pub host: IpAddr,
	pub port: u16,
	/// When unset, ideas are only kept in memory.
	pub database_url: Option<String>,
	/// PDF references are resolved relative to this directory.
	pub upload_dir: PathBuf,
	pub log_level: LevelFilter,
	/// When unset, spans are not exported.
	pub otlp_endpoint: Option<String>,
}

impl Config {
	pub fn from_env() -> Result<Self, Error> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
		// Empty values count as unset
		let lookup = |name: &str| lookup(name).filter(|value| !value.is_empty());

		Ok(Self {
			host: parse(&lookup, "HOST", IpAddr::from([127, 0, 0, 1]))?,
			port: parse(&lookup, "PORT", 3000)?,
			database_url: lookup("DATABASE_URL"),
			upload_dir: lookup("UPLOAD_DIR").map_or_else(|| PathBuf::from("uploads"), PathBuf::from),
			log_level: parse(&lookup, "LOG_LEVEL", LevelFilter::INFO)?,
			otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT"),
		})
	}
}

fn parse<T: FromStr>(
	lookup: impl Fn(&str) -> Option<String>,
	name: &'static str,
	default: T,
) -> Result<T, Error> {
	match lookup(name) {
		Some(value) => value.parse().map_err(|_| Error::Invalid { name, value }),
		None => Ok(default),
	}
}
