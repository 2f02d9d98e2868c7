//! Logging initialisation
//!
//! Blocks, the pipeline and hydration report degradation through `tracing`.
//! Binaries call [`init`] once to print those events to stderr.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when neither `RUST_LOG` nor an explicit filter is given
pub const DEFAULT_FILTER: &str = "warn";

/// Logging initialisation errors
#[derive(Error, Debug)]
pub enum LoggingError {
	/// The filter directive does not parse
	#[error("Invalid log filter '{filter}': {reason}")]
	InvalidFilter {
		/// The rejected directive
		filter: String,
		/// Parser message
		reason: String,
	},

	/// A global subscriber is already installed
	#[error("Failed to initialize tracing subscriber: {0}")]
	AlreadyInitialized(String),
}

/// Maps a `-v` count to a filter directive.
pub fn verbosity_filter(verbosity: u8) -> &'static str {
	match verbosity {
		0 => DEFAULT_FILTER,
		1 => "info",
		2 => "debug",
		_ => "trace",
	}
}

/// Builds the filter, preferring `RUST_LOG` when it is set.
pub fn build_env_filter(filter: &str) -> Result<EnvFilter, LoggingError> {
	if filter.trim().is_empty() {
		return Err(LoggingError::InvalidFilter {
			filter: filter.to_string(),
			reason: "filter cannot be empty".to_string(),
		});
	}

	if let Ok(from_env) = EnvFilter::try_from_default_env() {
		return Ok(from_env);
	}

	EnvFilter::try_new(filter).map_err(|e| LoggingError::InvalidFilter {
		filter: filter.to_string(),
		reason: e.to_string(),
	})
}

/// Installs a global stderr subscriber.
///
/// # Errors
///
/// Fails when `filter` is invalid or another subscriber is installed.
pub fn init(filter: &str) -> Result<(), LoggingError> {
	let env_filter = build_env_filter(filter)?;

	let stderr_layer = fmt::layer()
		.with_writer(std::io::stderr)
		.with_target(true)
		.with_filter(env_filter);

	tracing_subscriber::registry()
		.with(stderr_layer)
		.try_init()
		.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(0, "warn")]
	#[case(1, "info")]
	#[case(2, "debug")]
	#[case(7, "trace")]
	fn test_verbosity_filter(#[case] verbosity: u8, #[case] expected: &str) {
		assert_eq!(verbosity_filter(verbosity), expected);
	}

	#[rstest]
	#[case("")]
	#[case("   ")]
	fn test_empty_filter_is_rejected(#[case] filter: &str) {
		let result = build_env_filter(filter);

		assert!(matches!(result, Err(LoggingError::InvalidFilter { .. })));
	}
}
