//! Error types for completion sessions and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that end a completion session or prevent it from starting.
///
/// Policy rejections ("match required") and confirmation prompts are not
/// errors; they are reported through [`crate::Outcome`] and leave the session
/// open.
#[derive(Debug, Error)]
pub enum Error {
	/// The user cancelled the session, possibly while a recompute was in flight.
	#[error("completion aborted")]
	Aborted,

	/// The matcher could not produce a result for the input.
	#[error("matcher produced no result for input {input:?}")]
	MatcherUnavailable {
		/// Input the matcher was asked to complete.
		input: String,
	},

	/// The host's event source failed.
	#[error("failed to read host input: {0}")]
	Host(#[from] std::io::Error),

	/// Error parsing a TOML configuration file.
	#[error("invalid configuration in {path}: {source}")]
	Config {
		/// Path to the file that failed to parse.
		path: PathBuf,
		/// The underlying parse error.
		source: toml::de::Error,
	},

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A configuration value is outside its accepted domain.
	#[error("invalid value for option '{option}': {reason}")]
	InvalidOption {
		/// The option key as written in the config file.
		option: &'static str,
		/// Why the value was rejected.
		reason: String,
	},
}

impl Error {
	/// Returns true for conditions that unwind the whole session.
	pub fn is_abort(&self) -> bool {
		matches!(self, Self::Aborted | Self::MatcherUnavailable { .. })
	}
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
