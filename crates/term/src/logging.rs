//! Tracing setup.
//!
//! The terminal is owned by the picker, so logs only ever go to a file:
//! `$MINISEL_LOG_DIR/minisel.<pid>.log`, or the user cache directory.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Filter directives, in `RUST_LOG` syntax.
pub const LOG_ENV: &str = "MINISEL_LOG";
/// Directory for log files.
pub const LOG_DIR_ENV: &str = "MINISEL_LOG_DIR";

pub fn log_dir() -> Option<PathBuf> {
	std::env::var_os(LOG_DIR_ENV)
		.filter(|dir| !dir.is_empty())
		.map(PathBuf::from)
		.or_else(|| dirs::cache_dir().map(|dir| dir.join("minisel")))
}

pub fn default_filter(verbose: bool) -> EnvFilter {
	if verbose {
		EnvFilter::new("minisel=debug,minisel_engine=debug,warn")
	} else {
		EnvFilter::new("minisel=info,minisel_engine=info,warn")
	}
}

/// Installs the file subscriber. Logging stays off when no log file can be
/// opened.
pub fn setup_tracing(verbose: bool) {
	let Some(log_dir) = log_dir() else {
		return;
	};
	if std::fs::create_dir_all(&log_dir).is_err() {
		return;
	}
	let log_path = log_dir.join(format!("minisel.{}.log", std::process::id()));
	let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) else {
		return;
	};

	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default_filter(verbose));
	let file_layer = tracing_subscriber::fmt::layer()
		.with_writer(Mutex::new(file))
		.with_ansi(false)
		.with_target(true);

	tracing_subscriber::registry().with(filter).with(file_layer).init();
	tracing::debug!(path = ?log_path, "tracing initialized");
}
