//! Configuration file of the `minisel` binary.
//!
//! ```toml
//! [engine]
//! count = 12
//! cycle = true
//!
//! [history]
//! file = "~/.local/state/minisel/history"
//! kind = "plain"
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use minisel_engine::{EngineConfig, History, HistoryKind};
use serde::Deserialize;
use tracing::debug;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "MINISEL_CONFIG";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
	pub engine: EngineConfig,
	pub history: HistoryConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct HistoryConfig {
	pub file: Option<PathBuf>,
	pub kind: HistoryKind,
}

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
	/// Given on the command line or in the environment; must exist.
	Explicit(PathBuf),
	/// The per-user default location; may be absent.
	Default(PathBuf),
	None,
}

/// Resolves `--config`, then `$MINISEL_CONFIG`, then the user config dir.
pub fn resolve(flag: Option<PathBuf>, env: Option<OsString>, config_dir: Option<PathBuf>) -> ConfigSource {
	if let Some(path) = flag {
		return ConfigSource::Explicit(path);
	}
	if let Some(path) = env.filter(|value| !value.is_empty()) {
		return ConfigSource::Explicit(PathBuf::from(path));
	}
	match config_dir {
		Some(dir) => ConfigSource::Default(dir.join("minisel").join("config.toml")),
		None => ConfigSource::None,
	}
}

pub fn load(source: &ConfigSource) -> Result<FileConfig> {
	let path = match source {
		ConfigSource::Explicit(path) => path,
		ConfigSource::Default(path) if path.exists() => path,
		ConfigSource::Default(_) | ConfigSource::None => return Ok(FileConfig::default()),
	};
	let text = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
	let config = parse(&text).with_context(|| format!("invalid configuration in {}", path.display()))?;
	debug!(path = %path.display(), "loaded configuration");
	Ok(config)
}

pub fn parse(text: &str) -> Result<FileConfig> {
	let config: FileConfig = toml::from_str(text)?;
	config.engine.validate()?;
	Ok(config)
}

/// Reads a history file. Lines are stored oldest first; the result is most
/// recent first. A missing file is an empty history.
pub fn read_history(path: &Path, kind: HistoryKind) -> Result<History> {
	let text = match std::fs::read_to_string(path) {
		Ok(text) => text,
		Err(error) if error.kind() == std::io::ErrorKind::NotFound => String::new(),
		Err(error) => return Err(error).with_context(|| format!("failed to read history {}", path.display())),
	};
	let entries = text.lines().rev().filter(|line| !line.is_empty()).map(str::to_string).collect();
	Ok(History::new(entries, kind))
}

/// Appends a committed value to the history file.
pub fn append_history(path: &Path, value: &str) -> Result<()> {
	use std::io::Write;

	if value.is_empty() || value.contains('\n') {
		return Ok(());
	}
	if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
		std::fs::create_dir_all(parent)?;
	}
	let mut file = std::fs::OpenOptions::new()
		.create(true)
		.append(true)
		.open(path)
		.with_context(|| format!("failed to open history {}", path.display()))?;
	writeln!(file, "{value}")?;
	Ok(())
}
