//! Engine configuration.
//!
//! Every option has a default, so an empty TOML document is a valid
//! configuration. Keys are kebab-case:
//!
//! ```toml
//! sort-threshold = 20000
//! count = 10
//! count-format = ["%-6s ", "%s/%s"]
//! group-format = "    %s "
//! cycle = false
//! preselect = "first"
//! sort = "history-length-alpha"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Options recognized by the completion engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EngineConfig {
	/// Candidate count above which sorting is skipped entirely.
	pub sort_threshold: usize,
	/// Number of candidate rows in the visible window.
	pub count: usize,
	/// Whether the count indicator is painted before the prompt.
	pub count_enabled: bool,
	/// Outer and inner templates of the count indicator.
	pub count_format: CountFormat,
	/// Whether group header lines are painted.
	pub group_headers: bool,
	/// Template of a group header line, `%s` is the group title.
	pub group_format: String,
	/// Newline replacement glyph and truncation glyph for multi-line candidates.
	pub multiline: [String; 2],
	/// Whether single-step navigation wraps around through the prompt.
	pub cycle: bool,
	/// Which row is selected when a recompute resets the cursor.
	pub preselect: Preselect,
	/// Sort function used when the metadata provides no override.
	pub sort: SortFunction,
}

/// Templates of the count indicator, `[outer, inner]`.
///
/// The inner template receives `current` and `total`; its result is passed
/// to the outer template as the single `%s` argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[String; 2]", into = "[String; 2]")]
pub struct CountFormat {
	pub outer: String,
	pub inner: String,
}

impl Default for CountFormat {
	fn default() -> Self {
		Self {
			outer: "%-6s ".to_string(),
			inner: "%s/%s".to_string(),
		}
	}
}

impl From<[String; 2]> for CountFormat {
	fn from([outer, inner]: [String; 2]) -> Self {
		Self { outer, inner }
	}
}

impl From<CountFormat> for [String; 2] {
	fn from(format: CountFormat) -> Self {
		[format.outer, format.inner]
	}
}

/// Cursor placement after a recompute that could not preserve the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preselect {
	/// Select the first candidate when there is one.
	#[default]
	First,
	/// Select the prompt whenever the prompt is selectable.
	Prompt,
	/// Select the first candidate and never let navigation reach the prompt
	/// while candidates exist.
	NoPrompt,
	/// Select the prompt when the input names a complete directory.
	Directory,
}

/// Built-in orderings used when the metadata has no sort override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortFunction {
	/// History rank, then length, then text.
	#[default]
	HistoryLengthAlpha,
	/// History rank, then text.
	HistoryAlpha,
	/// Length, then text.
	LengthAlpha,
	/// Text only.
	Alpha,
	/// Keep the matcher's order.
	None,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			sort_threshold: 20_000,
			count: 10,
			count_enabled: true,
			count_format: CountFormat::default(),
			group_headers: true,
			group_format: "    %s ".to_string(),
			multiline: ["↲".to_string(), "…".to_string()],
			cycle: false,
			preselect: Preselect::First,
			sort: SortFunction::HistoryLengthAlpha,
		}
	}
}

impl EngineConfig {
	/// Parses a TOML document and validates the result.
	pub fn from_toml_str(source: &str, origin: &Path) -> Result<Self> {
		let config: Self = toml::from_str(source).map_err(|source| Error::Config {
			path: origin.to_path_buf(),
			source,
		})?;
		config.validate()?;
		Ok(config)
	}

	/// Reads and parses a TOML configuration file.
	pub fn load(path: &Path) -> Result<Self> {
		let source = std::fs::read_to_string(path).map_err(|error| Error::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&source, path)
	}

	/// Checks value domains that serde cannot express.
	pub fn validate(&self) -> Result<()> {
		if self.count == 0 {
			return Err(Error::InvalidOption {
				option: "count",
				reason: "the visible page must hold at least one candidate".to_string(),
			});
		}
		if self.multiline.iter().any(String::is_empty) {
			return Err(Error::InvalidOption {
				option: "multiline",
				reason: "glyphs must not be empty".to_string(),
			});
		}
		Ok(())
	}

	/// Page size as used by window and paging arithmetic.
	pub(crate) fn page(&self) -> usize {
		self.count.max(1)
	}

	/// Newline replacement glyph.
	pub(crate) fn newline_glyph(&self) -> &str {
		&self.multiline[0]
	}
}
