//! History-based candidate ranking.
//!
//! The ranker turns a most-recent-first history list into a rank table:
//! lower rank means more recently used. File-name histories are scoped to the
//! directory being completed, so `~/src/minisel/Cargo.toml` in history ranks
//! the candidate `minisel/` when completing in `~/src/`.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rank of candidates absent from history.
///
/// History entries at positions at or beyond this value are not recorded, so
/// every real rank is strictly better than `UNSEEN`.
pub const UNSEEN: u64 = 0xFFFF;

/// How history entries relate to candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryKind {
	/// Entries are compared with candidates verbatim.
	#[default]
	Plain,
	/// Entries are file names, scoped to the directory being completed.
	File,
}

/// Session history, most recent entry first.
#[derive(Debug, Clone, Default)]
pub struct History {
	entries: Vec<String>,
	kind: HistoryKind,
	enabled: bool,
}

impl History {
	pub fn new(entries: Vec<String>, kind: HistoryKind) -> Self {
		Self {
			entries,
			kind,
			enabled: true,
		}
	}

	/// History that ranks every candidate as [`UNSEEN`].
	pub fn disabled() -> Self {
		Self::default()
	}

	pub fn kind(&self) -> HistoryKind {
		self.kind
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	pub fn entries(&self) -> &[String] {
		&self.entries
	}
}

#[derive(Debug)]
struct RankCache {
	/// Resolved directory for file histories, `None` for plain ones.
	scope: Option<String>,
	table: FxHashMap<String, u64>,
}

/// Memoized candidate → rank lookup for one completion session.
#[derive(Debug)]
pub struct HistoryRanker {
	cache: Option<RankCache>,
	home: Option<PathBuf>,
}

impl Default for HistoryRanker {
	fn default() -> Self {
		Self::new()
	}
}

impl HistoryRanker {
	pub fn new() -> Self {
		Self {
			cache: None,
			home: dirs::home_dir(),
		}
	}

	/// Uses `home` for `~` expansion and abbreviation instead of the user's
	/// home directory.
	pub fn with_home(home: Option<PathBuf>) -> Self {
		Self { cache: None, home }
	}

	/// Makes the cache current for `history` and the directory part of the
	/// input (`input[..base]`), rebuilding it only when the scope changed.
	pub fn refresh(&mut self, history: &History, dir_input: &str) {
		match history.kind() {
			HistoryKind::File => {
				let dir = expand_file_name_with(dir_input, env_lookup, self.home.as_deref());
				if self.cache.as_ref().is_some_and(|cache| cache.scope.as_deref() == Some(dir.as_str())) {
					return;
				}
				let abbreviated = abbreviate_file_name(&dir, self.home.as_deref());
				let table = build_path_table(history, &dir, abbreviated.as_deref());
				debug!(scope = %dir, entries = table.len(), "rebuilt path history ranks");
				self.cache = Some(RankCache { scope: Some(dir), table });
			}
			HistoryKind::Plain => {
				if self.cache.is_some() {
					return;
				}
				let table = build_plain_table(history);
				debug!(entries = table.len(), "built history ranks");
				self.cache = Some(RankCache { scope: None, table });
			}
		}
	}

	/// Rank of `candidate`; [`UNSEEN`] when absent or before any refresh.
	pub fn rank(&self, candidate: &str) -> u64 {
		self.cache
			.as_ref()
			.and_then(|cache| cache.table.get(candidate).copied())
			.unwrap_or(UNSEEN)
	}

	/// Directory the cache is scoped to, for file histories.
	pub fn scope(&self) -> Option<&str> {
		self.cache.as_ref().and_then(|cache| cache.scope.as_deref())
	}

	/// Drops the cache so the next refresh rebuilds it.
	pub fn invalidate(&mut self) {
		self.cache = None;
	}
}

fn recorded_entries(history: &History) -> impl Iterator<Item = (u64, &str)> {
	let limit = if history.is_enabled() { UNSEEN as usize } else { 0 };
	history
		.entries()
		.iter()
		.take(limit)
		.enumerate()
		.map(|(index, entry)| (index as u64, entry.as_str()))
}

fn build_plain_table(history: &History) -> FxHashMap<String, u64> {
	let mut table = FxHashMap::default();
	for (index, entry) in recorded_entries(history) {
		table.entry(entry.to_string()).or_insert(index);
	}
	table
}

fn build_path_table(history: &History, dir: &str, abbreviated: Option<&str>) -> FxHashMap<String, u64> {
	let mut table = FxHashMap::default();
	for (index, entry) in recorded_entries(history) {
		let Some(rest) = entry
			.strip_prefix(dir)
			.or_else(|| abbreviated.and_then(|adir| entry.strip_prefix(adir)))
		else {
			continue;
		};
		let key = match rest.find('/') {
			Some(slash) => &rest[..=slash],
			None => rest,
		};
		if !key.is_empty() {
			table.entry(key.to_string()).or_insert(index);
		}
	}
	table
}

fn env_lookup(name: &str) -> Option<String> {
	std::env::var(name).ok()
}

/// Expands `$VAR`, `${VAR}`, `$$` and a leading `~` in a file name.
///
/// Unknown variables are left as written.
pub fn expand_file_name_with(input: &str, lookup: impl Fn(&str) -> Option<String>, home: Option<&Path>) -> String {
	let substituted = substitute_env(input, &lookup);
	let Some(home) = home else {
		return substituted;
	};
	let home = home.to_string_lossy();
	if substituted == "~" {
		return home.into_owned();
	}
	match substituted.strip_prefix("~/") {
		Some(rest) => format!("{}/{rest}", home.trim_end_matches('/')),
		None => substituted,
	}
}

fn substitute_env(input: &str, lookup: &impl Fn(&str) -> Option<String>) -> String {
	let mut out = String::with_capacity(input.len());
	let mut rest = input;
	while let Some(dollar) = rest.find('$') {
		out.push_str(&rest[..dollar]);
		let after = &rest[dollar + 1..];

		if let Some(tail) = after.strip_prefix('$') {
			out.push('$');
			rest = tail;
			continue;
		}

		let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
			match braced.find('}') {
				Some(close) => (&braced[..close], close + 2),
				None => ("", 0),
			}
		} else {
			let len = after
				.find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
				.unwrap_or(after.len());
			(&after[..len], len)
		};

		match (!name.is_empty()).then(|| lookup(name)).flatten() {
			Some(value) => out.push_str(&value),
			None => out.push_str(&rest[dollar..dollar + 1 + consumed]),
		}
		rest = &after[consumed..];
	}
	out.push_str(rest);
	out
}

/// Home-relative form of `path` (`/home/u/src/` → `~/src/`), if it is under
/// `home`.
pub fn abbreviate_file_name(path: &str, home: Option<&Path>) -> Option<String> {
	let home = home?.to_string_lossy();
	let home = home.trim_end_matches('/');
	if home.is_empty() {
		return None;
	}
	let rest = path.strip_prefix(home)?;
	(rest.is_empty() || rest.starts_with('/')).then(|| format!("~{rest}"))
}

#[cfg(test)]
mod tests;
