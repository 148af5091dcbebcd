//! Matcher contract and two reference matchers.
//!
//! Follows the rustyline pattern where completion returns both the position
//! in the input where replacement begins (`base`) and the candidates. The
//! engine never scores matches itself; it only orders what the matcher
//! returns.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::candidate::{Candidate, PropKind};
use crate::history::expand_file_name_with;

/// All matches for one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matches {
	/// Byte offset in the input where candidate text is appended.
	pub base: usize,
	pub candidates: Vec<Candidate>,
}

/// Produces the full list of candidates matching an input.
pub trait Matcher {
	/// Returns every match for `input`, or `None` when the matcher is
	/// unavailable. Must be idempotent for the same input.
	fn all_completions(&mut self, input: &str) -> Option<Matches>;

	/// True when `input` is itself a valid completion.
	fn test_completion(&self, input: &str) -> bool;
}

type Predicate = Box<dyn Fn(&str) -> bool>;

/// How [`BasicMatcher`] compares input with candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchStyle {
	/// Candidate starts with the input.
	#[default]
	Prefix,
	/// Candidate contains the input anywhere.
	Substring,
}

/// Matcher over a fixed candidate collection.
pub struct BasicMatcher {
	collection: Vec<String>,
	style: MatchStyle,
	ignore_case: bool,
	predicate: Option<Predicate>,
}

impl BasicMatcher {
	pub fn new<I, S>(collection: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			collection: collection.into_iter().map(Into::into).collect(),
			style: MatchStyle::Prefix,
			ignore_case: false,
			predicate: None,
		}
	}

	pub fn with_style(mut self, style: MatchStyle) -> Self {
		self.style = style;
		self
	}

	pub fn ignore_case(mut self, ignore_case: bool) -> Self {
		self.ignore_case = ignore_case;
		self
	}

	/// Restricts matches to candidates accepted by `predicate`.
	pub fn with_predicate(mut self, predicate: impl Fn(&str) -> bool + 'static) -> Self {
		self.predicate = Some(Box::new(predicate));
		self
	}

	fn accepts(&self, candidate: &str) -> bool {
		self.predicate.as_ref().is_none_or(|predicate| predicate(candidate))
	}

	/// Byte range of `input` inside `candidate`, if it matches.
	fn locate(&self, input: &str, candidate: &str) -> Option<std::ops::Range<usize>> {
		if input.is_empty() {
			return Some(0..0);
		}
		let start = if self.ignore_case {
			let folded = candidate.to_lowercase();
			let needle = input.to_lowercase();
			// Case folding can change byte lengths; only trust offsets when it did not.
			if folded.len() != candidate.len() {
				return match self.style {
					MatchStyle::Prefix => folded.starts_with(&needle).then_some(0..0),
					MatchStyle::Substring => folded.contains(&needle).then_some(0..0),
				};
			}
			match self.style {
				MatchStyle::Prefix => folded.starts_with(&needle).then_some(0),
				MatchStyle::Substring => folded.find(&needle),
			}
		} else {
			match self.style {
				MatchStyle::Prefix => candidate.starts_with(input).then_some(0),
				MatchStyle::Substring => candidate.find(input),
			}
		}?;
		Some(start..start + input.len())
	}
}

impl Matcher for BasicMatcher {
	fn all_completions(&mut self, input: &str) -> Option<Matches> {
		let candidates = self
			.collection
			.iter()
			.filter(|candidate| self.accepts(candidate))
			.filter_map(|candidate| {
				let range = self.locate(input, candidate)?;
				Some(Candidate::new(candidate.as_str()).with_prop(range, PropKind::Highlight))
			})
			.collect();
		Some(Matches { base: 0, candidates })
	}

	fn test_completion(&self, input: &str) -> bool {
		self.collection.iter().any(|candidate| {
			let equal = if self.ignore_case {
				candidate.to_lowercase() == input.to_lowercase()
			} else {
				candidate == input
			};
			equal && self.accepts(candidate)
		})
	}
}

/// File name matcher rooted at a directory.
///
/// The input's directory part (up to and including the last `/`) selects the
/// directory to list; the rest is matched as a prefix of entry names.
/// Directories carry a trailing `/`, and the `./` and `../` sentinels are
/// always offered.
pub struct FileMatcher {
	root: PathBuf,
	home: Option<PathBuf>,
}

impl FileMatcher {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
			home: dirs::home_dir(),
		}
	}

	pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
		self.home = home;
		self
	}

	fn resolve(&self, path: &str) -> PathBuf {
		let expanded = expand_file_name_with(path, |name| std::env::var(name).ok(), self.home.as_deref());
		let expanded = Path::new(&expanded);
		if expanded.is_absolute() {
			expanded.to_path_buf()
		} else {
			self.root.join(expanded)
		}
	}
}

impl Matcher for FileMatcher {
	fn all_completions(&mut self, input: &str) -> Option<Matches> {
		let base = input.rfind('/').map_or(0, |slash| slash + 1);
		let (dir, name) = input.split_at(base);
		let entries = match std::fs::read_dir(self.resolve(dir)) {
			Ok(entries) => entries,
			Err(error) => {
				debug!(dir, %error, "directory not listable, no file candidates");
				return Some(Matches { base, candidates: Vec::new() });
			}
		};

		let mut candidates: Vec<Candidate> = ["./", "../"]
			.into_iter()
			.filter(|sentinel| sentinel.starts_with(name))
			.map(Candidate::from)
			.collect();
		for entry in entries.flatten() {
			let file_name = entry.file_name().to_string_lossy().into_owned();
			if !file_name.starts_with(name) {
				continue;
			}
			let is_dir = entry.file_type().is_ok_and(|kind| kind.is_dir());
			let text = if is_dir { format!("{file_name}/") } else { file_name };
			candidates.push(Candidate::new(text).with_prop(0..name.len(), PropKind::Highlight));
		}
		Some(Matches { base, candidates })
	}

	fn test_completion(&self, input: &str) -> bool {
		!input.is_empty() && self.resolve(input).exists()
	}
}
