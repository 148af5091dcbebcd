//! Optional per-session metadata hooks.
//!
//! Every hook defaults to "not provided"; the pipeline and renderer fall back
//! to their built-in behavior for each missing hook independently.

use rustc_hash::FxHashMap;

use crate::candidate::Candidate;

/// Completion category of a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
	/// File names; enables sentinel stripping and path history ranking.
	File,
	/// Any other named category.
	Other(String),
}

/// Candidate decorated by an affixation hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affixed {
	pub text: String,
	pub prefix: String,
	pub suffix: String,
}

/// A labeled run of candidates produced by grouping.
///
/// `members` are indices into the slice passed to [`Metadata::group`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
	pub title: String,
	pub members: Vec<usize>,
}

/// Metadata provider for a completion session.
pub trait Metadata {
	fn category(&self) -> Option<Category> {
		None
	}

	/// Annotation appended after a candidate when no affixation hook exists.
	fn annotate(&self, _candidate: &str) -> Option<String> {
		None
	}

	/// Prefix/suffix decoration for a batch of visible candidates.
	///
	/// Returns `None` when the provider has no affixation hook. Otherwise the
	/// result has one entry per input candidate, in order.
	fn affixate(&self, _candidates: &[&str]) -> Option<Vec<Affixed>> {
		None
	}

	/// Group classifier. `None` means the provider does not group.
	fn group_title(&self, _candidate: &str) -> Option<String> {
		None
	}

	/// Text shown for a candidate inside its group.
	fn group_transform(&self, candidate: &str) -> String {
		candidate.to_string()
	}

	/// Partitions ordered candidates into groups.
	///
	/// The default implementation buckets by [`Metadata::group_title`] with
	/// groups in order of first appearance. Returns `None` when the provider
	/// does not group. Every index must appear in exactly one group.
	fn group(&self, candidates: &[Candidate]) -> Option<Vec<Group>> {
		let first = candidates.first()?;
		self.group_title(first.as_str())?;

		let mut groups: Vec<Group> = Vec::new();
		let mut slots: FxHashMap<String, usize> = FxHashMap::default();
		for (index, candidate) in candidates.iter().enumerate() {
			let title = self.group_title(candidate.as_str()).unwrap_or_default();
			let slot = *slots.entry(title.clone()).or_insert_with(|| {
				groups.push(Group { title, members: Vec::new() });
				groups.len() - 1
			});
			groups[slot].members.push(index);
		}
		Some(groups)
	}

	/// Reorders candidates in place, returning false when the provider has no
	/// sort override (the slice must then be left untouched).
	fn sort_override(&self, _candidates: &mut Vec<Candidate>) -> bool {
		false
	}

	/// Value promoted to the front of the candidate list when present.
	fn default_value(&self) -> Option<String> {
		None
	}
}

/// Metadata provider with every hook absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadata;

impl Metadata for NoMetadata {}

/// Table-driven metadata provider.
///
/// Groups by the text before the first occurrence of a separator, which is
/// enough for "section: item" style candidate lists.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata {
	category: Option<Category>,
	annotations: FxHashMap<String, String>,
	group_separator: Option<String>,
	default_value: Option<String>,
}

impl StaticMetadata {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_category(mut self, category: Category) -> Self {
		self.category = Some(category);
		self
	}

	pub fn with_annotation(mut self, candidate: impl Into<String>, annotation: impl Into<String>) -> Self {
		self.annotations.insert(candidate.into(), annotation.into());
		self
	}

	pub fn with_group_separator(mut self, separator: impl Into<String>) -> Self {
		self.group_separator = Some(separator.into()).filter(|sep: &String| !sep.is_empty());
		self
	}

	pub fn with_default(mut self, value: impl Into<String>) -> Self {
		self.default_value = Some(value.into());
		self
	}
}

impl Metadata for StaticMetadata {
	fn category(&self) -> Option<Category> {
		self.category.clone()
	}

	fn annotate(&self, candidate: &str) -> Option<String> {
		self.annotations.get(candidate).cloned()
	}

	fn group_title(&self, candidate: &str) -> Option<String> {
		let separator = self.group_separator.as_deref()?;
		Some(candidate.split_once(separator).map_or("", |(title, _)| title).to_string())
	}

	fn group_transform(&self, candidate: &str) -> String {
		match self.group_separator.as_deref().and_then(|sep| candidate.split_once(sep)) {
			Some((_, rest)) => rest.to_string(),
			None => candidate.to_string(),
		}
	}

	fn default_value(&self) -> Option<String> {
		self.default_value.clone()
	}
}
