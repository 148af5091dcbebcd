//! Completion candidates.
//!
//! A candidate is a plain string for every purpose except display: matchers
//! may attach byte-range properties (hidden markup, display replacements,
//! match highlighting) that only the renderer looks at. Identity, ordering
//! and hashing ignore the properties.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use smallvec::SmallVec;

/// Display property attached to a byte range of a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropKind {
	/// The range is not shown.
	Invisible,
	/// The range is shown as the given text instead.
	Display(String),
	/// The range matched the input and is highlighted.
	Highlight,
}

/// A property over `range` (byte offsets into the candidate text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextProp {
	pub range: Range<usize>,
	pub kind: PropKind,
}

/// A single completion suggestion.
#[derive(Debug, Clone, Default)]
pub struct Candidate {
	text: String,
	props: SmallVec<[TextProp; 2]>,
}

impl Candidate {
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			props: SmallVec::new(),
		}
	}

	/// Adds a property, clamping its range to the text and to char boundaries.
	pub fn with_prop(mut self, range: Range<usize>, kind: PropKind) -> Self {
		let end = floor_boundary(&self.text, range.end.min(self.text.len()));
		let start = floor_boundary(&self.text, range.start.min(end));
		if start < end || matches!(kind, PropKind::Display(_)) {
			self.props.push(TextProp { range: start..end, kind });
		}
		self
	}

	pub fn as_str(&self) -> &str {
		&self.text
	}

	pub fn props(&self) -> &[TextProp] {
		&self.props
	}

	/// Length in characters, the unit used by length-based sorting.
	pub fn char_len(&self) -> usize {
		self.text.chars().count()
	}

	pub fn into_string(self) -> String {
		self.text
	}
}

fn floor_boundary(text: &str, mut idx: usize) -> usize {
	while idx > 0 && !text.is_char_boundary(idx) {
		idx -= 1;
	}
	idx
}

impl PartialEq for Candidate {
	fn eq(&self, other: &Self) -> bool {
		self.text == other.text
	}
}

impl Eq for Candidate {}

impl PartialEq<str> for Candidate {
	fn eq(&self, other: &str) -> bool {
		self.text == other
	}
}

impl PartialEq<&str> for Candidate {
	fn eq(&self, other: &&str) -> bool {
		self.text == *other
	}
}

impl Hash for Candidate {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.text.hash(state);
	}
}

impl PartialOrd for Candidate {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Candidate {
	fn cmp(&self, other: &Self) -> Ordering {
		self.text.cmp(&other.text)
	}
}

impl From<&str> for Candidate {
	fn from(text: &str) -> Self {
		Self::new(text)
	}
}

impl From<String> for Candidate {
	fn from(text: String) -> Self {
		Self::new(text)
	}
}

impl AsRef<str> for Candidate {
	fn as_ref(&self) -> &str {
		&self.text
	}
}

impl std::fmt::Display for Candidate {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.text)
	}
}
