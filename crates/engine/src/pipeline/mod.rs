//! Candidate pipeline: matcher call, filtering, ranking, default promotion
//! and grouping.

mod sort;

use tracing::{debug, warn};

pub use self::sort::{LENGTH_BITS, LENGTH_MAX, RANK_MAX, packed_key, sort_candidates};
use crate::candidate::Candidate;
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::history::{History, HistoryRanker};
use crate::host::HostSurface;
use crate::matcher::Matcher;
use crate::metadata::{Category, Group, Metadata};

/// Directory sentinels removed from file completions.
const FILE_SENTINELS: [&str; 2] = ["./", "../"];

/// Ordered matches for one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
	/// Byte offset in the input where candidate text is appended.
	pub base: usize,
	/// Number of matches, equal to `items.len()`.
	pub total: usize,
	pub items: Vec<Candidate>,
}

impl CandidateSet {
	pub fn get(&self, index: isize) -> Option<&Candidate> {
		usize::try_from(index).ok().and_then(|index| self.items.get(index))
	}

	pub fn position(&self, text: &str) -> Option<usize> {
		self.items.iter().position(|candidate| candidate == text)
	}
}

/// Result of a recompute that was not aborted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recompute {
	Ready(CandidateSet),
	/// A newer input arrived while the matcher ran; nothing may be applied.
	Superseded,
}

/// Collaborators of one recompute.
pub struct Stage<'a> {
	pub matcher: &'a mut dyn Matcher,
	pub metadata: &'a dyn Metadata,
	pub host: &'a dyn HostSurface,
	pub history: &'a History,
	pub ranker: &'a mut HistoryRanker,
	pub config: &'a EngineConfig,
}

/// Computes the ordered candidate set for `input`.
pub fn recompute(input: &str, stage: &mut Stage<'_>) -> Result<Recompute> {
	let matches = stage.matcher.all_completions(input);

	if stage.host.interrupted() {
		return Err(Error::Aborted);
	}
	if stage.host.input_pending() {
		debug!(input, "recompute superseded by newer input");
		return Ok(Recompute::Superseded);
	}

	let Some(matches) = matches else {
		warn!(input, "matcher unavailable");
		return Err(Error::MatcherUnavailable { input: input.to_string() });
	};

	let base = clamp_base(input, matches.base);
	let mut items = matches.candidates;
	if stage.metadata.category() == Some(Category::File) {
		items.retain(|candidate| !FILE_SENTINELS.contains(&candidate.as_str()));
	}
	let total = items.len();

	let sorted = total <= stage.config.sort_threshold;
	if sorted && !stage.metadata.sort_override(&mut items) {
		stage.ranker.refresh(stage.history, &input[..base]);
		items = sort_candidates(items, stage.config.sort, stage.ranker);
	}

	if let Some(default) = stage.metadata.default_value() {
		promote(&mut items, &default);
	}

	let items = apply_groups(items, stage.metadata);
	debug!(input, base, total, sorted, "recomputed candidates");

	Ok(Recompute::Ready(CandidateSet { base, total, items }))
}

fn clamp_base(input: &str, base: usize) -> usize {
	let mut base = base.min(input.len());
	while !input.is_char_boundary(base) {
		base -= 1;
	}
	base
}

/// Moves the first occurrence of `default` to the front.
pub fn promote(items: &mut Vec<Candidate>, default: &str) {
	if let Some(pos) = items.iter().position(|candidate| candidate == default) {
		let candidate = items.remove(pos);
		items.insert(0, candidate);
	}
}

/// Flattens the metadata's groups back into one sequence.
///
/// A grouping that is not a permutation of the input is ignored, so grouping
/// can never add or drop candidates.
pub fn apply_groups(items: Vec<Candidate>, metadata: &dyn Metadata) -> Vec<Candidate> {
	let Some(groups) = metadata.group(&items) else {
		return items;
	};
	if !is_partition(&groups, items.len()) {
		warn!(total = items.len(), "group classifier returned an invalid partition, keeping order");
		return items;
	}

	let mut slots: Vec<Option<Candidate>> = items.into_iter().map(Some).collect();
	groups
		.iter()
		.flat_map(|group| group.members.iter())
		.filter_map(|&index| slots[index].take())
		.collect()
}

fn is_partition(groups: &[Group], len: usize) -> bool {
	let mut seen = vec![false; len];
	let mut count = 0usize;
	for &index in groups.iter().flat_map(|group| group.members.iter()) {
		match seen.get_mut(index) {
			Some(slot) if !*slot => {
				*slot = true;
				count += 1;
			}
			_ => return false,
		}
	}
	count == len
}
