//! Candidate orderings.
//!
//! Sorting decorates each candidate with a packed integer key in a transient
//! [`Keyed`] wrapper, sorts, and strips the wrapper again. The history rank
//! occupies the high bits and the character length the low
//! [`LENGTH_BITS`]; both saturate instead of wrapping.

use std::cmp::Ordering;

use crate::candidate::Candidate;
use crate::config::SortFunction;
use crate::history::HistoryRanker;

/// Bits reserved for the length component of a packed key.
pub const LENGTH_BITS: u32 = 13;
/// Largest length representable in a packed key; longer candidates tie.
pub const LENGTH_MAX: u64 = (1 << LENGTH_BITS) - 1;
/// Largest rank representable in a packed key.
pub const RANK_MAX: u64 = (1 << (u64::BITS - LENGTH_BITS)) - 1;

/// Packs `(rank, length)` into one ascending key.
pub fn packed_key(rank: u64, length: usize) -> u64 {
	let length = u64::try_from(length).unwrap_or(u64::MAX).min(LENGTH_MAX);
	(rank.min(RANK_MAX) << LENGTH_BITS) | length
}

/// Candidate decorated with its sort key for the duration of one sort.
struct Keyed {
	key: u64,
	candidate: Candidate,
}

impl Keyed {
	fn order(&self, other: &Self) -> Ordering {
		self.key
			.cmp(&other.key)
			.then_with(|| self.candidate.as_str().cmp(other.candidate.as_str()))
	}
}

/// Sorts `candidates` with `function`. Stable for equal candidates.
pub fn sort_candidates(candidates: Vec<Candidate>, function: SortFunction, ranker: &HistoryRanker) -> Vec<Candidate> {
	let key: fn(&Candidate, &HistoryRanker) -> u64 = match function {
		SortFunction::None => return candidates,
		SortFunction::HistoryLengthAlpha => history_length_key,
		SortFunction::HistoryAlpha => history_key,
		SortFunction::LengthAlpha => length_key,
		SortFunction::Alpha => alpha_key,
	};

	let mut keyed: Vec<Keyed> = candidates
		.into_iter()
		.map(|candidate| Keyed {
			key: key(&candidate, ranker),
			candidate,
		})
		.collect();
	keyed.sort_by(Keyed::order);
	keyed.into_iter().map(|keyed| keyed.candidate).collect()
}

fn history_length_key(candidate: &Candidate, ranker: &HistoryRanker) -> u64 {
	packed_key(ranker.rank(candidate.as_str()), candidate.char_len())
}

fn history_key(candidate: &Candidate, ranker: &HistoryRanker) -> u64 {
	ranker.rank(candidate.as_str())
}

fn length_key(candidate: &Candidate, _: &HistoryRanker) -> u64 {
	packed_key(0, candidate.char_len())
}

fn alpha_key(_: &Candidate, _: &HistoryRanker) -> u64 {
	0
}
