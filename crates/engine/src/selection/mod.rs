//! Selection state machine.
//!
//! The cursor is either an index into the candidate set or the prompt
//! (`index < 0`), which stands for the raw typed input. Every transition is
//! a total function: out-of-range targets are clamped, never rejected.

use tracing::trace;

use crate::pipeline::CandidateSet;

/// Canonical index of the prompt position.
pub const PROMPT: isize = -1;

/// Cursor over the current candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
	pub index: isize,
	/// Preserve the selected candidate's identity across the next recompute.
	pub keep: bool,
}

/// Before the first candidate set exists the cursor is at the prompt.
impl Default for SelectionState {
	fn default() -> Self {
		Self::initial(true, 0)
	}
}

/// Lowest reachable index: the prompt unless it is forbidden while
/// candidates exist.
pub fn floor(allow_prompt: bool, total: usize) -> isize {
	if !allow_prompt && total > 0 { 0 } else { PROMPT }
}

/// Clamps `target` into `[floor, total - 1]`, or the prompt for an empty set.
pub fn clamp_index(target: isize, total: usize, allow_prompt: bool) -> isize {
	let last = isize::try_from(total).unwrap_or(isize::MAX) - 1;
	target.min(last).max(floor(allow_prompt, total))
}

impl SelectionState {
	/// State at session start.
	pub fn initial(allow_prompt: bool, total: usize) -> Self {
		Self {
			index: floor(allow_prompt, total),
			keep: false,
		}
	}

	pub fn is_prompt(&self) -> bool {
		self.index < 0
	}

	/// Moves the cursor on behalf of the user.
	pub fn goto(&mut self, target: isize, total: usize, allow_prompt: bool) {
		self.keep = true;
		self.index = clamp_index(target, total, allow_prompt);
		trace!(target, index = self.index, total, "goto");
	}

	/// Carries the cursor over from `previous` to `next`.
	///
	/// When identity cannot be preserved the cursor moves to `reset`, which
	/// the caller derives from the preselect policy.
	pub fn reconcile(&mut self, previous: &CandidateSet, next: &CandidateSet, reset: isize, allow_prompt: bool) {
		let carried = match (self.keep, self.index) {
			(true, index) if index < 0 => Some(PROMPT),
			(true, _) => previous
				.get(self.index)
				.and_then(|selected| next.position(selected.as_str()))
				.and_then(|pos| isize::try_from(pos).ok()),
			(false, _) => None,
		};

		match carried {
			Some(index) => self.index = index,
			None => {
				self.keep = false;
				self.index = reset;
			}
		}
		self.index = clamp_index(self.index, next.total, allow_prompt);
		trace!(index = self.index, keep = self.keep, total = next.total, "reconciled selection");
	}
}
