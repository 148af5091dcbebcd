//! User-facing commands of a completion session.
//!
//! Keys are bound to [`Action`] values; the session interprets them with the
//! pure helpers in this module and reports an [`Outcome`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::history::expand_file_name_with;
use crate::host::RequireMatch;
use crate::pipeline::CandidateSet;

/// Commands a host binds to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
	GotoFirst,
	GotoLast,
	PageUp,
	PageDown,
	Next,
	Previous,
	/// Replace the completable region with the current candidate.
	InsertCurrent,
	/// Insert the current candidate, then try to commit.
	AcceptCurrent,
	/// Try to commit the input as typed.
	AcceptInput,
	/// Copy the current candidate to the clipboard store.
	CopyCurrent,
	/// Delete the last directory component of a file name input.
	DirectoryUp,
}

impl Action {
	/// Accept actions are the only ones that keep a confirmation pending.
	pub fn is_accept(self) -> bool {
		matches!(self, Self::AcceptCurrent | Self::AcceptInput)
	}
}

/// Result of dispatching an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	/// The session stays open.
	Continue,
	/// The session ends with this value.
	Commit(String),
	/// The input is not a valid completion and a match is required.
	MatchRequired,
	/// The input is not a valid completion; accepting again commits it.
	ConfirmPending,
}

/// Navigation target of `action` from `index`, before clamping.
///
/// Returns `None` for actions that do not move the cursor. With `cycle`,
/// single steps wrap around, passing through the prompt when it is allowed.
pub fn navigation_target(action: Action, index: isize, total: usize, page: usize, cycle: bool, allow_prompt: bool) -> Option<isize> {
	let total = isize::try_from(total).unwrap_or(isize::MAX);
	let page = isize::try_from(page).unwrap_or(isize::MAX);
	let target = match action {
		Action::GotoFirst => 0,
		Action::GotoLast => total - 1,
		Action::PageUp => index.saturating_sub(page),
		Action::PageDown => index.saturating_add(page),
		Action::Next => step(index, 1, total, cycle, allow_prompt),
		Action::Previous => step(index, -1, total, cycle, allow_prompt),
		_ => return None,
	};
	Some(target)
}

fn step(index: isize, n: isize, total: isize, cycle: bool, allow_prompt: bool) -> isize {
	if !cycle || total == 0 {
		return index + n;
	}
	if allow_prompt {
		(index + n + 1).rem_euclid(total + 1) - 1
	} else {
		(index + n).rem_euclid(total)
	}
}

/// Text the cursor stands for: the raw input at the prompt, otherwise the
/// input up to the base followed by the selected candidate.
pub fn candidate_text(input: &str, set: &CandidateSet, index: isize) -> String {
	match set.get(index) {
		Some(candidate) => {
			let head = input.get(..set.base).unwrap_or(input);
			format!("{head}{candidate}")
		}
		None => input.to_string(),
	}
}

/// Decides whether `input` may be committed.
///
/// `valid` is whether the matcher accepts the input as a completion and
/// `confirmed` whether the previous action already asked for confirmation.
pub fn commit_decision(require: RequireMatch, input: &str, valid: bool, confirmed: bool) -> Outcome {
	let commit = || Outcome::Commit(input.to_string());
	if input.is_empty() || valid {
		return commit();
	}
	match require {
		RequireMatch::No | RequireMatch::ConfirmAfterCompletion => commit(),
		RequireMatch::Confirm if confirmed => commit(),
		RequireMatch::Confirm => Outcome::ConfirmPending,
		RequireMatch::Yes => Outcome::MatchRequired,
	}
}

/// Input with its last directory component removed, or `None` when the
/// input does not end at a directory boundary.
///
/// `~/` is expanded first, so going up from it yields the parent of the
/// home directory.
pub fn directory_up(input: &str, home: Option<&Path>) -> Option<String> {
	if !input.ends_with('/') {
		return None;
	}
	let expanded;
	let path = if input == "~/" {
		expanded = expand_file_name_with(input, |_| None, home);
		expanded.as_str()
	} else {
		input
	};
	let trimmed = &path[..path.len() - 1];
	let slash = trimmed.rfind('/')?;
	Some(path[..=slash].to_string())
}
