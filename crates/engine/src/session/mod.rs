//! Completion session.
//!
//! A [`Session`] owns all per-session state: the last candidate set, the
//! selection, the history rank cache and a pending confirmation. The
//! matcher, metadata and host are borrowed per call. [`read_completion`]
//! wraps a host's input loop around one session and returns the committed
//! value.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::actions::{Action, Outcome, candidate_text, commit_decision, directory_up, navigation_target};
use crate::config::{EngineConfig, Preselect};
use crate::error::{Error, Result};
use crate::history::{History, HistoryRanker};
use crate::host::{HostEvent, HostSurface, InputSource};
use crate::matcher::Matcher;
use crate::metadata::{Category, Metadata};
use crate::pipeline::{CandidateSet, Recompute, Stage, recompute};
use crate::render::{self, Frame, View};
use crate::selection::{PROMPT, SelectionState};

/// Candidate source and metadata of a session.
pub struct Sources<'a> {
	pub matcher: &'a mut dyn Matcher,
	pub metadata: &'a dyn Metadata,
}

impl<'a> Sources<'a> {
	pub fn new(matcher: &'a mut dyn Matcher, metadata: &'a dyn Metadata) -> Self {
		Self { matcher, metadata }
	}
}

/// State of one completion session.
#[derive(Debug)]
pub struct Session {
	config: EngineConfig,
	history: History,
	ranker: HistoryRanker,
	set: CandidateSet,
	selection: SelectionState,
	/// Input the current candidate set was computed for.
	input: Option<String>,
	confirm_pending: bool,
	home: Option<PathBuf>,
}

impl Session {
	pub fn new(config: EngineConfig, history: History) -> Self {
		Self {
			config,
			history,
			ranker: HistoryRanker::new(),
			set: CandidateSet::default(),
			selection: SelectionState::default(),
			input: None,
			confirm_pending: false,
			home: dirs::home_dir(),
		}
	}

	/// Uses `home` for `~` handling instead of the user's home directory.
	pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
		self.ranker = HistoryRanker::with_home(home.clone());
		self.home = home;
		self
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	pub fn selection(&self) -> SelectionState {
		self.selection
	}

	pub fn is_confirm_pending(&self) -> bool {
		self.confirm_pending
	}

	/// Candidate set of the last completed recompute.
	pub fn current_candidate_set(&self) -> &CandidateSet {
		&self.set
	}

	/// Text the cursor stands for, `None` before the first recompute.
	pub fn current_candidate(&self) -> Option<String> {
		let input = self.input.as_deref()?;
		Some(candidate_text(input, &self.set, self.selection.index))
	}

	/// Forgets a pending confirmation; any non-accept input does this.
	pub fn cancel_confirmation(&mut self) {
		self.confirm_pending = false;
	}

	fn allow_prompt(&self, host: &dyn HostSurface) -> bool {
		!host.require_match().is_required() && self.config.preselect != Preselect::NoPrompt
	}

	/// Recomputes candidates if the host's input changed.
	///
	/// Returns false when a newer input superseded the recompute; the
	/// previous state is then left untouched and nothing should be painted.
	pub fn update(&mut self, host: &dyn HostSurface, sources: &mut Sources<'_>) -> Result<bool> {
		let input = host.current_text();
		if self.input.as_deref() == Some(input.as_str()) {
			return Ok(true);
		}

		let mut stage = Stage {
			matcher: &mut *sources.matcher,
			metadata: sources.metadata,
			host,
			history: &self.history,
			ranker: &mut self.ranker,
			config: &self.config,
		};
		let set = match recompute(&input, &mut stage)? {
			Recompute::Ready(set) => set,
			Recompute::Superseded => return Ok(false),
		};

		let reset = self.preselect_index(&input, &set, sources);
		let allow_prompt = self.allow_prompt(host);
		self.selection.reconcile(&self.set, &set, reset, allow_prompt);
		self.set = set;
		self.input = Some(input);
		Ok(true)
	}

	fn preselect_index(&self, input: &str, set: &CandidateSet, sources: &Sources<'_>) -> isize {
		let first = if set.total > 0 { 0 } else { PROMPT };
		match self.config.preselect {
			Preselect::First | Preselect::NoPrompt => first,
			Preselect::Prompt => PROMPT,
			Preselect::Directory => {
				let directory = input.ends_with('/')
					&& sources.metadata.category() == Some(Category::File)
					&& sources.matcher.test_completion(input);
				if directory { PROMPT } else { first }
			}
		}
	}

	/// Renders the current state.
	pub fn frame(&self, host: &dyn HostSurface, metadata: &dyn Metadata) -> Frame {
		let view = View {
			set: &self.set,
			index: self.selection.index,
			require_match: host.require_match().is_required(),
			columns: host.columns(),
		};
		render::render(view, metadata, &self.config)
	}

	/// Renders the current state and paints it onto the host.
	pub fn exhibit(&self, host: &mut dyn HostSurface, metadata: &dyn Metadata) {
		let frame = self.frame(&*host, metadata);
		render::paint(&frame, host);
	}

	/// Runs one user command.
	pub fn dispatch(&mut self, action: Action, host: &mut dyn HostSurface, sources: &mut Sources<'_>) -> Result<Outcome> {
		let confirmed = std::mem::take(&mut self.confirm_pending) && action.is_accept();
		let allow_prompt = self.allow_prompt(&*host);

		if let Some(target) = navigation_target(
			action,
			self.selection.index,
			self.set.total,
			self.config.page(),
			self.config.cycle,
			allow_prompt,
		) {
			self.selection.goto(target, self.set.total, allow_prompt);
			return Ok(Outcome::Continue);
		}

		match action {
			Action::InsertCurrent => {
				self.insert_current(host);
				Ok(Outcome::Continue)
			}
			Action::AcceptCurrent => Ok(self.accept(host, sources, false, confirmed)),
			Action::AcceptInput => Ok(self.accept(host, sources, true, confirmed)),
			Action::CopyCurrent => {
				self.copy_current(host);
				Ok(Outcome::Continue)
			}
			Action::DirectoryUp => {
				self.directory_up(host, sources.metadata);
				Ok(Outcome::Continue)
			}
			Action::GotoFirst | Action::GotoLast | Action::PageUp | Action::PageDown | Action::Next | Action::Previous => {
				Ok(Outcome::Continue)
			}
		}
	}

	fn insert_current(&mut self, host: &mut dyn HostSurface) {
		let text = candidate_text(&host.current_text(), &self.set, self.selection.index);
		host.replace_completable_region(&text);
	}

	fn accept(&mut self, host: &mut dyn HostSurface, sources: &Sources<'_>, raw: bool, confirmed: bool) -> Outcome {
		if !raw && !self.selection.is_prompt() {
			self.insert_current(host);
		}
		let input = host.current_text();
		let valid = sources.matcher.test_completion(&input);
		let outcome = commit_decision(host.require_match(), &input, valid, confirmed);
		match &outcome {
			Outcome::Commit(value) => info!(value = %value, "committed completion"),
			Outcome::ConfirmPending => {
				self.confirm_pending = true;
				host.message("Confirm");
			}
			Outcome::MatchRequired => host.message("Match required"),
			Outcome::Continue => {}
		}
		outcome
	}

	fn copy_current(&self, host: &mut dyn HostSurface) {
		if host.selection_active() {
			host.copy_selection();
			return;
		}
		let text = candidate_text(&host.current_text(), &self.set, self.selection.index);
		debug!(text = %text, "copied candidate");
		host.set_clipboard(text);
	}

	fn directory_up(&self, host: &mut dyn HostSurface, metadata: &dyn Metadata) {
		if metadata.category() != Some(Category::File) {
			return;
		}
		if let Some(parent) = directory_up(&host.current_text(), self.home.as_deref()) {
			host.replace_completable_region(&parent);
		}
	}

	/// Drives the session with events from `host` until it commits or aborts.
	pub fn run<H>(&mut self, host: &mut H, sources: &mut Sources<'_>) -> Result<String>
	where
		H: HostSurface + InputSource,
	{
		loop {
			if host.interrupted() {
				return Err(Error::Aborted);
			}
			if self.update(&*host, sources)? {
				self.exhibit(host, sources.metadata);
			}

			match host.next_event()? {
				HostEvent::Edited | HostEvent::Other => self.cancel_confirmation(),
				HostEvent::Abort => return Err(Error::Aborted),
				HostEvent::Action(action) => {
					if let Outcome::Commit(value) = self.dispatch(action, host, sources)? {
						return Ok(value);
					}
				}
			}
		}
	}
}

/// Reads one completion from an interactive host.
///
/// Decorations are cleared whichever way the session ends.
pub fn read_completion<H>(host: &mut H, mut sources: Sources<'_>, history: History, config: EngineConfig) -> Result<String>
where
	H: HostSurface + InputSource,
{
	let mut session = Session::new(config, history);
	let result = session.run(host, &mut sources);
	render::clear(host);
	if let Err(error) = &result {
		debug!(%error, "completion session ended without a value");
	}
	result
}

#[cfg(test)]
mod tests;
