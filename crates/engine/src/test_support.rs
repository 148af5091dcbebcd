//! Fakes shared by the engine's unit tests.

use std::cell::Cell;
use std::collections::VecDeque;
use std::ops::Range;

use crate::actions::Action;
use crate::candidate::Candidate;
use crate::host::{Anchor, HostEvent, HostSurface, InputSource, RequireMatch};
use crate::matcher::{Matcher, Matches};
use crate::render::{Face, StyledLine};

/// In-memory host with a prompt string in front of the editable input.
#[derive(Debug, Default)]
pub struct FakeHost {
	pub prompt: String,
	pub input: String,
	pub require: RequireMatch,
	pub painted: Vec<(Anchor, Vec<StyledLine>)>,
	pub input_face: Option<Face>,
	pub clipboard: Option<String>,
	pub messages: Vec<String>,
	pub selection_active: bool,
	pub copied_selection: bool,
	pub pending: Cell<bool>,
	pub interrupted: bool,
	pub columns: Option<usize>,
	pub events: VecDeque<HostEvent>,
}

impl FakeHost {
	pub fn new(input: &str) -> Self {
		Self {
			prompt: "Find: ".to_string(),
			input: input.to_string(),
			..Self::default()
		}
	}

	pub fn requiring(mut self, require: RequireMatch) -> Self {
		self.require = require;
		self
	}

	/// Lines last painted at `anchor`, flattened to plain text.
	pub fn painted_text(&self, anchor: Anchor) -> Vec<String> {
		self.painted
			.iter()
			.rev()
			.find(|(at, _)| *at == anchor)
			.map(|(_, lines)| lines.iter().map(StyledLine::plain).collect())
			.unwrap_or_default()
	}

	pub fn list_anchor(&self) -> Anchor {
		Anchor::after(self.buffer_end())
	}

	/// Queues events for the read loop.
	pub fn script(&mut self, events: impl IntoIterator<Item = HostEvent>) {
		self.events.extend(events);
	}
}

impl HostSurface for FakeHost {
	fn prompt_end(&self) -> usize {
		self.prompt.len()
	}

	fn buffer_end(&self) -> usize {
		self.prompt.len() + self.input.len()
	}

	fn current_text(&self) -> String {
		self.input.clone()
	}

	fn replace_completable_region(&mut self, text: &str) {
		self.input = text.to_string();
	}

	fn paint_decoration(&mut self, anchor: Anchor, lines: &[StyledLine]) {
		self.painted.push((anchor, lines.to_vec()));
	}

	fn style_region(&mut self, range: Range<usize>, face: Option<Face>) {
		assert_eq!(range, self.prompt_end()..self.buffer_end());
		self.input_face = face;
	}

	fn require_match(&self) -> RequireMatch {
		self.require
	}

	fn columns(&self) -> Option<usize> {
		self.columns
	}

	fn input_pending(&self) -> bool {
		self.pending.get()
	}

	fn interrupted(&self) -> bool {
		self.interrupted
	}

	fn selection_active(&self) -> bool {
		self.selection_active
	}

	fn copy_selection(&mut self) {
		self.copied_selection = true;
	}

	fn set_clipboard(&mut self, text: String) {
		self.clipboard = Some(text);
	}

	fn message(&mut self, text: &str) {
		self.messages.push(text.to_string());
	}
}

impl InputSource for FakeHost {
	fn next_event(&mut self) -> std::io::Result<HostEvent> {
		Ok(self.events.pop_front().unwrap_or(HostEvent::Abort))
	}
}

/// Matcher returning a fixed list, prefix-filtered, with a configurable base.
#[derive(Debug, Clone, Default)]
pub struct ListMatcher {
	pub items: Vec<String>,
	pub calls: usize,
	pub unavailable: bool,
	/// Byte offset of the last `/` + 1 becomes the base when set.
	pub path_base: bool,
}

impl ListMatcher {
	pub fn new(items: &[&str]) -> Self {
		Self {
			items: items.iter().map(|item| item.to_string()).collect(),
			..Self::default()
		}
	}
}

impl Matcher for ListMatcher {
	fn all_completions(&mut self, input: &str) -> Option<Matches> {
		self.calls += 1;
		if self.unavailable {
			return None;
		}
		let base = if self.path_base { input.rfind('/').map_or(0, |slash| slash + 1) } else { 0 };
		let needle = &input[base..];
		let candidates = self
			.items
			.iter()
			.filter(|item| item.starts_with(needle))
			.map(|item| Candidate::new(item.as_str()))
			.collect();
		Some(Matches { base, candidates })
	}

	fn test_completion(&self, input: &str) -> bool {
		self.items.iter().any(|item| item == input)
	}
}

pub fn texts(items: &[Candidate]) -> Vec<&str> {
	items.iter().map(Candidate::as_str).collect()
}

pub fn action_events(actions: &[Action]) -> Vec<HostEvent> {
	actions.iter().cloned().map(HostEvent::Action).collect()
}
