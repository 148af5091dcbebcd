//! Host surface contract.
//!
//! The host owns the editable text and the screen. The engine reads the input
//! through this trait, replaces the completable region when inserting a
//! candidate, and hands over purely decorative text to paint at fixed buffer
//! positions. Nothing painted through [`HostSurface::paint_decoration`] is
//! ever part of the editable text.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::render::{Face, StyledLine};

/// Whether a non-candidate input may be committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequireMatch {
	/// Any input may be committed.
	#[default]
	No,
	/// Only empty input or a valid completion may be committed.
	Yes,
	/// Invalid input needs one extra explicit confirmation.
	Confirm,
	/// Invalid input is committed; confirmation only applies after a completion
	/// command, which this engine treats as already confirmed.
	ConfirmAfterCompletion,
}

impl RequireMatch {
	/// True when match is required in any form, which forbids selecting the
	/// prompt while candidates exist.
	pub fn is_required(self) -> bool {
		self != Self::No
	}
}

/// Which side of its buffer position a decoration is painted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
	Before,
	After,
}

/// Buffer position a decoration is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
	pub position: usize,
	pub placement: Placement,
}

impl Anchor {
	pub const fn before(position: usize) -> Self {
		Self {
			position,
			placement: Placement::Before,
		}
	}

	pub const fn after(position: usize) -> Self {
		Self {
			position,
			placement: Placement::After,
		}
	}
}

/// Event delivered by the host's input loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
	/// The editable text changed.
	Edited,
	/// A key was bound to an engine action.
	Action(Action),
	/// Any other key; cancels a pending confirmation.
	Other,
	/// The user cancelled the session.
	Abort,
}

/// The editable buffer and painting surface of a completion session.
pub trait HostSurface {
	/// Buffer position where the editable input begins.
	fn prompt_end(&self) -> usize;

	/// Buffer position where the editable input ends.
	fn buffer_end(&self) -> usize;

	/// The editable input text.
	fn current_text(&self) -> String;

	/// Replaces the whole completable region with `text`.
	fn replace_completable_region(&mut self, text: &str);

	/// Paints decorative lines at an anchor, replacing what was there.
	fn paint_decoration(&mut self, anchor: Anchor, lines: &[StyledLine]);

	/// Applies `face` to a buffer range, or clears the styling when `None`.
	fn style_region(&mut self, range: Range<usize>, face: Option<Face>);

	fn require_match(&self) -> RequireMatch;

	/// Width available for candidate rows, if the host knows it.
	fn columns(&self) -> Option<usize> {
		None
	}

	/// True when a newer input event is waiting to be processed.
	fn input_pending(&self) -> bool {
		false
	}

	/// True when the user asked to cancel the session.
	fn interrupted(&self) -> bool {
		false
	}

	/// True when a selection-like secondary input mode is active.
	fn selection_active(&self) -> bool {
		false
	}

	/// Generic copy of the host's active selection.
	fn copy_selection(&mut self) {}

	/// Stores text in the host's clipboard-equivalent store.
	fn set_clipboard(&mut self, text: String);

	/// Shows a transient message to the user.
	fn message(&mut self, _text: &str) {}
}

/// Event source of an interactive host.
pub trait InputSource {
	/// Blocks until the next user event.
	fn next_event(&mut self) -> std::io::Result<HostEvent>;
}
