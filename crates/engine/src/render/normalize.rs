//! Single-line display text of a candidate.

use unicode_width::UnicodeWidthStr;

use super::{Face, StyledLine, StyledSpan};
use crate::candidate::{Candidate, PropKind};

/// A visible character and whether it was matched.
#[derive(Clone, Copy)]
struct Cell {
	ch: char,
	face: Option<Face>,
}

/// Display spans of a candidate and whether it spanned several lines.
pub(crate) struct Normalized {
	pub spans: Vec<StyledSpan>,
	pub multiline: bool,
}

/// Resolves display properties, then collapses whitespace.
///
/// Whitespace runs containing a newline become `glyph`, other runs of tabs
/// and spaces become one space. Leading and trailing whitespace, newlines
/// included, is dropped.
pub(crate) fn normalize(candidate: &Candidate, glyph: &str) -> Normalized {
	let cells = visible_cells(candidate);
	let mut out: Vec<Cell> = Vec::with_capacity(cells.len());
	let mut multiline = false;

	let mut index = 0;
	while index < cells.len() {
		if !is_blank(cells[index].ch) {
			out.push(cells[index]);
			index += 1;
			continue;
		}
		let run_start = index;
		while index < cells.len() && is_blank(cells[index].ch) {
			index += 1;
		}
		if run_start == 0 || index == cells.len() {
			continue;
		}
		if cells[run_start..index].iter().any(|cell| cell.ch == '\n') {
			multiline = true;
			out.extend(glyph.chars().map(|ch| Cell {
				ch,
				face: Some(Face::Multiline),
			}));
		} else {
			out.push(Cell { ch: ' ', face: None });
		}
	}

	Normalized {
		spans: group_cells(&out),
		multiline,
	}
}

fn is_blank(ch: char) -> bool {
	matches!(ch, ' ' | '\t' | '\n')
}

/// Applies `Invisible` and `Display` properties and marks highlighted
/// characters.
fn visible_cells(candidate: &Candidate) -> Vec<Cell> {
	let text = candidate.as_str();
	let props = candidate.props();
	let mut cells = Vec::with_capacity(text.len());
	let mut shown_displays = vec![false; props.len()];

	let mut emit_display = |at: usize, cells: &mut Vec<Cell>, inserting: bool| {
		for (slot, prop) in props.iter().enumerate() {
			let PropKind::Display(replacement) = &prop.kind else {
				continue;
			};
			let hit = if inserting {
				prop.range.is_empty() && prop.range.start == at
			} else {
				prop.range.contains(&at)
			};
			if hit && !shown_displays[slot] {
				shown_displays[slot] = true;
				cells.extend(replacement.chars().map(|ch| Cell { ch, face: None }));
			}
		}
	};

	for (at, ch) in text.char_indices() {
		emit_display(at, &mut cells, true);
		let covered = |kind: fn(&PropKind) -> bool| props.iter().any(|prop| kind(&prop.kind) && prop.range.contains(&at));
		if covered(|kind| matches!(kind, PropKind::Display(_))) {
			emit_display(at, &mut cells, false);
			continue;
		}
		if covered(|kind| matches!(kind, PropKind::Invisible)) {
			continue;
		}
		let face = covered(|kind| matches!(kind, PropKind::Highlight)).then_some(Face::Match);
		cells.push(Cell { ch, face });
	}
	emit_display(text.len(), &mut cells, true);
	cells
}

fn group_cells(cells: &[Cell]) -> Vec<StyledSpan> {
	let mut spans: Vec<StyledSpan> = Vec::new();
	for cell in cells {
		match spans.last_mut() {
			Some(span) if span.face == cell.face => span.text.push(cell.ch),
			_ => spans.push(StyledSpan {
				text: cell.ch.to_string(),
				face: cell.face,
			}),
		}
	}
	spans
}

/// Cuts `line` to `columns` display cells, ending it with `glyph` when
/// anything was removed.
pub(crate) fn truncate(line: &mut StyledLine, columns: usize, glyph: &str) {
	if line.width() <= columns {
		return;
	}
	let room = columns.saturating_sub(glyph.width());
	let mut used = 0;
	let mut kept = Vec::with_capacity(line.spans.len());
	for span in line.spans.drain(..) {
		let mut text = String::new();
		for ch in span.text.chars() {
			let width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
			if used + width > room {
				break;
			}
			used += width;
			text.push(ch);
		}
		let cut = text.len() < span.text.len();
		if !text.is_empty() {
			kept.push(StyledSpan { text, face: span.face });
		}
		if cut {
			break;
		}
	}
	kept.push(StyledSpan {
		text: glyph.to_string(),
		face: Some(Face::Multiline),
	});
	line.spans = kept;
}
