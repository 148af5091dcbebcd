//! Window renderer.
//!
//! [`render`] is a pure function from the session state to a [`Frame`]:
//! the count indicator, the visible candidate rows with their group headers,
//! and the face of the input region. [`paint`] hands a frame to the host.
//! The window keeps the cursor centered except at both ends of the list.

mod format;
mod normalize;

use std::ops::Range;

use unicode_width::UnicodeWidthStr;

pub use self::format::printf;
use self::normalize::{normalize, truncate};
use crate::candidate::Candidate;
use crate::config::EngineConfig;
use crate::host::{Anchor, HostSurface};
use crate::metadata::{Affixed, Metadata};
use crate::pipeline::CandidateSet;

/// Logical faces; the host maps them to concrete styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
	/// Row or input region at the cursor.
	Current,
	/// Characters that matched the input.
	Match,
	GroupTitle,
	/// Rule after a group title.
	GroupSeparator,
	Annotation,
	Prefix,
	Suffix,
	/// Newline and truncation glyphs.
	Multiline,
	Count,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
	pub text: String,
	pub face: Option<Face>,
}

impl StyledSpan {
	pub fn new(text: impl Into<String>, face: Option<Face>) -> Self {
		Self { text: text.into(), face }
	}
}

/// One painted line. `face` applies to the whole line underneath the spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledLine {
	pub spans: Vec<StyledSpan>,
	pub face: Option<Face>,
}

impl StyledLine {
	pub fn plain(&self) -> String {
		self.spans.iter().map(|span| span.text.as_str()).collect()
	}

	/// Display width in terminal cells.
	pub fn width(&self) -> usize {
		self.spans.iter().map(|span| span.text.width()).sum()
	}

	fn push(&mut self, text: impl Into<String>, face: Option<Face>) {
		let text = text.into();
		if !text.is_empty() {
			self.spans.push(StyledSpan::new(text, face));
		}
	}
}

/// Everything painted for one state of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
	pub count: Option<StyledLine>,
	pub rows: Vec<StyledLine>,
	/// Face of the input region; set when the prompt is the selection.
	pub input_face: Option<Face>,
	/// Candidate indices shown in `rows`.
	pub window: Range<usize>,
}

/// Session state a frame is rendered from.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
	pub set: &'a CandidateSet,
	pub index: isize,
	pub require_match: bool,
	pub columns: Option<usize>,
}

/// Visible index range for a cursor at `index`.
pub fn window(index: isize, total: usize, page: usize) -> Range<usize> {
	let half = isize::try_from(page / 2).unwrap_or(isize::MAX);
	let last_start = total.saturating_sub(page);
	let start = usize::try_from(index.saturating_sub(half)).unwrap_or(0).min(last_start);
	start..(start + page).min(total)
}

/// Count indicator text, `None` when disabled.
pub fn format_count(config: &EngineConfig, index: isize, total: usize) -> Option<String> {
	if !config.count_enabled {
		return None;
	}
	let current = if index < 0 { "*".to_string() } else { (index + 1).to_string() };
	let inner = printf(&config.count_format.inner, &[&current, &total.to_string()]);
	Some(printf(&config.count_format.outer, &[&inner]))
}

pub fn render(view: View<'_>, metadata: &dyn Metadata, config: &EngineConfig) -> Frame {
	let View { set, index, .. } = view;
	let window = window(index, set.total, config.page());
	let visible = &set.items[window.start.min(set.items.len())..window.end.min(set.items.len())];

	let mut rows = Vec::with_capacity(visible.len());
	let mut last_title: Option<String> = None;
	for (offset, (candidate, decoration)) in visible.iter().zip(decorate(visible, metadata)).enumerate() {
		let title = metadata.group_title(candidate.as_str());
		if config.group_headers
			&& let Some(title) = &title
			&& last_title.as_ref() != Some(title)
		{
			rows.push(group_header(config, title));
		}

		let mut row = candidate_row(candidate, decoration, title.is_some(), metadata, config, view.columns);
		if isize::try_from(window.start + offset).ok() == Some(index) {
			row.face = Some(Face::Current);
		}
		rows.push(row);
		last_title = title;
	}

	let count = format_count(config, index, set.total).map(|text| StyledLine {
		spans: vec![StyledSpan::new(text, Some(Face::Count))],
		face: None,
	});
	let input_face = (index < 0 && !view.require_match).then_some(Face::Current);

	Frame {
		count,
		rows,
		input_face,
		window,
	}
}

/// Text painted around a candidate.
#[derive(Default)]
struct Decoration {
	prefix: String,
	suffix: String,
	suffix_face: Option<Face>,
}

/// Decoration per visible candidate. Affixation wins over annotation; an
/// affixation result of the wrong length is ignored.
fn decorate(visible: &[Candidate], metadata: &dyn Metadata) -> Vec<Decoration> {
	let texts: Vec<&str> = visible.iter().map(Candidate::as_str).collect();
	if let Some(affixed) = metadata.affixate(&texts)
		&& affixed.len() == visible.len()
	{
		return affixed
			.into_iter()
			.map(|Affixed { prefix, suffix, .. }| Decoration {
				prefix,
				suffix,
				suffix_face: Some(Face::Suffix),
			})
			.collect();
	}
	texts
		.iter()
		.map(|text| Decoration {
			suffix: metadata.annotate(text).unwrap_or_default(),
			suffix_face: Some(Face::Annotation),
			..Decoration::default()
		})
		.collect()
}

fn group_header(config: &EngineConfig, title: &str) -> StyledLine {
	StyledLine {
		spans: vec![StyledSpan::new(printf(&config.group_format, &[title]), Some(Face::GroupTitle))],
		face: Some(Face::GroupSeparator),
	}
}

fn candidate_row(
	candidate: &Candidate,
	decoration: Decoration,
	grouped: bool,
	metadata: &dyn Metadata,
	config: &EngineConfig,
	columns: Option<usize>,
) -> StyledLine {
	let shown = if grouped {
		let transformed = metadata.group_transform(candidate.as_str());
		if transformed == candidate.as_str() { candidate.clone() } else { Candidate::new(transformed) }
	} else {
		candidate.clone()
	};
	let normalized = normalize(&shown, config.newline_glyph());

	let mut row = StyledLine::default();
	row.push(decoration.prefix, Some(Face::Prefix));
	row.spans.extend(normalized.spans);
	row.push(decoration.suffix, decoration.suffix_face);

	if normalized.multiline
		&& let Some(columns) = columns
	{
		truncate(&mut row, columns, &config.multiline[1]);
	}
	row
}

/// Paints `frame` onto the host's decoration anchors and input region.
pub fn paint(frame: &Frame, host: &mut dyn HostSurface) {
	let count: Vec<StyledLine> = frame.count.iter().cloned().collect();
	host.paint_decoration(Anchor::before(0), &count);
	let end = host.buffer_end();
	host.paint_decoration(Anchor::after(end), &frame.rows);
	let input = host.prompt_end()..end;
	host.style_region(input, frame.input_face);
}

/// Removes every decoration painted by [`paint`].
pub fn clear(host: &mut dyn HostSurface) {
	paint(&Frame::default(), host);
}
