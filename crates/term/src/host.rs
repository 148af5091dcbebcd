//! Crossterm host: a one-line prompt with the candidate window below it.

use std::io::{self, Write};
use std::ops::Range;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::style::{Attribute, Color, ContentStyle, PrintStyledContent};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue};
use minisel_engine::actions::directory_up;
use minisel_engine::{Action, Anchor, Face, HostEvent, HostSurface, InputSource, Placement, RequireMatch, StyledLine};
use tracing::{debug, trace, warn};
use unicode_width::UnicodeWidthChar;

use crate::keymap::{KeyInput, map_key};

/// Raw mode on the alternate screen of stderr, with bracketed paste, for as
/// long as it lives.
pub struct TerminalGuard;

impl TerminalGuard {
	pub fn enter() -> io::Result<Self> {
		terminal::enable_raw_mode()?;
		let guard = Self;
		execute!(
			io::stderr(),
			terminal::EnterAlternateScreen,
			EnableBracketedPaste,
			terminal::Clear(ClearType::All)
		)?;
		Ok(guard)
	}
}

impl Drop for TerminalGuard {
	fn drop(&mut self) {
		let _ = execute!(io::stderr(), DisableBracketedPaste, terminal::LeaveAlternateScreen, cursor::Show);
		let _ = terminal::disable_raw_mode();
	}
}

/// Terminal implementation of the engine's host surface.
pub struct TerminalHost<W: Write> {
	out: W,
	prompt: String,
	input: String,
	require: RequireMatch,
	/// Backspace after a `/` goes up one directory.
	files: bool,
	home: Option<PathBuf>,
	count: Vec<StyledLine>,
	rows: Vec<StyledLine>,
	input_face: Option<Face>,
	/// Copy to the system clipboard as well as the in-process store.
	system_clipboard: bool,
	clipboard: Option<String>,
	message: Option<String>,
	width: u16,
	height: u16,
}

impl<W: Write> TerminalHost<W> {
	pub fn new(out: W, prompt: impl Into<String>, require: RequireMatch) -> Self {
		let (width, height) = terminal::size().unwrap_or((80, 24));
		Self {
			out,
			prompt: prompt.into(),
			input: String::new(),
			require,
			files: false,
			home: dirs::home_dir(),
			count: Vec::new(),
			rows: Vec::new(),
			input_face: None,
			system_clipboard: true,
			clipboard: None,
			message: None,
			width,
			height,
		}
	}

	pub fn with_files(mut self, files: bool) -> Self {
		self.files = files;
		self
	}

	#[cfg(test)]
	pub fn with_system_clipboard(mut self, enabled: bool) -> Self {
		self.system_clipboard = enabled;
		self
	}

	#[cfg(test)]
	pub fn with_size(mut self, width: u16, height: u16) -> Self {
		self.width = width;
		self.height = height;
		self
	}

	#[cfg(test)]
	pub fn input(&self) -> &str {
		&self.input
	}

	#[cfg(test)]
	pub fn clipboard(&self) -> Option<&str> {
		self.clipboard.as_deref()
	}

	#[cfg(test)]
	pub fn message_text(&self) -> Option<&str> {
		self.message.as_deref()
	}

	/// Applies a key to the input line and translates it for the engine.
	pub fn handle_key(&mut self, input: KeyInput) -> HostEvent {
		self.message = None;
		match input {
			KeyInput::Action(action) => HostEvent::Action(action),
			KeyInput::Abort => HostEvent::Abort,
			KeyInput::Ignore => HostEvent::Other,
			KeyInput::Insert(ch) => {
				self.input.push(ch);
				HostEvent::Edited
			}
			KeyInput::DeleteBackward => {
				if self.files && directory_up(&self.input, self.home.as_deref()).is_some() {
					return HostEvent::Action(Action::DirectoryUp);
				}
				self.edit(|input| {
					input.pop();
				})
			}
			KeyInput::DeleteWord => self.edit(|input| {
				let trimmed = input.trim_end_matches(|ch: char| !ch.is_alphanumeric());
				let keep = trimmed.trim_end_matches(char::is_alphanumeric).len();
				input.truncate(keep);
			}),
			KeyInput::Clear => self.edit(String::clear),
			KeyInput::Yank => {
				let text = self.clipboard.clone().unwrap_or_default();
				self.edit(|input| input.push_str(&text))
			}
		}
	}

	/// Appends pasted text, dropping control characters.
	pub fn paste(&mut self, text: &str) -> HostEvent {
		self.message = None;
		self.edit(|input| input.extend(text.chars().filter(|ch| !ch.is_control())))
	}

	/// Records the new terminal size. The session loop gets a turn so rows
	/// left over from a superseded recompute are replaced.
	pub fn resize(&mut self, width: u16, height: u16) -> HostEvent {
		self.width = width;
		self.height = height;
		HostEvent::Other
	}

	fn edit(&mut self, apply: impl FnOnce(&mut String)) -> HostEvent {
		let before = self.input.len();
		apply(&mut self.input);
		if self.input.len() == before { HostEvent::Other } else { HostEvent::Edited }
	}

	/// Redraws the prompt line, candidate rows and message.
	pub fn draw(&mut self) -> io::Result<()> {
		let width = usize::from(self.width);
		queue!(self.out, cursor::Hide, cursor::MoveTo(0, 0), terminal::Clear(ClearType::All))?;

		let mut used = 0;
		for line in &self.count {
			used += print_line(&mut self.out, line, width.saturating_sub(used), false)?;
		}
		used += print_text(&mut self.out, &self.prompt, ContentStyle::new(), width.saturating_sub(used))?;
		let input_style = self.input_face.map_or_else(ContentStyle::new, face_style);
		used += print_text(&mut self.out, &self.input, input_style, width.saturating_sub(used))?;

		let max_rows = usize::from(self.height.saturating_sub(2));
		let mut y: u16 = 1;
		for row in self.rows.iter().take(max_rows) {
			queue!(self.out, cursor::MoveTo(0, y))?;
			print_line(&mut self.out, row, width, true)?;
			y = y.saturating_add(1);
		}
		if let Some(message) = &self.message {
			queue!(self.out, cursor::MoveTo(0, y))?;
			print_text(&mut self.out, message, face_style(Face::Annotation), width)?;
		}

		let cursor_x = u16::try_from(used.min(width.saturating_sub(1))).unwrap_or(0);
		queue!(self.out, cursor::MoveTo(cursor_x, 0), cursor::Show)?;
		self.out.flush()
	}
}

fn face_style(face: Face) -> ContentStyle {
	let mut style = ContentStyle::new();
	match face {
		Face::Current => style.attributes.set(Attribute::Reverse),
		Face::Match => {
			style.attributes.set(Attribute::Bold);
			style.foreground_color = Some(Color::Blue);
		}
		Face::GroupTitle => {
			style.attributes.set(Attribute::Bold);
			style.attributes.set(Attribute::Italic);
		}
		Face::GroupSeparator | Face::Annotation | Face::Prefix | Face::Suffix => {
			style.foreground_color = Some(Color::DarkGrey);
		}
		Face::Multiline => style.foreground_color = Some(Color::DarkYellow),
		Face::Count => style.foreground_color = Some(Color::DarkCyan),
	}
	style
}

fn span_style(span: Option<Face>, line: Option<Face>) -> ContentStyle {
	let mut style = span.map_or_else(ContentStyle::new, face_style);
	if line == Some(Face::Current) {
		style.attributes.set(Attribute::Reverse);
	}
	style
}

/// Prints at most `width` cells of `text`, returning the cells used.
fn print_text<W: Write>(out: &mut W, text: &str, style: ContentStyle, width: usize) -> io::Result<usize> {
	let mut used = 0;
	let mut end = text.len();
	for (at, ch) in text.char_indices() {
		let cells = ch.width().unwrap_or(0);
		if used + cells > width {
			end = at;
			break;
		}
		used += cells;
	}
	if end > 0 {
		queue!(out, PrintStyledContent(style.apply(&text[..end])))?;
	}
	Ok(used)
}

/// Prints a styled line clipped to `width`. With `fill`, the line face
/// extends to the right edge.
fn print_line<W: Write>(out: &mut W, line: &StyledLine, width: usize, fill: bool) -> io::Result<usize> {
	let mut used = 0;
	for span in &line.spans {
		used += print_text(out, &span.text, span_style(span.face, line.face), width.saturating_sub(used))?;
	}
	if fill {
		let rest = width.saturating_sub(used);
		let padding = match line.face {
			Some(Face::Current) => " ".repeat(rest),
			Some(Face::GroupSeparator) => "─".repeat(rest),
			_ => String::new(),
		};
		used += print_text(out, &padding, span_style(line.face, None), rest)?;
	}
	Ok(used)
}

impl<W: Write> HostSurface for TerminalHost<W> {
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
		match anchor.placement {
			Placement::Before => self.count = lines.to_vec(),
			Placement::After => self.rows = lines.to_vec(),
		}
	}

	fn style_region(&mut self, _range: Range<usize>, face: Option<Face>) {
		self.input_face = face;
	}

	fn require_match(&self) -> RequireMatch {
		self.require
	}

	fn columns(&self) -> Option<usize> {
		Some(usize::from(self.width))
	}

	fn input_pending(&self) -> bool {
		event::poll(Duration::ZERO).unwrap_or(false)
	}

	fn set_clipboard(&mut self, text: String) {
		if self.system_clipboard {
			match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.as_str())) {
				Ok(()) => debug!("copied to the system clipboard"),
				Err(error) => warn!(%error, "system clipboard unavailable, keeping the copy in process"),
			}
		}
		self.message = Some(format!("Copied {text:?}"));
		self.clipboard = Some(text);
	}

	fn message(&mut self, text: &str) {
		self.message = Some(format!("[{text}]"));
	}
}

impl<W: Write> InputSource for TerminalHost<W> {
	fn next_event(&mut self) -> io::Result<HostEvent> {
		loop {
			self.draw()?;
			match event::read()? {
				Event::Key(key) if key.kind != KeyEventKind::Release => {
					let event = self.handle_key(map_key(key));
					trace!(?key, ?event, "key");
					return Ok(event);
				}
				Event::Paste(text) => {
					let event = self.paste(&text);
					if event != HostEvent::Other {
						return Ok(event);
					}
				}
				Event::Resize(width, height) => return Ok(self.resize(width, height)),
				_ => {}
			}
		}
	}
}
