//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use minisel_engine::Action;

/// What a key press asks the terminal host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
	Action(Action),
	Insert(char),
	DeleteBackward,
	DeleteWord,
	Clear,
	/// Insert the clipboard store's text.
	Yank,
	Abort,
	Ignore,
}

pub fn map_key(key: KeyEvent) -> KeyInput {
	let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
	let alt = key.modifiers.contains(KeyModifiers::ALT);

	match key.code {
		KeyCode::Up => KeyInput::Action(Action::Previous),
		KeyCode::Down => KeyInput::Action(Action::Next),
		KeyCode::PageUp => KeyInput::Action(Action::PageUp),
		KeyCode::PageDown => KeyInput::Action(Action::PageDown),
		KeyCode::Home => KeyInput::Action(Action::GotoFirst),
		KeyCode::End => KeyInput::Action(Action::GotoLast),
		KeyCode::Tab => KeyInput::Action(Action::InsertCurrent),
		KeyCode::Enter if alt => KeyInput::Action(Action::AcceptInput),
		KeyCode::Enter => KeyInput::Action(Action::AcceptCurrent),
		KeyCode::Esc => KeyInput::Abort,
		KeyCode::Backspace if alt || ctrl => KeyInput::DeleteWord,
		KeyCode::Backspace => KeyInput::DeleteBackward,
		KeyCode::Char(ch) if ctrl => match ch {
			'p' => KeyInput::Action(Action::Previous),
			'n' => KeyInput::Action(Action::Next),
			'v' => KeyInput::Action(Action::PageDown),
			'g' | 'c' => KeyInput::Abort,
			'w' => KeyInput::DeleteWord,
			'u' => KeyInput::Clear,
			'y' => KeyInput::Yank,
			'h' => KeyInput::DeleteBackward,
			_ => KeyInput::Ignore,
		},
		KeyCode::Char(ch) if alt => match ch {
			'<' => KeyInput::Action(Action::GotoFirst),
			'>' => KeyInput::Action(Action::GotoLast),
			'v' => KeyInput::Action(Action::PageUp),
			'w' => KeyInput::Action(Action::CopyCurrent),
			_ => KeyInput::Ignore,
		},
		KeyCode::Char(ch) => KeyInput::Insert(ch),
		_ => KeyInput::Ignore,
	}
}

#[cfg(test)]
mod tests;
