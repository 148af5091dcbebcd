use super::*;

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyInput {
	map_key(KeyEvent::new(code, modifiers))
}

#[test]
fn navigation_keys() {
	let none = KeyModifiers::NONE;
	assert_eq!(key(KeyCode::Down, none), KeyInput::Action(Action::Next));
	assert_eq!(key(KeyCode::Char('n'), KeyModifiers::CONTROL), KeyInput::Action(Action::Next));
	assert_eq!(key(KeyCode::Char('p'), KeyModifiers::CONTROL), KeyInput::Action(Action::Previous));
	assert_eq!(key(KeyCode::PageDown, none), KeyInput::Action(Action::PageDown));
	assert_eq!(key(KeyCode::Char('<'), KeyModifiers::ALT | KeyModifiers::SHIFT), KeyInput::Action(Action::GotoFirst));
	assert_eq!(key(KeyCode::End, none), KeyInput::Action(Action::GotoLast));
}

#[test]
fn commit_keys() {
	assert_eq!(key(KeyCode::Enter, KeyModifiers::NONE), KeyInput::Action(Action::AcceptCurrent));
	assert_eq!(key(KeyCode::Enter, KeyModifiers::ALT), KeyInput::Action(Action::AcceptInput));
	assert_eq!(key(KeyCode::Tab, KeyModifiers::NONE), KeyInput::Action(Action::InsertCurrent));
	assert_eq!(key(KeyCode::Char('w'), KeyModifiers::ALT), KeyInput::Action(Action::CopyCurrent));
}

#[test]
fn editing_and_abort_keys() {
	assert_eq!(key(KeyCode::Char('A'), KeyModifiers::SHIFT), KeyInput::Insert('A'));
	assert_eq!(key(KeyCode::Backspace, KeyModifiers::NONE), KeyInput::DeleteBackward);
	assert_eq!(key(KeyCode::Char('w'), KeyModifiers::CONTROL), KeyInput::DeleteWord);
	assert_eq!(key(KeyCode::Char('u'), KeyModifiers::CONTROL), KeyInput::Clear);
	assert_eq!(key(KeyCode::Char('y'), KeyModifiers::CONTROL), KeyInput::Yank);
	assert_eq!(key(KeyCode::Esc, KeyModifiers::NONE), KeyInput::Abort);
	assert_eq!(key(KeyCode::Char('g'), KeyModifiers::CONTROL), KeyInput::Abort);
	assert_eq!(key(KeyCode::Char('z'), KeyModifiers::CONTROL), KeyInput::Ignore);
	assert_eq!(key(KeyCode::F(1), KeyModifiers::NONE), KeyInput::Ignore);
}
