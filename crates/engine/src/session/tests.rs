use std::path::PathBuf;

use pretty_assertions::assert_eq;

use super::*;
use crate::host::{Anchor, RequireMatch};
use crate::matcher::FileMatcher;
use crate::metadata::{NoMetadata, StaticMetadata};
use crate::render::Face;
use crate::test_support::{FakeHost, ListMatcher, action_events, texts};

fn session(config: EngineConfig, history: History) -> Session {
	Session::new(config, history).with_home(Some(PathBuf::from("/home/u")))
}

fn updated(session: &mut Session, host: &FakeHost, matcher: &mut ListMatcher, metadata: &dyn Metadata) -> bool {
	session.update(host, &mut Sources::new(matcher, metadata)).unwrap()
}

fn dispatch(session: &mut Session, action: Action, host: &mut FakeHost, matcher: &mut ListMatcher) -> Outcome {
	session.dispatch(action, host, &mut Sources::new(matcher, &NoMetadata)).unwrap()
}

#[test]
fn first_update_selects_first_ranked_candidate() {
	let host = FakeHost::new("");
	let mut matcher = ListMatcher::new(&["bar", "baz", "foo"]);
	let history = History::new(vec!["foo".to_string(), "bar".to_string()], crate::history::HistoryKind::Plain);
	let mut session = session(EngineConfig::default(), history);

	assert_eq!(session.current_candidate(), None);
	assert!(session.selection().is_prompt());
	assert!(updated(&mut session, &host, &mut matcher, &NoMetadata));
	assert_eq!(texts(&session.current_candidate_set().items), vec!["foo", "bar", "baz"]);
	assert_eq!(session.current_candidate().as_deref(), Some("foo"));
}

#[test]
fn unchanged_input_skips_recompute() {
	let host = FakeHost::new("b");
	let mut matcher = ListMatcher::new(&["bar"]);
	let mut session = session(EngineConfig::default(), History::disabled());
	updated(&mut session, &host, &mut matcher, &NoMetadata);
	updated(&mut session, &host, &mut matcher, &NoMetadata);
	assert_eq!(matcher.calls, 1);
}

#[test]
fn selection_follows_candidate_across_edits() {
	let mut host = FakeHost::new("");
	let mut matcher = ListMatcher::new(&["apple", "apricot", "banana"]);
	let mut session = session(EngineConfig::default(), History::disabled());
	updated(&mut session, &host, &mut matcher, &NoMetadata);
	assert_eq!(texts(&session.current_candidate_set().items), vec!["apple", "banana", "apricot"]);

	dispatch(&mut session, Action::GotoLast, &mut host, &mut matcher);
	assert_eq!(session.current_candidate().as_deref(), Some("apricot"));

	host.input = "ap".to_string();
	updated(&mut session, &host, &mut matcher, &NoMetadata);
	assert_eq!(session.selection().index, 1);
	assert_eq!(session.current_candidate().as_deref(), Some("apricot"));
}

#[test]
fn required_match_keeps_cursor_off_prompt() {
	let mut host = FakeHost::new("").requiring(RequireMatch::Yes);
	let mut matcher = ListMatcher::new(&["a", "b"]);
	let mut session = session(EngineConfig::default(), History::disabled());
	updated(&mut session, &host, &mut matcher, &NoMetadata);

	dispatch(&mut session, Action::Previous, &mut host, &mut matcher);
	assert_eq!(session.selection().index, 0);
	dispatch(&mut session, Action::PageUp, &mut host, &mut matcher);
	assert_eq!(session.selection().index, 0);
}

#[test]
fn hard_match_rejects_invalid_input() {
	let mut host = FakeHost::new("zz").requiring(RequireMatch::Yes);
	let mut matcher = ListMatcher::new(&["a"]);
	let mut session = session(EngineConfig::default(), History::disabled());
	updated(&mut session, &host, &mut matcher, &NoMetadata);

	assert_eq!(dispatch(&mut session, Action::AcceptCurrent, &mut host, &mut matcher), Outcome::MatchRequired);
	assert_eq!(host.messages, vec!["Match required"]);
	assert_eq!(host.input, "zz");
	assert!(!session.is_confirm_pending());
}

#[test]
fn accept_inserts_selected_candidate() {
	let mut host = FakeHost::new("sr").requiring(RequireMatch::Yes);
	let mut matcher = ListMatcher::new(&["src", "srv"]);
	let mut session = session(EngineConfig::default(), History::disabled());
	updated(&mut session, &host, &mut matcher, &NoMetadata);
	dispatch(&mut session, Action::Next, &mut host, &mut matcher);

	assert_eq!(
		dispatch(&mut session, Action::AcceptCurrent, &mut host, &mut matcher),
		Outcome::Commit("srv".to_string())
	);
	assert_eq!(host.input, "srv");
}

#[test]
fn accept_input_commits_raw_text() {
	let mut host = FakeHost::new("sr");
	let mut matcher = ListMatcher::new(&["src"]);
	let mut session = session(EngineConfig::default(), History::disabled());
	updated(&mut session, &host, &mut matcher, &NoMetadata);

	assert_eq!(
		dispatch(&mut session, Action::AcceptInput, &mut host, &mut matcher),
		Outcome::Commit("sr".to_string())
	);
}

#[test]
fn insert_uses_base_of_input() {
	let mut host = FakeHost::new("src/m");
	let mut matcher = ListMatcher::new(&["main.rs", "lib.rs"]);
	matcher.path_base = true;
	let mut session = session(EngineConfig::default(), History::disabled());
	updated(&mut session, &host, &mut matcher, &NoMetadata);

	dispatch(&mut session, Action::InsertCurrent, &mut host, &mut matcher);
	assert_eq!(host.input, "src/main.rs");
}

#[test]
fn copy_prefers_active_selection() {
	let mut host = FakeHost::new("a");
	let mut matcher = ListMatcher::new(&["abc"]);
	let mut session = session(EngineConfig::default(), History::disabled());
	updated(&mut session, &host, &mut matcher, &NoMetadata);

	dispatch(&mut session, Action::CopyCurrent, &mut host, &mut matcher);
	assert_eq!(host.clipboard.as_deref(), Some("abc"));
	assert!(!host.copied_selection);

	host.clipboard = None;
	host.selection_active = true;
	dispatch(&mut session, Action::CopyCurrent, &mut host, &mut matcher);
	assert!(host.copied_selection);
	assert_eq!(host.clipboard, None);
}

#[test]
fn directory_up_only_in_file_sessions() {
	let mut host = FakeHost::new("a/b/");
	let mut matcher = ListMatcher::new(&[]);
	let mut session = session(EngineConfig::default(), History::disabled());

	dispatch(&mut session, Action::DirectoryUp, &mut host, &mut matcher);
	assert_eq!(host.input, "a/b/");

	let files = StaticMetadata::new().with_category(Category::File);
	session
		.dispatch(Action::DirectoryUp, &mut host, &mut Sources::new(&mut matcher, &files))
		.unwrap();
	assert_eq!(host.input, "a/");
}

#[test]
fn missing_directory_keeps_file_session_open() {
	let dir = tempfile::tempdir().unwrap();
	std::fs::create_dir(dir.path().join("src")).unwrap();
	let mut matcher = FileMatcher::new(dir.path()).with_home(None);
	let files = StaticMetadata::new().with_category(Category::File);
	let mut session = session(EngineConfig::default(), History::disabled());
	let mut sources = Sources::new(&mut matcher, &files);

	let mut host = FakeHost::new("typo/");
	assert!(session.update(&host, &mut sources).unwrap());
	assert_eq!(session.current_candidate_set().total, 0);
	assert_eq!(session.selection().index, PROMPT);

	host.input = "s".to_string();
	assert!(session.update(&host, &mut sources).unwrap());
	assert_eq!(texts(&session.current_candidate_set().items), vec!["src/"]);
}

#[test]
fn superseded_update_keeps_previous_state() {
	let host = FakeHost::new("a");
	host.pending.set(true);
	let mut matcher = ListMatcher::new(&["a"]);
	let mut session = session(EngineConfig::default(), History::disabled());

	assert!(!updated(&mut session, &host, &mut matcher, &NoMetadata));
	assert_eq!(session.current_candidate(), None);

	host.pending.set(false);
	assert!(updated(&mut session, &host, &mut matcher, &NoMetadata));
	assert_eq!(matcher.calls, 2);
}

#[test]
fn prompt_preselect_styles_input() {
	let mut host = FakeHost::new("");
	let mut matcher = ListMatcher::new(&["a"]);
	let config = EngineConfig {
		preselect: Preselect::Prompt,
		..EngineConfig::default()
	};
	let mut session = session(config, History::disabled());
	updated(&mut session, &host, &mut matcher, &NoMetadata);
	assert_eq!(session.selection().index, PROMPT);

	session.exhibit(&mut host, &NoMetadata);
	assert_eq!(host.input_face, Some(Face::Current));
	assert_eq!(host.painted_text(Anchor::before(0)), vec!["*/1    "]);
}

#[test]
fn directory_preselect_selects_prompt_for_complete_directory() {
	let host = FakeHost::new("src/");
	let mut matcher = ListMatcher::new(&["src/", "main.rs"]);
	matcher.path_base = true;
	let files = StaticMetadata::new().with_category(Category::File);
	let config = EngineConfig {
		preselect: Preselect::Directory,
		..EngineConfig::default()
	};
	let mut session = session(config, History::disabled());
	updated(&mut session, &host, &mut matcher, &files);
	assert_eq!(session.selection().index, PROMPT);

	let host = FakeHost::new("src/m");
	updated(&mut session, &host, &mut matcher, &files);
	assert_eq!(session.selection().index, 0);
}

#[test]
fn read_completion_runs_scripted_session() {
	let mut host = FakeHost::new("b");
	host.script(action_events(&[Action::Next, Action::AcceptCurrent]));
	let mut matcher = ListMatcher::new(&["bar", "baz"]);

	let value = read_completion(
		&mut host,
		Sources::new(&mut matcher, &NoMetadata),
		History::disabled(),
		EngineConfig::default(),
	)
	.unwrap();

	assert_eq!(value, "baz");
	assert!(host.painted_text(host.list_anchor()).is_empty());
}

#[test]
fn confirmation_is_cancelled_by_other_input() {
	let mut host = FakeHost::new("zz").requiring(RequireMatch::Confirm);
	host.script([
		HostEvent::Action(Action::AcceptInput),
		HostEvent::Other,
		HostEvent::Action(Action::AcceptInput),
		HostEvent::Action(Action::AcceptInput),
	]);
	let mut matcher = ListMatcher::new(&["a"]);

	let value = read_completion(
		&mut host,
		Sources::new(&mut matcher, &NoMetadata),
		History::disabled(),
		EngineConfig::default(),
	)
	.unwrap();

	assert_eq!(value, "zz");
	assert_eq!(host.messages, vec!["Confirm", "Confirm"]);
}

#[test]
fn abort_clears_decorations() {
	let mut host = FakeHost::new("a");
	host.script([HostEvent::Action(Action::Next), HostEvent::Abort]);
	let mut matcher = ListMatcher::new(&["ab", "ac"]);

	let err = read_completion(
		&mut host,
		Sources::new(&mut matcher, &NoMetadata),
		History::disabled(),
		EngineConfig::default(),
	)
	.unwrap_err();

	assert!(matches!(err, Error::Aborted));
	assert!(host.painted_text(host.list_anchor()).is_empty());
	assert!(host.painted_text(Anchor::before(0)).is_empty());
	assert_eq!(host.input, "a");
}

#[test]
fn unavailable_matcher_ends_session() {
	let mut host = FakeHost::new("a");
	let mut matcher = ListMatcher::new(&["a"]);
	matcher.unavailable = true;

	let err = read_completion(
		&mut host,
		Sources::new(&mut matcher, &NoMetadata),
		History::disabled(),
		EngineConfig::default(),
	)
	.unwrap_err();
	assert!(err.is_abort());
}
