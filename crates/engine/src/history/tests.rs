use std::path::{Path, PathBuf};

use super::*;

fn plain(entries: &[&str]) -> History {
	History::new(entries.iter().map(|e| e.to_string()).collect(), HistoryKind::Plain)
}

fn files(entries: &[&str]) -> History {
	History::new(entries.iter().map(|e| e.to_string()).collect(), HistoryKind::File)
}

fn ranker() -> HistoryRanker {
	HistoryRanker::with_home(Some(PathBuf::from("/home/u")))
}

#[test]
fn plain_history_first_occurrence_wins() {
	let mut ranker = ranker();
	ranker.refresh(&plain(&["foo", "bar", "foo"]), "");
	assert_eq!(ranker.rank("foo"), 0);
	assert_eq!(ranker.rank("bar"), 1);
	assert_eq!(ranker.rank("baz"), UNSEEN);
}

#[test]
fn plain_history_is_built_once() {
	let mut ranker = ranker();
	ranker.refresh(&plain(&["foo"]), "");
	ranker.refresh(&plain(&["bar", "foo"]), "");
	assert_eq!(ranker.rank("foo"), 0);
	assert_eq!(ranker.rank("bar"), UNSEEN);

	ranker.invalidate();
	ranker.refresh(&plain(&["bar", "foo"]), "");
	assert_eq!(ranker.rank("foo"), 1);
}

#[test]
fn disabled_history_ranks_everything_unseen() {
	let mut ranker = ranker();
	ranker.refresh(&History::disabled(), "");
	assert_eq!(ranker.rank(""), UNSEEN);
	assert_eq!(ranker.rank("anything"), UNSEEN);
}

#[test]
fn rank_before_refresh_is_unseen() {
	assert_eq!(ranker().rank("foo"), UNSEEN);
}

#[test]
fn path_history_strips_directory_and_collapses_nesting() {
	let history = files(&["/srv/app/src/main.rs", "/srv/app/Cargo.toml", "/srv/app/src/lib.rs", "/etc/hosts"]);
	let mut ranker = ranker();
	ranker.refresh(&history, "/srv/app/");

	assert_eq!(ranker.scope(), Some("/srv/app/"));
	assert_eq!(ranker.rank("src/"), 0);
	assert_eq!(ranker.rank("Cargo.toml"), 1);
	assert_eq!(ranker.rank("hosts"), UNSEEN);
	assert_eq!(ranker.rank("/etc/hosts"), UNSEEN);
}

#[test]
fn path_history_matches_abbreviated_entries() {
	let history = files(&["~/notes/todo.md", "/home/u/notes/done.md"]);
	let mut ranker = ranker();
	ranker.refresh(&history, "~/notes/");

	assert_eq!(ranker.scope(), Some("/home/u/notes/"));
	assert_eq!(ranker.rank("todo.md"), 0);
	assert_eq!(ranker.rank("done.md"), 1);
}

#[test]
fn changing_directory_rebuilds_without_leaking_ranks() {
	let history = files(&["/a/x", "/b/y", "/a/y"]);
	let mut ranker = ranker();

	ranker.refresh(&history, "/a/");
	assert_eq!(ranker.rank("x"), 0);
	assert_eq!(ranker.rank("y"), 2);

	ranker.refresh(&history, "/b/");
	assert_eq!(ranker.scope(), Some("/b/"));
	assert_eq!(ranker.rank("x"), UNSEEN);
	assert_eq!(ranker.rank("y"), 1);
}

#[test]
fn expansion_substitutes_variables_and_home() {
	let lookup = |name: &str| (name == "PROJ").then(|| "/srv/proj".to_string());
	let home = Some(Path::new("/home/u"));

	assert_eq!(expand_file_name_with("$PROJ/src/", lookup, home), "/srv/proj/src/");
	assert_eq!(expand_file_name_with("${PROJ}/src/", lookup, home), "/srv/proj/src/");
	assert_eq!(expand_file_name_with("~/src/", lookup, home), "/home/u/src/");
	assert_eq!(expand_file_name_with("~", lookup, home), "/home/u");
	assert_eq!(expand_file_name_with("a$$b", lookup, home), "a$b");
	assert_eq!(expand_file_name_with("$MISSING/x", lookup, home), "$MISSING/x");
	assert_eq!(expand_file_name_with("${open", lookup, home), "${open");
	assert_eq!(expand_file_name_with("~/x", lookup, None), "~/x");
}

#[test]
fn abbreviation_requires_a_component_boundary() {
	let home = Some(Path::new("/home/u/"));
	assert_eq!(abbreviate_file_name("/home/u/src/", home).as_deref(), Some("~/src/"));
	assert_eq!(abbreviate_file_name("/home/u", home).as_deref(), Some("~"));
	assert_eq!(abbreviate_file_name("/home/user/src/", home), None);
	assert_eq!(abbreviate_file_name("/etc/", None), None);
}
