#![cfg_attr(test, allow(unused_crate_dependencies))]
//! `minisel`: pick one line from stdin, or one file name, with incremental
//! vertical completion.
//!
//! The picker draws on the alternate screen of stderr and prints the chosen
//! value to stdout, so it composes in shell pipelines:
//!
//! ```text
//! git branch --format='%(refname:short)' | minisel --prompt 'branch: ' | xargs git switch
//! ```

mod cli;
mod config;
mod filter;
mod host;
mod keymap;
mod logging;

use std::io::{self, BufRead};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use host::{TerminalGuard, TerminalHost};
use minisel_engine::{
	BasicMatcher, Category, EngineConfig, FileMatcher, History, HistoryKind, Matcher, Sources, StaticMetadata,
	read_completion,
};
use tracing::{info, warn};

/// Exit status of a cancelled session, as for SIGINT.
const EXIT_ABORTED: u8 = 130;

fn main() -> ExitCode {
	let cli = Cli::parse();
	logging::setup_tracing(cli.verbose);

	match run(cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(error) if is_abort(&error) => {
			info!(%error, "session aborted");
			ExitCode::from(EXIT_ABORTED)
		}
		Err(error) => {
			warn!("minisel failed: {error:#}");
			eprintln!("minisel: {error:#}");
			ExitCode::FAILURE
		}
	}
}

fn is_abort(error: &anyhow::Error) -> bool {
	error
		.downcast_ref::<minisel_engine::Error>()
		.is_some_and(minisel_engine::Error::is_abort)
}

fn run(cli: Cli) -> Result<()> {
	let source = config::resolve(cli.config.clone(), std::env::var_os(config::CONFIG_ENV), dirs::config_dir());
	let file_config = config::load(&source)?;

	let history_path = cli.history.clone().or(file_config.history.file);
	let history_kind = cli.history_kind.map_or(file_config.history.kind, HistoryKind::from);
	let history = match &history_path {
		Some(path) => config::read_history(path, history_kind)?,
		None => History::disabled(),
	};

	let mut metadata = StaticMetadata::new();
	if let Some(separator) = &cli.group_by_prefix {
		metadata = metadata.with_group_separator(separator.as_str());
	}
	if let Some(default) = &cli.default {
		metadata = metadata.with_default(default.as_str());
	}
	let mut matcher: Box<dyn Matcher> = match &cli.files {
		Some(dir) => {
			metadata = metadata.with_category(Category::File);
			Box::new(FileMatcher::new(dir))
		}
		None => Box::new(BasicMatcher::new(read_candidates()?)),
	};
	let sources = Sources::new(matcher.as_mut(), &metadata);

	if let Some(query) = &cli.filter {
		for line in filter::filter(query, sources, history, file_config.engine)? {
			println!("{line}");
		}
		return Ok(());
	}

	let value = interactive(&cli, sources, history, file_config.engine)?;
	println!("{value}");
	if let Some(path) = &history_path {
		config::append_history(path, &value)?;
	}
	Ok(())
}

fn read_candidates() -> Result<Vec<String>> {
	let lines = io::stdin()
		.lock()
		.lines()
		.collect::<io::Result<Vec<_>>>()
		.context("failed to read candidates from stdin")?;
	info!(candidates = lines.len(), "read candidates");
	Ok(lines)
}

fn interactive(cli: &Cli, sources: Sources<'_>, history: History, config: EngineConfig) -> Result<String> {
	let _guard = TerminalGuard::enter().context("failed to set up the terminal")?;
	let mut host = TerminalHost::new(io::stderr(), cli.prompt.as_str(), cli.require_match.into()).with_files(cli.files.is_some());
	Ok(read_completion(&mut host, sources, history, config)?)
}
